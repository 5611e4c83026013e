use chrono::{DateTime, Local, TimeZone};
use rusqlite::types::ToSql;

/// Timestamps are stored as unix seconds.
pub(crate) struct SqlDateTime(DateTime<Local>);

impl From<DateTime<Local>> for SqlDateTime {
    fn from(dt: DateTime<Local>) -> Self {
        SqlDateTime(dt)
    }
}

impl ToSql for SqlDateTime {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput> {
        Ok(rusqlite::types::ToSqlOutput::from(self.0.timestamp()))
    }
}

pub(crate) fn from_timestamp(timestamp: i64) -> rusqlite::Result<DateTime<Local>> {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| rusqlite::Error::InvalidParameterName("Invalid timestamp".into()))
}
