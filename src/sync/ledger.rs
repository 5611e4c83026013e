use chrono::{DateTime, Local};
use log::debug;
use serde::Serialize;

use crate::database::SongStore;
use crate::error::DatabaseError;
use crate::models::SongField;

/// One reversible mutation made by a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum LedgerEntry {
    /// The run created this song
    SongCreated { song_id: i64 },
    /// The run set a path field that was previously `old_value`
    FieldUpdated {
        song_id: i64,
        field: SongField,
        old_value: Option<String>,
        new_value: String,
    },
    /// The run copied an external chart into canonical storage
    ChartMoved {
        song_id: i64,
        old_value: String,
        new_value: String,
    },
}

impl LedgerEntry {
    pub fn operation_type(&self) -> &'static str {
        match self {
            LedgerEntry::SongCreated { .. } => "song_created",
            LedgerEntry::FieldUpdated { .. } => "field_updated",
            LedgerEntry::ChartMoved { .. } => "chart_moved",
        }
    }

    pub fn song_id(&self) -> i64 {
        match self {
            LedgerEntry::SongCreated { song_id }
            | LedgerEntry::FieldUpdated { song_id, .. }
            | LedgerEntry::ChartMoved { song_id, .. } => *song_id,
        }
    }

    pub fn field(&self) -> Option<SongField> {
        match self {
            LedgerEntry::SongCreated { .. } => None,
            LedgerEntry::FieldUpdated { field, .. } => Some(*field),
            LedgerEntry::ChartMoved { .. } => Some(SongField::ChartPath),
        }
    }

    pub fn old_value(&self) -> Option<&str> {
        match self {
            LedgerEntry::SongCreated { .. } => None,
            LedgerEntry::FieldUpdated { old_value, .. } => old_value.as_deref(),
            LedgerEntry::ChartMoved { old_value, .. } => Some(old_value),
        }
    }

    pub fn new_value(&self) -> Option<&str> {
        match self {
            LedgerEntry::SongCreated { .. } => None,
            LedgerEntry::FieldUpdated { new_value, .. }
            | LedgerEntry::ChartMoved { new_value, .. } => Some(new_value),
        }
    }

    /// Rebuilds an entry from its `sync_history` columns
    pub fn from_columns(
        operation_type: &str,
        song_id: i64,
        field_name: Option<String>,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Result<Self, String> {
        match operation_type {
            "song_created" => Ok(LedgerEntry::SongCreated { song_id }),
            "field_updated" => {
                let field = field_name
                    .ok_or_else(|| "field_updated entry without field name".to_string())?
                    .parse::<SongField>()?;
                let new_value =
                    new_value.ok_or_else(|| "field_updated entry without new value".to_string())?;
                Ok(LedgerEntry::FieldUpdated {
                    song_id,
                    field,
                    old_value,
                    new_value,
                })
            }
            "chart_moved" => {
                let old_value =
                    old_value.ok_or_else(|| "chart_moved entry without old value".to_string())?;
                let new_value =
                    new_value.ok_or_else(|| "chart_moved entry without new value".to_string())?;
                Ok(LedgerEntry::ChartMoved {
                    song_id,
                    old_value,
                    new_value,
                })
            }
            other => Err(format!("Unknown operation type: {}", other)),
        }
    }
}

/// Writes the entries of one sync generation.
///
/// Starting a run drops whatever the previous run recorded for the
/// repertoire; every entry appended afterwards shares the run timestamp.
#[derive(Debug)]
pub struct SyncLedger {
    repertoire_id: i64,
    run_timestamp: DateTime<Local>,
}

impl SyncLedger {
    pub fn start_run<S: SongStore + ?Sized>(
        store: &S,
        repertoire_id: i64,
    ) -> Result<Self, DatabaseError> {
        let discarded = store.clear_ledger(repertoire_id)?;
        if discarded > 0 {
            debug!(
                "Discarded {} ledger entries from the previous run of repertoire {}",
                discarded, repertoire_id
            );
        }

        Ok(Self {
            repertoire_id,
            run_timestamp: Local::now(),
        })
    }

    pub fn record<S: SongStore + ?Sized>(
        &self,
        store: &S,
        entry: LedgerEntry,
    ) -> Result<(), DatabaseError> {
        store.append_ledger_entry(self.repertoire_id, self.run_timestamp, &entry)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_rebuild_from_their_columns() {
        let entries = [
            LedgerEntry::SongCreated { song_id: 1 },
            LedgerEntry::FieldUpdated {
                song_id: 2,
                field: SongField::AudioPath,
                old_value: None,
                new_value: "/music/a.mp3".into(),
            },
            LedgerEntry::ChartMoved {
                song_id: 3,
                old_value: r"e:\Sheets\a.pdf".into(),
                new_value: "/charts/3_a.pdf".into(),
            },
        ];

        for entry in entries {
            let rebuilt = LedgerEntry::from_columns(
                entry.operation_type(),
                entry.song_id(),
                entry.field().map(|f| f.as_str().to_string()),
                entry.old_value().map(String::from),
                entry.new_value().map(String::from),
            )
            .unwrap();
            assert_eq!(rebuilt, entry);
        }
    }

    #[test]
    fn test_malformed_rows_are_rejected() {
        assert!(LedgerEntry::from_columns("renamed", 1, None, None, None).is_err());
        assert!(LedgerEntry::from_columns("field_updated", 1, None, None, Some("x".into())).is_err());
        assert!(LedgerEntry::from_columns(
            "field_updated",
            1,
            Some("duration".into()),
            None,
            Some("x".into())
        )
        .is_err());
        assert!(LedgerEntry::from_columns("chart_moved", 1, None, None, Some("x".into())).is_err());
    }
}
