use crate::cli::commands::CliContext;
use crate::cli::output::{create_table, TableDisplay, Tone};
use crate::cli::CliError;
use crate::colored_cell;
use crate::database::{LedgerRecord, SongStore};
use crate::sync::{LedgerEntry, SyncReport, UndoReport};
use colored::Colorize;
use comfy_table::Table;

pub fn run_sync(ctx: &mut CliContext, repertoire_id: i64) -> Result<(), CliError> {
    let report = ctx.engine.sync(&mut ctx.db, repertoire_id)?;
    ctx.output.print(&report)?;
    for error in &report.errors {
        ctx.output.notify(error, Tone::Warning);
    }
    Ok(())
}

pub fn run_undo(ctx: &mut CliContext, repertoire_id: i64) -> Result<(), CliError> {
    let report = ctx.engine.undo(&mut ctx.db, repertoire_id)?;
    ctx.output.print(&report)
}

pub fn show_history(ctx: &mut CliContext, repertoire_id: i64) -> Result<(), CliError> {
    let records = ctx.db.conn.list_ledger(repertoire_id)?;
    if records.is_empty() {
        ctx.output.notify(
            &format!("No sync history for repertoire {}", repertoire_id),
            Tone::Info,
        );
        return Ok(());
    }
    ctx.output.print(&records)
}

fn count_rows(counts: &[(&str, usize)]) -> Vec<Vec<String>> {
    counts
        .iter()
        .map(|(label, count)| vec![label.to_string(), count.to_string()])
        .collect()
}

impl SyncReport {
    fn counts(&self) -> [(&'static str, usize); 9] {
        [
            ("songs_added", self.songs_added),
            ("audio_linked", self.audio_linked),
            ("sheets_linked", self.sheets_linked),
            ("charts_migrated", self.charts_migrated),
            ("songs_in_repertoire", self.debug.songs_in_repertoire),
            ("audio_files_found", self.debug.audio_files_found),
            ("sheet_files_found", self.debug.sheet_files_found),
            ("external_charts_found", self.debug.external_charts_found),
            ("errors", self.errors.len()),
        ]
    }
}

impl TableDisplay for SyncReport {
    fn columns(&self) -> Vec<&'static str> {
        vec!["result", "count"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        count_rows(&self.counts())
    }

    fn to_table(&self) -> Table {
        let mut table = create_table(&["Result", "Count"]);
        for (label, count) in self.counts() {
            if label == "errors" && count > 0 {
                table.add_row(vec![colored_cell!(label, red), colored_cell!(count, red)]);
            } else {
                table.add_row(vec![label.to_string(), count.to_string()]);
            }
        }
        table
    }
}

impl TableDisplay for UndoReport {
    fn columns(&self) -> Vec<&'static str> {
        vec!["result", "count"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        count_rows(&[
            ("songs_deleted", self.songs_deleted),
            ("audio_unlinked", self.audio_unlinked),
            ("charts_unlinked", self.charts_unlinked),
            ("charts_restored", self.charts_restored),
            ("files_deleted", self.files_deleted),
        ])
    }
}

impl TableDisplay for Vec<LedgerRecord> {
    fn columns(&self) -> Vec<&'static str> {
        vec![
            "id",
            "run_timestamp",
            "operation_type",
            "song_id",
            "old_value",
            "new_value",
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|record| {
                let entry = &record.entry;
                vec![
                    record.id.to_string(),
                    record.run_timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                    entry.operation_type().to_string(),
                    entry.song_id().to_string(),
                    entry.old_value().unwrap_or("").to_string(),
                    entry.new_value().unwrap_or("").to_string(),
                ]
            })
            .collect()
    }

    fn to_table(&self) -> Table {
        let mut table = create_table(&["ID", "Run", "Operation", "Song", "Old Value", "New Value"]);
        for (record, mut row) in self.iter().zip(self.rows()) {
            row[2] = match record.entry {
                LedgerEntry::SongCreated { .. } => colored_cell!(row[2], green),
                LedgerEntry::FieldUpdated { .. } => colored_cell!(row[2], blue),
                LedgerEntry::ChartMoved { .. } => colored_cell!(row[2], yellow),
            };
            table.add_row(row);
        }
        table
    }
}
