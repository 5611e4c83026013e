use crate::cli::CliError;
use crate::cli::OutputFormat;
use colored::Colorize;
use comfy_table::{presets, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

/// Renders command results as a table, JSON or CSV
pub struct OutputFormatter {
    format: OutputFormat,
    color: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        Self {
            format,
            color: !no_color && should_use_color(),
        }
    }

    /// Writes `data` to stdout in the selected format
    pub fn print<T: Serialize + TableDisplay>(&self, data: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.render(data, &mut out)
    }

    pub fn render<T, W>(&self, data: &T, out: &mut W) -> Result<(), CliError>
    where
        T: Serialize + TableDisplay,
        W: Write,
    {
        match self.format {
            OutputFormat::Table => writeln!(out, "{}", data.to_table())?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, data)?;
                writeln!(out)?;
            }
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(out);
                writer.write_record(data.columns())?;
                for row in data.rows() {
                    writer.write_record(row)?;
                }
                writer.flush()?;
            }
        }
        Ok(())
    }

    /// Status line for the user; warnings go to stderr so piped output stays clean
    pub fn notify(&self, message: &str, tone: Tone) {
        let styled = match (self.color, tone) {
            (false, _) => message.normal(),
            (true, Tone::Info) => message.blue(),
            (true, Tone::Success) => message.green(),
            (true, Tone::Warning) => message.yellow(),
        };

        match tone {
            Tone::Warning => eprintln!("{}", styled),
            _ => println!("{}", styled),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Tone {
    Info,
    Success,
    Warning,
}

/// Results that can be shown as rows of cells
pub trait TableDisplay {
    /// Column names; also the CSV header
    fn columns(&self) -> Vec<&'static str>;

    /// Plain cell values, one vector per row
    fn rows(&self) -> Vec<Vec<String>>;

    fn to_table(&self) -> Table {
        let mut table = create_table(&self.columns());
        for row in self.rows() {
            table.add_row(row);
        }
        table
    }
}

pub fn create_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

/// Colors a table cell unless color output is disabled
#[macro_export]
macro_rules! colored_cell {
    ($value:expr, $color:ident) => {
        if $crate::cli::output::should_use_color() {
            $value.to_string().$color().to_string()
        } else {
            $value.to_string()
        }
    };
}

pub fn should_use_color() -> bool {
    std::env::var("NO_COLOR").is_err() && colored::control::SHOULD_COLORIZE.should_colorize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Tally {
        name: String,
        count: usize,
    }

    impl TableDisplay for Tally {
        fn columns(&self) -> Vec<&'static str> {
            vec!["name", "count"]
        }

        fn rows(&self) -> Vec<Vec<String>> {
            vec![vec![self.name.clone(), self.count.to_string()]]
        }
    }

    fn rendered(format: OutputFormat) -> String {
        let tally = Tally {
            name: "Blue, Bossa".to_string(),
            count: 3,
        };
        let mut out = Vec::new();
        OutputFormatter::new(format, true)
            .render(&tally, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_quotes_cells() {
        assert_eq!(rendered(OutputFormat::Csv), "name,count\n\"Blue, Bossa\",3\n");
    }

    #[test]
    fn test_json_uses_field_names() {
        let value: serde_json::Value = serde_json::from_str(&rendered(OutputFormat::Json)).unwrap();
        assert_eq!(value["name"], "Blue, Bossa");
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn test_table_contains_cells() {
        let table = rendered(OutputFormat::Table);
        assert!(table.contains("Blue, Bossa"));
        assert!(table.contains("count"));
    }
}
