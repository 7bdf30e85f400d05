use std::path::PathBuf;

use clap::Parser;
use mascii::domain::diagnose;
use tracing::instrument;

use super::{Context, OutputFormat, terminal::{Colorize, fit_width}};

#[derive(Debug, Parser)]
#[command(about = "List the records taking up a noticeable share of the file")]
pub struct Diagnose {
    /// The scene file
    file: PathBuf,

    /// Only list records of at least this share of the file, in percent
    /// (defaults to the configured threshold)
    #[arg(long, value_name = "PERCENT")]
    min_percent: Option<f64>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Diagnose {
    #[instrument(level = "debug", skip(self, context), fields(file = %self.file.display()))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let (_scene, records) = context.load(&self.file)?;
        let min_percent = self.min_percent.unwrap_or(context.config.min_percent);
        let entries = diagnose(&records, min_percent);

        match self.output {
            OutputFormat::Json => {
                let entries: Vec<_> = entries
                    .iter()
                    .map(|entry| {
                        serde_json::json!({
                            "line": entry.line,
                            "size": entry.size,
                            "percent": entry.percent,
                            "description": entry.description.trim_end(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
            OutputFormat::Table => {
                if entries.is_empty() {
                    println!(
                        "{}",
                        format!("No record reaches {min_percent}% of the file.").success()
                    );
                    return Ok(());
                }
                for entry in &entries {
                    println!("{}", fit_width(&entry.to_string(), 0));
                }
                println!(
                    "\n{}",
                    format!("{} of {} records at or above {min_percent}%", entries.len(), records.len())
                        .dim()
                );
            }
        }

        Ok(())
    }
}
