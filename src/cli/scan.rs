use std::path::PathBuf;

use clap::Parser;
use mascii::storage::scan;
use tracing::instrument;

use super::{
    Context, OutputFormat,
    terminal::{Colorize, human_size},
};

#[derive(Debug, Parser)]
#[command(about = "Summarize every scene file under a directory")]
pub struct Scan {
    /// The directory to search
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Scan {
    #[instrument(level = "debug", skip(self, context), fields(root = %self.root.display()))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let report = scan(&self.root, &context.config);

        match self.output {
            OutputFormat::Json => {
                let failures: Vec<_> = report
                    .failures
                    .iter()
                    .map(|(path, error)| serde_json::json!({ "path": path, "error": error.to_string() }))
                    .collect();
                let output = serde_json::json!({
                    "scenes": report.scenes,
                    "failures": failures,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                if report.scenes.is_empty() && report.failures.is_empty() {
                    println!(
                        "{}",
                        format!("No .{} files under {}.", context.config.extension(), self.root.display()).dim()
                    );
                    return Ok(());
                }
                for scene in &report.scenes {
                    let categories: Vec<_> = scene
                        .categories
                        .iter()
                        .map(|(name, size)| format!("{name} {}", human_size(*size)))
                        .collect();
                    println!(
                        "{} {} {}",
                        scene.path.display(),
                        format!("({}, {} records)", human_size(scene.size), scene.records).info(),
                        categories.join(", ").dim()
                    );
                }
                for (path, error) in &report.failures {
                    println!("{}", format!("{}: {error}", path.display()).warning());
                }
            }
        }

        if !report.failures.is_empty() {
            anyhow::bail!("{} of {} files could not be loaded", report.failures.len(), report.failures.len() + report.scenes.len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mascii::Config;
    use tempfile::tempdir;

    use super::*;
    use crate::cli::tests::{SCENE, context};

    #[test]
    fn scans_a_directory() {
        let (_file, context) = context(Config::default());
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.ma"), SCENE).unwrap();

        for output in [OutputFormat::Table, OutputFormat::Json] {
            let command = Scan {
                root: dir.path().to_path_buf(),
                output,
            };
            command.run(&context).unwrap();
        }
    }
}
