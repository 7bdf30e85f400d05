use std::path::PathBuf;

use clap::Parser;
use mascii::domain::{distribution_by_category, distribution_by_type, percent_of};
use tracing::instrument;

use super::{
    Context, OutputFormat,
    terminal::{Colorize, human_size, is_narrow},
};

#[derive(Debug, Parser)]
#[command(about = "Break the file size down by record category and node type")]
pub struct Distribution {
    /// The scene file
    file: PathBuf,

    /// How many node types to list (defaults to the configured count)
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// List every node type
    #[arg(long, conflicts_with = "top")]
    all: bool,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Distribution {
    #[instrument(level = "debug", skip(self, context), fields(file = %self.file.display()))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let (scene, records) = context.load(&self.file)?;
        let hierarchy = context.build(&records)?;

        let total = scene.source().size();
        let top = if self.all {
            None
        } else {
            Some(self.top.unwrap_or(context.config.top_types))
        };
        let categories = distribution_by_category(&records);
        let types = distribution_by_type(&hierarchy, top);

        match self.output {
            OutputFormat::Json => {
                let entry = |name: &str, size: u64| {
                    serde_json::json!({
                        "name": name,
                        "size": size,
                        "percent": percent_of(size, total),
                    })
                };
                let output = serde_json::json!({
                    "file_size": total,
                    "categories": categories.iter().map(|(name, size)| entry(name, *size)).collect::<Vec<_>>(),
                    "types": types.iter().map(|(name, size)| entry(name, *size)).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!("{}", format!("{} ({})", self.file.display(), human_size(total)).info());
                println!();
                print_rows("Category", &categories, total);
                println!();
                print_rows("Node type", &types, total);
            }
        }

        Ok(())
    }
}

fn print_rows<S: AsRef<str>>(heading: &str, rows: &[(S, u64)], total: u64) {
    let width = rows
        .iter()
        .map(|(name, _)| name.as_ref().len())
        .chain([heading.len()])
        .max()
        .unwrap_or_default();

    println!("{}", format!("{heading:<width$}  {:>10}  {:>8}", "Size", "%").dim());
    for (name, size) in rows {
        let name = name.as_ref();
        if is_narrow() {
            println!("{name}: {}", human_size(*size));
        } else {
            println!(
                "{name:<width$}  {:>10}  {:>8.3}",
                human_size(*size),
                percent_of(*size, total)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use mascii::Config;

    use super::*;
    use crate::cli::tests::context;

    #[test]
    fn runs_against_a_scene() {
        let (file, context) = context(Config::default());
        for output in [OutputFormat::Table, OutputFormat::Json] {
            let command = Distribution {
                file: file.path().to_path_buf(),
                top: Some(2),
                all: false,
                output,
            };
            command.run(&context).unwrap();
        }
    }

    #[test]
    fn top_conflicts_with_all() {
        use crate::cli::Cli;

        let result = Cli::try_parse_from(["mascii", "distribution", "a.ma", "--top", "3", "--all"]);
        assert!(result.is_err());
    }
}
