use std::path::PathBuf;

use clap::Parser;
use tracing::instrument;

use super::{Context, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Print the full text of the record starting on a line")]
pub struct Show {
    /// The scene file
    file: PathBuf,

    /// The line the record starts on (1-based)
    line: usize,
}

impl Show {
    #[instrument(level = "debug", skip(self, context), fields(file = %self.file.display()))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let scene = context.open(&self.file)?;
        let detail = scene.read_detail(self.line)?;

        if detail.is_empty() {
            anyhow::bail!("no record starts on line {}", self.line);
        }

        print!("{detail}");
        if !detail.ends_with('\n') {
            println!();
        }
        println!("{}", footer(&detail, self.line).dim());
        Ok(())
    }
}

/// Describes the record text as printed, which is not the record's on-disk
/// size.
fn footer(detail: &str, line: usize) -> String {
    format!("{} characters, line {line}", detail.chars().count())
}
