//! Commands listing data picked out of individual records.

use std::path::PathBuf;

use clap::Parser;
use mascii::extract::{self, FileInfo, PlaybackConfig, PluginRequirement, Reference};
use serde::Serialize;
use tracing::instrument;

use super::{Context, OutputFormat, terminal::Colorize};

#[derive(Debug, clap::Args)]
struct SceneArgs {
    /// The scene file
    file: PathBuf,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl SceneArgs {
    /// Prints `items` as JSON, or one table row per item.
    fn print<T: Serialize>(
        &self,
        items: &[T],
        empty: &str,
        row: impl Fn(&T) -> String,
    ) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
            OutputFormat::Table if items.is_empty() => println!("{}", empty.dim()),
            OutputFormat::Table => {
                for item in items {
                    println!("{}", row(item));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "List referenced scene files")]
pub struct References {
    #[command(flatten)]
    args: SceneArgs,
}

impl References {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let (_scene, records) = context.load(&self.args.file)?;
        let references = Reference::from_records(&records);
        self.args.print(&references, "No references.", |reference| {
            format!(
                "{} {} {}",
                reference.namespace.info(),
                reference.path,
                format!("({}, {})", reference.reference_node, reference.file_type).dim()
            )
        })
    }
}

#[derive(Debug, Parser)]
#[command(about = "List required products and plugins")]
pub struct Requirements {
    #[command(flatten)]
    args: SceneArgs,
}

impl Requirements {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let (_scene, records) = context.load(&self.args.file)?;
        let requirements = PluginRequirement::from_records(&records);
        self.args.print(&requirements, "No requirements.", |requirement| {
            let mut row = format!("{} {}", requirement.product.info(), requirement.version);
            if !requirement.node_types.is_empty() {
                row.push_str(&format!("\n  node types: {}", requirement.node_types.join(", ")).dim());
            }
            if !requirement.data_types.is_empty() {
                row.push_str(&format!("\n  data types: {}", requirement.data_types.join(", ")).dim());
            }
            row
        })
    }
}

#[derive(Debug, Parser)]
#[command(about = "List file metadata")]
pub struct Info {
    #[command(flatten)]
    args: SceneArgs,
}

impl Info {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let (_scene, records) = context.load(&self.args.file)?;
        let info = FileInfo::from_records(&records);
        let width = info.iter().map(|entry| entry.keyword.len()).max().unwrap_or_default();
        self.args.print(&info, "No file info.", |entry| {
            format!("{:<width$}  {}", entry.keyword, entry.value)
        })
    }
}

#[derive(Debug, Parser)]
#[command(about = "List audio nodes")]
pub struct Audio {
    #[command(flatten)]
    args: SceneArgs,
}

impl Audio {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let (scene, records) = context.load(&self.args.file)?;
        let audio = extract::Audio::from_records(&scene, &records)?;
        self.args.print(&audio, "No audio nodes.", |audio| {
            format!(
                "{} {}\n  source {}..{}, ends at frame {}, offset {}, silence {}",
                audio.name.info(),
                audio.path,
                audio.source_start,
                audio.source_end,
                audio.end_frame,
                audio.offset,
                audio.silence
            )
        })
    }
}

#[derive(Debug, Parser)]
#[command(about = "Show the playback range")]
pub struct Playback {
    #[command(flatten)]
    args: SceneArgs,
}

impl Playback {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let (scene, records) = context.load(&self.args.file)?;
        let playback: Vec<PlaybackConfig> = PlaybackConfig::from_records(&scene, &records)?
            .into_iter()
            .collect();
        self.args.print(&playback, "No playback options.", |playback| {
            format!(
                "playback {}..{}\nanimation {}..{}",
                playback.min, playback.max, playback.start, playback.end
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use mascii::Config;

    use super::*;
    use crate::cli::tests::context;

    fn args(file: &tempfile::NamedTempFile, output: OutputFormat) -> SceneArgs {
        SceneArgs {
            file: file.path().to_path_buf(),
            output,
        }
    }

    #[test]
    fn every_listing_runs_against_a_scene() {
        let (file, context) = context(Config::default());
        for output in [OutputFormat::Table, OutputFormat::Json] {
            References { args: args(&file, output) }.run(&context).unwrap();
            Requirements { args: args(&file, output) }.run(&context).unwrap();
            Info { args: args(&file, output) }.run(&context).unwrap();
            Audio { args: args(&file, output) }.run(&context).unwrap();
            Playback { args: args(&file, output) }.run(&context).unwrap();
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let (_file, context) = context(Config::default());
        let command = References {
            args: SceneArgs {
                file: PathBuf::from("/does/not/exist.ma"),
                output: OutputFormat::Table,
            },
        };
        assert!(command.run(&context).is_err());
    }
}
