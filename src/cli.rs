use std::path::{Path, PathBuf};

mod diagnose;
mod distribution;
mod extract;
mod progress;
mod scan;
mod show;
mod terminal;
mod tree;

use clap::ArgAction;
use diagnose::Diagnose;
use distribution::Distribution;
use extract::{Audio, Info, Playback, References, Requirements};
use mascii::{Config, Hierarchy, Scene, TypedRecord};
use progress::ProgressObserver;
use scan::Scan;
use show::Show;
use tracing::instrument;
use tree::Tree;

/// The configuration file picked up from the working directory.
const DEFAULT_CONFIG: &str = "mascii.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration file (defaults to ./mascii.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(self.config.as_deref())?;
        let context = Context {
            config,
            quiet: self.quiet,
        };
        self.command.run(&context)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries reports and JSON
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).is_file() => Path::new(DEFAULT_CONFIG),
        None => return Ok(Config::default()),
    };
    tracing::debug!(path = %path.display(), "loading configuration");
    Config::load(path).map_err(anyhow::Error::msg)
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List the records taking up a noticeable share of the file
    Diagnose(Diagnose),

    /// Break the file size down by record category and node type
    Distribution(Distribution),

    /// Print the ownership hierarchy with accumulated sizes
    Tree(Tree),

    /// Print the full text of the record starting on a line
    Show(Show),

    /// List referenced scene files
    References(References),

    /// List required products and plugins
    Requirements(Requirements),

    /// List file metadata
    Info(Info),

    /// List audio nodes
    Audio(Audio),

    /// Show the playback range
    Playback(Playback),

    /// Summarize every scene file under a directory
    Scan(Scan),
}

impl Command {
    fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Diagnose(command) => command.run(context)?,
            Self::Distribution(command) => command.run(context)?,
            Self::Tree(command) => command.run(context)?,
            Self::Show(command) => command.run(context)?,
            Self::References(command) => command.run(context)?,
            Self::Requirements(command) => command.run(context)?,
            Self::Info(command) => command.run(context)?,
            Self::Audio(command) => command.run(context)?,
            Self::Playback(command) => command.run(context)?,
            Self::Scan(command) => command.run(context)?,
        }
        Ok(())
    }
}

/// Output format shared by the reporting commands.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Settings shared by every command.
#[derive(Debug)]
pub struct Context {
    config: Config,
    quiet: bool,
}

impl Context {
    fn open(&self, path: &Path) -> anyhow::Result<Scene> {
        Ok(Scene::open_with_config(path, self.config.clone())?)
    }

    /// Opens and loads `path`, reporting progress unless quiet.
    #[instrument(level = "debug", skip(self))]
    fn load(&self, path: &Path) -> anyhow::Result<(Scene, Vec<TypedRecord>)> {
        let scene = self.open(path)?;
        let mut observer = ProgressObserver::new(self.quiet);
        let records = scene.load(&mut observer);
        observer.finish();
        Ok((scene, records?))
    }

    /// Builds the hierarchy of loaded records, reporting progress unless
    /// quiet.
    fn build(&self, records: &[TypedRecord]) -> anyhow::Result<Hierarchy> {
        let mut observer = ProgressObserver::new(self.quiet);
        let hierarchy = Scene::build(records, &mut observer);
        observer.finish();
        Ok(hierarchy?)
    }
}
