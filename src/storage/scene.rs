//! A scene file on disk, together with the settings used to read it.
//!
//! The [`Scene`] is the entry point for consumers: it validates the file,
//! streams its records, and re-reads individual records on demand.

use std::{io, path::Path, sync::Arc};

use tracing::instrument;

use crate::{
    domain::{BuildError, Config, Hierarchy, TypedRecord},
    observer::Observer,
    storage::{LoadError, OpenError, SourceFile, detail, loader},
};

/// A Maya ASCII scene file.
#[derive(Debug, Clone)]
pub struct Scene {
    source: Arc<SourceFile>,
    config: Config,
}

impl Scene {
    /// Opens the scene at `path` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OpenError::Format`] if the file is not a `.ma` file, or
    /// [`OpenError::Io`] if it cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OpenError> {
        Self::open_with_config(path, Config::default())
    }

    /// Opens the scene at `path` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OpenError::Format`] if the file does not have the configured
    /// extension, or [`OpenError::Io`] if it cannot be read.
    pub fn open_with_config(path: impl AsRef<Path>, config: Config) -> Result<Self, OpenError> {
        let source = SourceFile::open(path, config.extension())?;
        Ok(Self {
            source: Arc::new(source),
            config,
        })
    }

    /// The underlying file.
    #[must_use]
    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    /// The configuration the scene was opened with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Reads every record of the file, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, or
    /// [`LoadError::Cancelled`] if the observer cancels the load.
    pub fn load(&self, observer: &mut dyn Observer) -> Result<Vec<TypedRecord>, LoadError> {
        loader::load(&self.source, self.config.comment_marker(), observer)
    }

    /// Builds the ownership hierarchy of previously loaded records.
    ///
    /// # Errors
    ///
    /// See [`Hierarchy::build`].
    pub fn build(
        records: &[TypedRecord],
        observer: &mut dyn Observer,
    ) -> Result<Hierarchy, BuildError> {
        Hierarchy::from_records(records, observer)
    }

    /// Reads the full text of the record starting on `line`.
    ///
    /// Returns an empty string if no record starts on that line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    #[instrument(level = "debug", skip(self))]
    pub fn read_detail(&self, line: usize) -> io::Result<String> {
        detail::read_detail(self.source.reader()?, line, self.config.comment_marker())
    }
}
