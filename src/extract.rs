//! Each extractor picks the records it understands out of a loaded scene and
//! turns them into a plain data structure. Extractors that need more than a
//! record's first statement re-read the record through
//! [`Scene::read_detail`](crate::Scene::read_detail).

mod audio;
mod info;
mod playback;
mod plugin;
mod reference;

use std::io;

pub use audio::Audio;
pub use info::FileInfo;
pub use playback::PlaybackConfig;
pub use plugin::PluginRequirement;
pub use reference::Reference;

/// Errors that can occur while extracting data from a record's detail.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The scene file could not be re-read.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A required attribute is not set on the node.
    #[error("node {node} has no {attribute} attribute")]
    MissingAttribute {
        /// The node name.
        node: String,
        /// The missing attribute.
        attribute: &'static str,
    },

    /// An attribute value is not a number.
    #[error("attribute {attribute} of node {node} is not a number: {value:?}")]
    InvalidNumber {
        /// The node name.
        node: String,
        /// The offending attribute.
        attribute: &'static str,
        /// The value as written in the file.
        value: String,
    },
}
