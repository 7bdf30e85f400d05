//! Everything that touches the scene file: opening it, streaming it into
//! records, and re-reading single records on demand.

mod detail;
mod loader;
pub mod scan;
pub mod scene;
pub mod segmenter;
mod source_file;

pub use loader::LoadError;
pub use scan::{ScanError, ScanReport, SceneSummary, scan};
pub use scene::Scene;
pub use segmenter::{Segment, Segmenter};
pub use source_file::{OpenError, SourceFile};
