//! Scene metadata.
//!
//! ```text
//! fileInfo "application" "maya";
//! fileInfo "product" "Maya 2018";
//! fileInfo "license" "student";
//! ```

use serde::Serialize;

use crate::TypedRecord;

/// One `fileInfo` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// The metadata key.
    pub keyword: String,
    /// The metadata value, as written.
    pub value: String,
}

impl FileInfo {
    /// Collects every `fileInfo` record among `records`, in file order.
    #[must_use]
    pub fn from_records(records: &[TypedRecord]) -> Vec<Self> {
        records
            .iter()
            .filter_map(TypedRecord::as_metadata)
            .map(|metadata| Self {
                keyword: metadata.keyword().to_string(),
                value: metadata.value().to_string(),
            })
            .collect()
    }
}
