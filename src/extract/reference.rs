//! Referenced scene files.
//!
//! ```text
//! file -r -ns "tracer" -dr 1 -rfn "tracerRN" -op "v=0;" -typ "mayaAscii" "C:/Users/tracer.ma";
//! ```

use serde::Serialize;

use crate::TypedRecord;

/// A scene file brought in by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// The path of the referenced file.
    pub path: String,
    /// The name of the reference node (`-rfn`).
    pub reference_node: String,
    /// The namespace of the referenced objects (`-ns`).
    pub namespace: String,
    /// The type of the referenced file (`-typ`).
    pub file_type: String,
}

impl Reference {
    /// Collects every `file -r` record among `records`, in file order.
    ///
    /// Imports and other `file` commands without `-r` are ignored.
    #[must_use]
    pub fn from_records(records: &[TypedRecord]) -> Vec<Self> {
        records
            .iter()
            .filter_map(TypedRecord::as_file_reference)
            .filter(|file| file.is_reference())
            .map(|file| Self {
                path: file.path().to_string(),
                reference_node: file.reference_node_name().to_string(),
                namespace: file.namespace().to_string(),
                file_type: file.file_type().to_string(),
            })
            .collect()
    }
}
