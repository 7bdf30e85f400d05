//! Products and plugins a scene depends on.

use serde::Serialize;

use crate::TypedRecord;

/// A `requires` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginRequirement {
    /// The required product or plugin, such as `maya` or `mtoa`.
    pub product: String,
    /// The required version.
    pub version: String,
    /// The data types the plugin provides (`-dataType`).
    pub data_types: Vec<String>,
    /// The node types the plugin provides (`-nodeType`).
    pub node_types: Vec<String>,
}

impl PluginRequirement {
    /// Collects every `requires` record among `records`, in file order.
    #[must_use]
    pub fn from_records(records: &[TypedRecord]) -> Vec<Self> {
        let owned = |values: Vec<&str>| values.into_iter().map(str::to_string).collect();
        records
            .iter()
            .filter_map(TypedRecord::as_requirement)
            .map(|requirement| Self {
                product: requirement.product().to_string(),
                version: requirement.version().to_string(),
                data_types: owned(requirement.data_types()),
                node_types: owned(requirement.node_types()),
            })
            .collect()
    }
}
