//! Audio nodes.
//!
//! ```text
//! createNode audio -n "happy_frog";
//!     rename -uid "4D97ED00-45A7-3DF0-4531-63ACF0545B24";
//!     setAttr ".ef" 2188.9502562925172;
//!     setAttr ".se" 2188.9502562925172;
//!     setAttr ".f" -type "string" "C:/Users/Lei/bgm/happy-frog.wav";
//! ```

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use tracing::instrument;

use super::ExtractError;
use crate::{Scene, TypedRecord};

static PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"setAttr "\.f" -type "string" "(.*)";"#).expect("valid path pattern")
});

static SCALAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"setAttr "\.(\w+)" ([-+]?[0-9]*\.?[0-9]*(?:[eE][-+]?[0-9]+)?)\s*;"#)
        .expect("valid scalar pattern")
});

/// An audio node and its playback range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Audio {
    /// The node name.
    pub name: String,
    /// The path of the audio file.
    pub path: String,
    /// Where playback starts within the source (`.ss`), defaulting to 0.
    pub source_start: f64,
    /// Where playback ends within the source (`.se`).
    pub source_end: f64,
    /// The last frame of the clip (`.ef`).
    pub end_frame: f64,
    /// The clip's offset on the timeline (`.o`), defaulting to 0.
    pub offset: f64,
    /// Trailing silence (`.si`), defaulting to 0.
    pub silence: f64,
}

impl Audio {
    /// Extracts every `audio` node among `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be re-read, or if an audio node
    /// lacks its file path, source end or end frame, or sets a malformed
    /// number.
    #[instrument(level = "debug", skip_all)]
    pub fn from_records(scene: &Scene, records: &[TypedRecord]) -> Result<Vec<Self>, ExtractError> {
        records
            .iter()
            .filter_map(TypedRecord::as_node_creation)
            .filter(|node| node.node_type() == "audio")
            .map(|node| {
                let detail = scene.read_detail(node.line())?;
                Self::parse(node.name(), &detail)
            })
            .collect()
    }

    fn parse(name: &str, detail: &str) -> Result<Self, ExtractError> {
        let path = PATH
            .captures(detail)
            .map(|captures| captures[1].to_string())
            .ok_or_else(|| ExtractError::MissingAttribute {
                node: name.to_string(),
                attribute: ".f",
            })?;

        let mut scalars: HashMap<&str, &str> = HashMap::new();
        for captures in SCALAR.captures_iter(detail) {
            let (_, [attribute, value]) = captures.extract();
            scalars.entry(attribute).or_insert(value);
        }

        let number = |attribute: &'static str, default: Option<f64>| {
            let Some(value) = scalars.get(&attribute[1..]) else {
                return default.ok_or_else(|| ExtractError::MissingAttribute {
                    node: name.to_string(),
                    attribute,
                });
            };
            value.parse::<f64>().map_err(|_| ExtractError::InvalidNumber {
                node: name.to_string(),
                attribute,
                value: (*value).to_string(),
            })
        };

        Ok(Self {
            name: name.to_string(),
            path,
            source_start: number(".ss", Some(0.0))?,
            source_end: number(".se", None)?,
            end_frame: number(".ef", None)?,
            offset: number(".o", Some(0.0))?,
            silence: number(".si", Some(0.0))?,
        })
    }
}
