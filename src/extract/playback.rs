//! The playback range stored in the scene configuration script.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::instrument;

use super::ExtractError;
use crate::{Scene, TypedRecord};

const SCRIPT_NODE: &str = "sceneConfigurationScriptNode";

static SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"setAttr "\.b" -type "string" "(.*)";"#).expect("valid script pattern")
});

static PLAYBACK_OPTIONS: LazyLock<Regex> = LazyLock::new(|| {
    const NUMBER: &str = r"([-+]?[0-9]*\.?[0-9]*)";
    Regex::new(&format!(
        "playbackOptions -min {NUMBER} -max {NUMBER} -ast {NUMBER} -aet {NUMBER}"
    ))
    .expect("valid playback pattern")
});

/// The scene's playback range, as set by `playbackOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackConfig {
    /// The start of the playback range (`-min`).
    pub min: f64,
    /// The end of the playback range (`-max`).
    pub max: f64,
    /// The start of the animation range (`-ast`).
    pub start: f64,
    /// The end of the animation range (`-aet`).
    pub end: f64,
}

impl PlaybackConfig {
    /// Reads the playback range from the first `sceneConfigurationScriptNode`
    /// among `records`.
    ///
    /// Returns `None` if there is no such node, if its script does not set
    /// the playback range, or if the script is missing or sets a malformed
    /// number. The last two cases are logged as warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be re-read.
    #[instrument(level = "debug", skip_all)]
    pub fn from_records(scene: &Scene, records: &[TypedRecord]) -> Result<Option<Self>, ExtractError> {
        let Some(node) = records
            .iter()
            .filter_map(TypedRecord::as_node_creation)
            .find(|node| node.name() == SCRIPT_NODE)
        else {
            return Ok(None);
        };

        let detail = scene.read_detail(node.line())?;
        Ok(Self::parse(&detail))
    }

    fn parse(detail: &str) -> Option<Self> {
        let Some(script) = SCRIPT.captures(detail).and_then(|captures| captures.get(1)) else {
            tracing::warn!(node = SCRIPT_NODE, "scene configuration has no .b script");
            return None;
        };
        let script = script.as_str();

        let Some(captures) = PLAYBACK_OPTIONS.captures(script) else {
            tracing::debug!(script, "no playback options in scene configuration");
            return None;
        };
        let (_, [min, max, start, end]) = captures.extract();

        let number = |attribute: &'static str, value: &str| {
            value
                .parse::<f64>()
                .inspect_err(|_| tracing::warn!(node = SCRIPT_NODE, attribute, value, "malformed playback value"))
                .ok()
        };

        Some(Self {
            min: number("-min", min)?,
            max: number("-max", max)?,
            start: number("-ast", start)?,
            end: number("-aet", end)?,
        })
    }
}
