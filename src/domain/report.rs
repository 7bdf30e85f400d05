use std::fmt;

use crate::domain::TypedRecord;

/// One line of the usage diagnosis: a record that takes up a noticeable
/// share of its file.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageEntry<'a> {
    /// The line the record starts on.
    pub line: usize,
    /// The size of the record in bytes.
    pub size: u64,
    /// The record's share of the file, in percent.
    pub percent: f64,
    /// The record's first statement.
    pub description: &'a str,
}

impl fmt::Display for UsageEntry<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let megabytes = self.size as f64 / 1024.0 / 1024.0;
        write!(
            f,
            "[line: {}][{megabytes:.3} mb][{}%] {}",
            self.line,
            self.percent,
            self.description.trim_end()
        )
    }
}

/// Lists the records whose share of the file is at least `min_percent`,
/// largest first.
#[must_use]
pub fn diagnose(records: &[TypedRecord], min_percent: f64) -> Vec<UsageEntry<'_>> {
    let mut entries: Vec<_> = records
        .iter()
        .map(|record| UsageEntry {
            line: record.line(),
            size: record.size(),
            percent: record.percent(),
            description: record.description(),
        })
        .filter(|entry| entry.percent >= min_percent)
        .collect();

    entries.sort_by(|a, b| b.size.cmp(&a.size));
    entries
}
