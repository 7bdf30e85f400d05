//! Streaming segmentation of a scene file into records.
//!
//! Lines are classified by their first bytes:
//!
//! - a line of nothing but whitespace is blank and is skipped;
//! - a line starting with the comment marker is skipped;
//! - a line starting with a tab or space continues the current record;
//! - any other line starts a new record.
//!
//! Skipped lines contribute nothing to record sizes and never end a record.
//! A record is only emitted once the next record starts, or at end of file.

use std::io::{self, BufRead};

/// How a single physical line participates in segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Blank,
    Comment,
    Continuation,
    Start,
}

impl LineKind {
    pub(crate) fn of(line: &[u8], comment_marker: &[u8]) -> Self {
        if line.iter().all(u8::is_ascii_whitespace) {
            Self::Blank
        } else if !comment_marker.is_empty() && line.starts_with(comment_marker) {
            Self::Comment
        } else if matches!(line.first(), Some(b'\t' | b' ')) {
            Self::Continuation
        } else {
            Self::Start
        }
    }
}

/// A record as delimited by the [`Segmenter`], before it is attached to its
/// source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The 1-based line number of the first line.
    pub line: usize,
    /// The byte offset of the first line.
    pub offset: u64,
    /// The total size of the first line and its continuation lines.
    pub size: u64,
    /// The first statement, which may span several lines.
    pub description: String,
}

#[derive(Debug)]
struct Pending {
    segment: Segment,
    /// Whether the first statement is still being accumulated.
    open: bool,
}

impl Pending {
    fn start(line: usize, offset: u64, text: &[u8]) -> Self {
        let mut pending = Self {
            segment: Segment {
                line,
                offset,
                size: 0,
                description: String::new(),
            },
            open: true,
        };
        pending.push(text);
        pending
    }

    fn push(&mut self, text: &[u8]) {
        self.segment.size += text.len() as u64;
        if self.open {
            self.segment
                .description
                .push_str(&String::from_utf8_lossy(text));
            self.open = !text.trim_ascii_end().ends_with(b";");
        }
    }
}

/// Groups the lines of a reader into [`Segment`]s in a single forward pass.
///
/// Only the pending record's first statement is held in memory.
#[derive(Debug)]
pub struct Segmenter<R> {
    reader: R,
    comment_marker: Vec<u8>,
    buf: Vec<u8>,
    line: usize,
    offset: u64,
    skipped: u64,
    pending: Option<Pending>,
    finished: bool,
}

impl<R: BufRead> Segmenter<R> {
    /// Creates a segmenter reading from `reader`, treating lines that start
    /// with `comment_marker` as comments.
    #[must_use]
    pub fn new(reader: R, comment_marker: &str) -> Self {
        Self {
            reader,
            comment_marker: comment_marker.as_bytes().to_vec(),
            buf: Vec::new(),
            line: 0,
            offset: 0,
            skipped: 0,
            pending: None,
            finished: false,
        }
    }

    /// The number of bytes read so far that belong to no record: blank
    /// lines, comments, and indented lines before the first record.
    #[must_use]
    pub const fn skipped_bytes(&self) -> u64 {
        self.skipped
    }

    /// The number of physical lines read so far.
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.line
    }

    fn next_segment(&mut self) -> io::Result<Option<Segment>> {
        loop {
            self.buf.clear();
            let read = self.reader.read_until(b'\n', &mut self.buf)?;
            if read == 0 {
                return Ok(self.pending.take().map(|pending| pending.segment));
            }

            self.line += 1;
            let offset = self.offset;
            self.offset += read as u64;

            match LineKind::of(&self.buf, &self.comment_marker) {
                LineKind::Blank | LineKind::Comment => self.skipped += read as u64,
                LineKind::Continuation => match &mut self.pending {
                    Some(pending) => pending.push(&self.buf),
                    None => {
                        tracing::debug!(line = self.line, "continuation line before first record");
                        self.skipped += read as u64;
                    }
                },
                LineKind::Start => {
                    let started = Pending::start(self.line, offset, &self.buf);
                    if let Some(sealed) = self.pending.replace(started) {
                        return Ok(Some(sealed.segment));
                    }
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for Segmenter<R> {
    type Item = io::Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_segment() {
            Ok(Some(segment)) => Some(Ok(segment)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}
