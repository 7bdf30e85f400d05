//! Records: the top-level declarations of a scene file.
//!
//! A scene file is a sequence of MEL statements. Each statement starting at
//! column 0, together with the indented statements following it, forms one
//! record:
//!
//! ```text
//! createNode transform -s -n "persp";
//!     rename -uid "BE01090D-497F-9171-93CC-2491F449EA81";
//!     setAttr ".v" no;
//! ```
//!
//! A [`RawRecord`] knows where the record is and how big it is. A
//! [`TypedRecord`] additionally carries the tokenized first statement and is
//! classified by its command into one of a handful of variants, each with
//! accessors for the arguments that matter for that command.

use std::{ops::Deref, sync::Arc};

use crate::{domain::tokenizer::tokenize_command, storage::SourceFile};

/// One segmented record, prior to classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub(crate) source: Arc<SourceFile>,
    pub(crate) line: usize,
    pub(crate) offset: u64,
    pub(crate) size: u64,
    pub(crate) description: String,
}

impl RawRecord {
    /// The file this record was read from.
    #[must_use]
    pub fn file(&self) -> &SourceFile {
        &self.source
    }

    /// The 1-based line number of the record's first line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// The byte offset of the record's first line within the file.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// The size in bytes of the record, including all of its continuation
    /// lines and line terminators.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// The record's first statement.
    ///
    /// This is the first line, plus any continuation lines up to the one that
    /// terminates the statement. The rest of the record is not retained; use
    /// the detail reader to recover it.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The record's size as a percentage of the whole file, rounded to three
    /// decimal places.
    #[must_use]
    pub fn percent(&self) -> f64 {
        crate::domain::distribution::percent_of(self.size, self.source.size())
    }
}

/// A record with its first statement tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    raw: RawRecord,
    command: String,
    args: Vec<String>,
}

impl Record {
    /// Tokenizes the first statement of `raw`.
    #[must_use]
    pub fn new(raw: RawRecord) -> Self {
        let (command, args) = tokenize_command(&raw.description);
        Self { raw, command, args }
    }

    /// The leading keyword of the first statement, such as `createNode`.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The arguments of the first statement, in order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The underlying raw record.
    #[must_use]
    pub const fn raw(&self) -> &RawRecord {
        &self.raw
    }

    /// Whether `flag` appears among the arguments.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| arg == flag)
    }

    /// The argument following the first occurrence of `flag`.
    ///
    /// Returns an empty string if the flag is absent or is the last argument.
    #[must_use]
    pub fn flag_value(&self, flag: &str) -> &str {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|index| self.args.get(index + 1))
            .map_or("", String::as_str)
    }

    /// The arguments following every occurrence of `flag`, in order.
    #[must_use]
    pub fn flag_values(&self, flag: &str) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|pair| pair[0] == flag)
            .map(|pair| pair[1].as_str())
            .collect()
    }

    /// The argument at `index`, or an empty string.
    #[must_use]
    pub fn arg(&self, index: usize) -> &str {
        self.args.get(index).map_or("", String::as_str)
    }

    /// The argument `index` places from the end (0 is the last), or an empty
    /// string.
    #[must_use]
    pub fn arg_from_end(&self, index: usize) -> &str {
        self.args
            .len()
            .checked_sub(index + 1)
            .map_or("", |position| self.arg(position))
    }
}

impl Deref for Record {
    type Target = RawRecord;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

macro_rules! record_variant {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(Record);

        impl Deref for $name {
            type Target = Record;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
    };
}

record_variant!(
    /// A `createNode` record.
    NodeCreation
);
record_variant!(
    /// A `connectAttr` record.
    Connection
);
record_variant!(
    /// A `file` record, which imports or references another scene.
    FileReference
);
record_variant!(
    /// A `fileInfo` record.
    Metadata
);
record_variant!(
    /// A `requires` record, declaring a plugin or product dependency.
    Requirement
);

impl NodeCreation {
    /// The type of node created, such as `transform` or `mesh`.
    #[must_use]
    pub fn node_type(&self) -> &str {
        self.arg(0)
    }

    /// The node's name (`-n`), or an empty string.
    #[must_use]
    pub fn name(&self) -> &str {
        self.flag_value("-n")
    }

    /// The declared parent path (`-p`), or an empty string for a top-level
    /// node.
    ///
    /// This may be a short name or a `|`-delimited path.
    #[must_use]
    pub fn parent(&self) -> &str {
        self.flag_value("-p")
    }

    /// Whether the node is shared (`-s`).
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.has_flag("-s")
    }

    /// Whether the node skips selection (`-ss`).
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.has_flag("-ss")
    }
}

impl Connection {
    /// The source attribute.
    #[must_use]
    pub fn source(&self) -> &str {
        self.arg(0)
    }

    /// The destination attribute.
    #[must_use]
    pub fn destination(&self) -> &str {
        self.arg(1)
    }
}

impl FileReference {
    /// Whether the file is referenced (`-r`) rather than imported.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.has_flag("-r")
    }

    /// The namespace objects are grouped under (`-ns`).
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.flag_value("-ns")
    }

    /// The name of the reference node (`-rfn`).
    #[must_use]
    pub fn reference_node_name(&self) -> &str {
        self.flag_value("-rfn")
    }

    /// The type of the referenced file (`-typ`), such as `mayaAscii`.
    #[must_use]
    pub fn file_type(&self) -> &str {
        self.flag_value("-typ")
    }

    /// The path of the referenced file.
    #[must_use]
    pub fn path(&self) -> &str {
        self.arg_from_end(0)
    }
}

impl Requirement {
    /// The required product or plugin.
    #[must_use]
    pub fn product(&self) -> &str {
        self.arg_from_end(1)
    }

    /// The required version.
    #[must_use]
    pub fn version(&self) -> &str {
        self.arg_from_end(0)
    }

    /// Every data type declared with `-dataType`, in order.
    #[must_use]
    pub fn data_types(&self) -> Vec<&str> {
        self.flag_values("-dataType")
    }

    /// Every node type declared with `-nodeType`, in order.
    #[must_use]
    pub fn node_types(&self) -> Vec<&str> {
        self.flag_values("-nodeType")
    }
}

impl Metadata {
    /// The metadata key, such as `product`.
    #[must_use]
    pub fn keyword(&self) -> &str {
        self.arg(0)
    }

    /// The metadata value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.arg(1)
    }
}

/// A record classified by its command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedRecord {
    /// Any command without a dedicated variant.
    Generic(Record),
    /// `createNode`
    NodeCreation(NodeCreation),
    /// `connectAttr`
    Connection(Connection),
    /// `file`
    FileReference(FileReference),
    /// `fileInfo`
    Metadata(Metadata),
    /// `requires`
    Requirement(Requirement),
}

impl TypedRecord {
    /// Tokenizes and classifies a raw record.
    ///
    /// Classification never fails: an unknown or empty command yields
    /// [`TypedRecord::Generic`].
    #[must_use]
    pub fn classify(raw: RawRecord) -> Self {
        let record = Record::new(raw);
        let typed = match record.command() {
            "createNode" => Self::NodeCreation(NodeCreation(record)),
            "connectAttr" => Self::Connection(Connection(record)),
            "file" => Self::FileReference(FileReference(record)),
            "fileInfo" => Self::Metadata(Metadata(record)),
            "requires" => Self::Requirement(Requirement(record)),
            _ => Self::Generic(record),
        };
        tracing::trace!(line = typed.line(), command = typed.command(), "classified record");
        typed
    }

    /// The common record data, whatever the variant.
    #[must_use]
    pub const fn record(&self) -> &Record {
        match self {
            Self::Generic(record) => record,
            Self::NodeCreation(NodeCreation(record))
            | Self::Connection(Connection(record))
            | Self::FileReference(FileReference(record))
            | Self::Metadata(Metadata(record))
            | Self::Requirement(Requirement(record)) => record,
        }
    }

    /// The node-creation view of this record, if it is one.
    #[must_use]
    pub const fn as_node_creation(&self) -> Option<&NodeCreation> {
        match self {
            Self::NodeCreation(node) => Some(node),
            _ => None,
        }
    }

    /// The connection view of this record, if it is one.
    #[must_use]
    pub const fn as_connection(&self) -> Option<&Connection> {
        match self {
            Self::Connection(connection) => Some(connection),
            _ => None,
        }
    }

    /// The file-reference view of this record, if it is one.
    #[must_use]
    pub const fn as_file_reference(&self) -> Option<&FileReference> {
        match self {
            Self::FileReference(file) => Some(file),
            _ => None,
        }
    }

    /// The metadata view of this record, if it is one.
    #[must_use]
    pub const fn as_metadata(&self) -> Option<&Metadata> {
        match self {
            Self::Metadata(metadata) => Some(metadata),
            _ => None,
        }
    }

    /// The requirement view of this record, if it is one.
    #[must_use]
    pub const fn as_requirement(&self) -> Option<&Requirement> {
        match self {
            Self::Requirement(requirement) => Some(requirement),
            _ => None,
        }
    }
}

impl Deref for TypedRecord {
    type Target = Record;

    fn deref(&self) -> &Self::Target {
        self.record()
    }
}

impl From<RawRecord> for TypedRecord {
    fn from(raw: RawRecord) -> Self {
        Self::classify(raw)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use super::{RawRecord, TypedRecord};
    use crate::storage::SourceFile;

    /// Builds a classified record without touching the filesystem.
    ///
    /// The record's size is the byte length of `description`, and the
    /// notional source file is `file_size` bytes long.
    pub(crate) fn record(line: usize, description: &str, file_size: u64) -> TypedRecord {
        let source = Arc::new(SourceFile::detached("/scene.ma", file_size, 0));
        TypedRecord::classify(RawRecord {
            source,
            line,
            offset: 0,
            size: description.len() as u64,
            description: description.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::{fixtures::record, *};

    fn node(description: &str) -> NodeCreation {
        record(1, description, 1000)
            .as_node_creation()
            .cloned()
            .expect("not a node record")
    }

    #[test_case("createNode transform -n \"a\";", "createNode" ; "node creation")]
    #[test_case("connectAttr \"a.t\" \"b.t\";", "connectAttr" ; "connection")]
    #[test_case("file -r \"a.ma\";", "file" ; "file reference")]
    #[test_case("fileInfo \"a\" \"b\";", "fileInfo" ; "metadata")]
    #[test_case("requires maya \"2018\";", "requires" ; "requirement")]
    #[test_case("currentUnit -l centimeter;", "currentUnit" ; "generic")]
    fn keeps_command(description: &str, command: &str) {
        assert_eq!(record(1, description, 100).command(), command);
    }

    #[test]
    fn classifies_by_command() {
        assert!(matches!(
            record(1, "createNode mesh -n \"m\";", 100),
            TypedRecord::NodeCreation(_)
        ));
        assert!(matches!(
            record(1, "connectAttr \"a.o\" \"b.i\";", 100),
            TypedRecord::Connection(_)
        ));
        assert!(matches!(
            record(1, "file -rdi 1 \"a.ma\";", 100),
            TypedRecord::FileReference(_)
        ));
        assert!(matches!(
            record(1, "fileInfo \"a\" \"b\";", 100),
            TypedRecord::Metadata(_)
        ));
        assert!(matches!(
            record(1, "requires \"mtoa\" \"3.2\";", 100),
            TypedRecord::Requirement(_)
        ));
        assert!(matches!(
            record(1, "select -ne :time1;", 100),
            TypedRecord::Generic(_)
        ));
        assert!(matches!(record(1, "", 100), TypedRecord::Generic(_)));
    }

    #[test]
    fn node_creation_accessors() {
        let node = node("createNode transform -s -n \"persp\" -p \"|group1\";");
        assert_eq!(node.node_type(), "transform");
        assert_eq!(node.name(), "persp");
        assert_eq!(node.parent(), "|group1");
        assert!(node.is_shared());
        assert!(!node.is_skipped());
    }

    #[test]
    fn absent_flags_are_empty() {
        let node = node("createNode mesh;");
        assert_eq!(node.name(), "");
        assert_eq!(node.parent(), "");
        assert!(!node.is_shared());
    }

    #[test]
    fn flag_without_value_is_empty() {
        assert_eq!(node("createNode mesh -n;").name(), "");
    }

    #[test]
    fn first_flag_occurrence_wins() {
        assert_eq!(node("createNode mesh -n \"first\" -n \"second\";").name(), "first");
    }

    #[test]
    fn skip_select_flag() {
        assert!(node("createNode lightLinker -s -ss -n \"lightLinker1\";").is_skipped());
    }

    #[test]
    fn connection_accessors() {
        let record = record(1, "connectAttr \"pCube1.t\" \"pSphere1.t\" -na;", 100);
        let connection = record.as_connection().unwrap();
        assert_eq!(connection.source(), "pCube1.t");
        assert_eq!(connection.destination(), "pSphere1.t");
    }

    #[test]
    fn file_reference_accessors() {
        let record = record(
            1,
            "file -r -ns \"tracer\" -dr 1 -rfn \"tracerRN\" -op \"v=0;\" -typ \"mayaAscii\" \"C:/Users/tracer.ma\";",
            100,
        );
        let file = record.as_file_reference().unwrap();
        assert!(file.is_reference());
        assert_eq!(file.namespace(), "tracer");
        assert_eq!(file.reference_node_name(), "tracerRN");
        assert_eq!(file.file_type(), "mayaAscii");
        assert_eq!(file.path(), "C:/Users/tracer.ma");
    }

    #[test]
    fn requirement_accessors_preserve_flag_order() {
        let record = record(
            1,
            "requires -nodeType \"HIKSkeletonGeneratorNode\" -dataType \"HIKCharacter\" -dataType \"HIKCharacterState\"\n\t\t-dataType \"HIKEffectorState\" \"mayaHIK\" \"1.0_HIK_2016.5\";\n",
            100,
        );
        let requirement = record.as_requirement().unwrap();
        assert_eq!(requirement.product(), "mayaHIK");
        assert_eq!(requirement.version(), "1.0_HIK_2016.5");
        assert_eq!(
            requirement.data_types(),
            vec!["HIKCharacter", "HIKCharacterState", "HIKEffectorState"]
        );
        assert_eq!(requirement.node_types(), vec!["HIKSkeletonGeneratorNode"]);
    }

    #[test]
    fn short_requirement_degrades_to_empty() {
        let record = record(1, "requires;", 100);
        let requirement = record.as_requirement().unwrap();
        assert_eq!(requirement.product(), "");
        assert_eq!(requirement.version(), "");
        assert!(requirement.data_types().is_empty());
    }

    #[test]
    fn metadata_accessors() {
        let record = record(1, "fileInfo \"product\" \"Maya 2018\";", 100);
        let metadata = record.as_metadata().unwrap();
        assert_eq!(metadata.keyword(), "product");
        assert_eq!(metadata.value(), "Maya 2018");
    }

    #[test]
    fn percent_of_file() {
        // 24 bytes of a 1000 byte file
        let record = record(1, "createNode mesh -n \"m\";\n", 1000);
        assert_eq!(record.size(), 24);
        assert!((record.percent() - 2.4).abs() < 1e-9);
    }
}
