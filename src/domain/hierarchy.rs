//! The DAG ownership tree of a scene.
//!
//! `createNode` records declare their parent with `-p`, which may be a short
//! name (`"pCube1"`) or a `|`-delimited path (`"|group1|pCube1"`). The
//! [`Hierarchy`] is rebuilt from those declarations in a single pass: each
//! declared parent is resolved to the nearest preceding node whose name is a
//! suffix of the declared path.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`].

use std::{collections::HashMap, ops::Index, time::Instant};

use thiserror::Error;
use tracing::instrument;

use crate::{
    domain::record::{NodeCreation, TypedRecord},
    observer::{Observer, ProgressTracker},
};

/// The position of a node in its [`Hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// A node of the ownership tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    name: String,
    node_type: String,
    size: u64,
    line: Option<usize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    total_size: u64,
}

impl HierarchyNode {
    fn new(name: String, node_type: String, size: u64, line: Option<usize>) -> Self {
        Self {
            name,
            node_type,
            size,
            line,
            parent: None,
            children: Vec::new(),
            total_size: size,
        }
    }

    /// The node name. Empty for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node type, such as `transform`. Empty for the root.
    #[must_use]
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// The size in bytes of the node's own record.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// The line the node's record starts on. `None` for the root.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    /// The node's parent. `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The node's children, in declaration order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The node's own size plus the total size of all of its descendants.
    #[must_use]
    pub const fn total_size(&self) -> u64 {
        self.total_size
    }
}

/// A rooted ownership tree.
///
/// The root is invisible: it has no name, type or size, and owns every
/// top-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl Hierarchy {
    const ROOT: NodeId = NodeId(0);

    /// Creates a hierarchy containing only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![HierarchyNode::new(String::new(), String::new(), 0, None)],
        }
    }

    /// Builds the hierarchy of the node-creation records among `records`.
    ///
    /// Records of any other kind are ignored.
    ///
    /// # Errors
    ///
    /// See [`Hierarchy::build`].
    pub fn from_records(
        records: &[TypedRecord],
        observer: &mut dyn Observer,
    ) -> Result<Self, BuildError> {
        let nodes: Vec<&NodeCreation> = records
            .iter()
            .filter_map(TypedRecord::as_node_creation)
            .collect();
        Self::build(&nodes, observer)
    }

    /// Builds the hierarchy of `records`, which must be in file order.
    ///
    /// Every record becomes one node. A record without a declared parent is
    /// attached to the root. Otherwise it is attached to the nearest
    /// preceding record whose name is a suffix of the declared parent path.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ParentNotFound`] if a declared parent matches no
    /// preceding record, or [`BuildError::Cancelled`] if the observer
    /// requests cancellation. No partial tree is returned.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn build(
        records: &[&NodeCreation],
        observer: &mut dyn Observer,
    ) -> Result<Self, BuildError> {
        let start = Instant::now();
        observer.event_occurred("Building DAG Tree");

        let mut hierarchy = Self::new();
        hierarchy.nodes.reserve(records.len());

        // latest node declared under each name
        let mut latest: HashMap<&str, NodeId> = HashMap::with_capacity(records.len());
        let mut progress = ProgressTracker::default();
        let total = records.len() as u64;

        for (position, record) in records.iter().enumerate() {
            if observer.is_cancelled() {
                return Err(BuildError::Cancelled);
            }

            let parent = match record.parent() {
                "" => Self::ROOT,
                path => resolve_parent(&latest, path).ok_or_else(|| {
                    BuildError::ParentNotFound {
                        parent: path.to_string(),
                        line: record.line(),
                        position,
                    }
                })?,
            };

            let id = hierarchy.attach(
                parent,
                HierarchyNode::new(
                    record.name().to_string(),
                    record.node_type().to_string(),
                    record.size(),
                    Some(record.line()),
                ),
            );

            latest.insert(record.name(), id);

            progress.report(observer, position as u64 + 1, total, false);
        }

        let elapsed = start.elapsed().as_secs_f64();
        tracing::debug!(nodes = hierarchy.len(), elapsed, "built hierarchy");
        observer.event_occurred(&format!("Build Complete: {elapsed:.3}s"));

        Ok(hierarchy)
    }

    /// Appends `node` as the last child of `parent`, and adds its size to the
    /// total of every ancestor.
    fn attach(&mut self, parent: NodeId, mut node: HierarchyNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        let size = node.size;
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);

        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            let current = &mut self.nodes[current.0];
            current.total_size += size;
            ancestor = current.parent;
        }

        id
    }

    /// The invisible root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// The node with the given id, if it belongs to this hierarchy.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id.0)
    }

    /// The number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the hierarchy holds nothing but the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(HierarchyNode::parent)
    }

    /// The children of `id`, in declaration order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(id)
            .map(HierarchyNode::children)
            .unwrap_or_default()
            .iter()
            .copied()
    }

    /// The position of `id` among its parent's children. The root is at 0.
    #[must_use]
    pub fn row(&self, id: NodeId) -> usize {
        self.parent(id)
            .and_then(|parent| self[parent].children.iter().position(|&child| child == id))
            .unwrap_or(0)
    }

    /// The ancestors of `id`, nearest first, ending with the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&current| self.parent(current))
    }

    /// All descendants of `id` in pre-order (children before their own
    /// later siblings), excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut descendants = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();

        while let Some(current) = stack.pop() {
            descendants.push(current);
            stack.extend(self[current].children.iter().rev().copied());
        }

        descendants
    }

    /// Iterates over every node except the root, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &HierarchyNode)> + '_ {
        self.nodes.iter().enumerate().skip(1).map(|(i, node)| (NodeId(i), node))
    }
}

impl Index<NodeId> for Hierarchy {
    type Output = HierarchyNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

/// Finds the most recently declared node whose name is a suffix of `path`.
///
/// Every suffix of `path` is looked up, so this is equivalent to scanning
/// backwards through all preceding declarations and taking the first whose
/// name `path` ends with. The empty suffix is included: an unnamed node
/// matches any path.
fn resolve_parent(latest: &HashMap<&str, NodeId>, path: &str) -> Option<NodeId> {
    path.char_indices()
        .map(|(index, _)| index)
        .chain([path.len()])
        .filter_map(|index| latest.get(&path[index..]).copied())
        .max()
}

/// Errors that can occur when building a [`Hierarchy`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A declared parent matches no preceding node.
    #[error("parent {parent} not found (record {position}, line {line})")]
    ParentNotFound {
        /// The unresolved parent path.
        parent: String,
        /// The line the offending record starts on.
        line: usize,
        /// The position of the offending record among the node records.
        position: usize,
    },

    /// The observer cancelled the build.
    #[error("build cancelled")]
    Cancelled,
}
