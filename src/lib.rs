//! Maya ASCII scene inspection
//!
//! A scene file is streamed once and split into records, one per top-level
//! MEL statement. Records are classified by command, sized, and the
//! `createNode` records are assembled into the scene's ownership hierarchy.

pub mod domain;
pub use domain::{BuildError, Config, Hierarchy, HierarchyNode, NodeId, TypedRecord};

pub mod extract;

pub mod observer;
pub use observer::{ChannelObserver, Notification, Observer};

pub mod storage;
pub use storage::{LoadError, OpenError, Scene, SourceFile};
