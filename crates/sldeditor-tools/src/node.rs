pub mod file;
pub mod geoserver;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use file::{FileNode, FolderNode};
pub use geoserver::{
    ConnectionNode, LayerHeadingNode, LayerNode, StyleHeadingNode, StyleNode, WorkspaceNode,
};

/// Kind of a selectable navigation tree node. Tools are registered per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Folder,
    File,
    GeoServerConnection,
    GeoServerLayerHeading,
    GeoServerStyleHeading,
    GeoServerWorkspace,
    GeoServerLayer,
    GeoServerStyle,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Folder => "folder",
            NodeType::File => "file",
            NodeType::GeoServerConnection => "geoserver-connection",
            NodeType::GeoServerLayerHeading => "geoserver-layer-heading",
            NodeType::GeoServerStyleHeading => "geoserver-style-heading",
            NodeType::GeoServerWorkspace => "geoserver-workspace",
            NodeType::GeoServerLayer => "geoserver-layer",
            NodeType::GeoServerStyle => "geoserver-style",
        };
        f.write_str(name)
    }
}

/// A node of the navigation tree that can take part in a selection.
///
/// The tree owns its nodes. Tools only read them while a selection is
/// being dispatched.
pub trait SelectionNode: Send + Sync + fmt::Debug {
    /// Stable for the lifetime of the node.
    fn node_type(&self) -> NodeType;

    fn label(&self) -> &str;

    fn children(&self) -> &[NodeRef] {
        &[]
    }

    /// Returns self as Any for downcasting to concrete node types.
    fn as_any(&self) -> &dyn Any;
}

pub type NodeRef = Arc<dyn SelectionNode>;

/// Downcasts a node to its concrete type.
pub fn downcast<T: 'static>(node: &NodeRef) -> Option<&T> {
    node.as_any().downcast_ref::<T>()
}
