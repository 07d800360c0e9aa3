//! Nodes of the GeoServer branch of the navigation tree.
//!
//! Layout: connection → layer heading → workspaces → layers. Style
//! headings hold workspaces flagged as style workspaces.

use std::any::Any;

use super::{NodeRef, NodeType, SelectionNode};
use crate::remote::{RemoteConnection, RemoteLayer, StyleReference};

/// Root of one GeoServer instance in the tree.
#[derive(Debug)]
pub struct ConnectionNode {
    connection: RemoteConnection,
    children: Vec<NodeRef>,
}

impl ConnectionNode {
    pub fn new(connection: RemoteConnection, children: Vec<NodeRef>) -> Self {
        Self {
            connection,
            children,
        }
    }

    pub fn connection(&self) -> &RemoteConnection {
        &self.connection
    }
}

impl SelectionNode for ConnectionNode {
    fn node_type(&self) -> NodeType {
        NodeType::GeoServerConnection
    }

    fn label(&self) -> &str {
        &self.connection.connection_name
    }

    fn children(&self) -> &[NodeRef] {
        &self.children
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct LayerNode {
    label: String,
    layer: RemoteLayer,
}

impl LayerNode {
    pub fn new(layer: RemoteLayer) -> Self {
        Self {
            label: layer.layer_name.clone(),
            layer,
        }
    }

    pub fn layer(&self) -> &RemoteLayer {
        &self.layer
    }
}

impl SelectionNode for LayerNode {
    fn node_type(&self) -> NodeType {
        NodeType::GeoServerLayer
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct WorkspaceNode {
    name: String,
    connection: RemoteConnection,
    is_style: bool,
    children: Vec<NodeRef>,
}

impl WorkspaceNode {
    pub fn new(
        name: impl Into<String>,
        connection: RemoteConnection,
        is_style: bool,
        children: Vec<NodeRef>,
    ) -> Self {
        Self {
            name: name.into(),
            connection,
            is_style,
            children,
        }
    }

    pub fn connection(&self) -> &RemoteConnection {
        &self.connection
    }

    /// True when the workspace groups styles rather than layers.
    pub fn is_style(&self) -> bool {
        self.is_style
    }
}

impl SelectionNode for WorkspaceNode {
    fn node_type(&self) -> NodeType {
        NodeType::GeoServerWorkspace
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[NodeRef] {
        &self.children
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Groups the layer workspaces of one connection.
#[derive(Debug)]
pub struct LayerHeadingNode {
    connection: RemoteConnection,
    children: Vec<NodeRef>,
}

impl LayerHeadingNode {
    pub fn new(connection: RemoteConnection, children: Vec<NodeRef>) -> Self {
        Self {
            connection,
            children,
        }
    }

    pub fn connection(&self) -> &RemoteConnection {
        &self.connection
    }
}

impl SelectionNode for LayerHeadingNode {
    fn node_type(&self) -> NodeType {
        NodeType::GeoServerLayerHeading
    }

    fn label(&self) -> &str {
        "Layers"
    }

    fn children(&self) -> &[NodeRef] {
        &self.children
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Groups the style workspaces of one connection.
#[derive(Debug)]
pub struct StyleHeadingNode {
    connection: RemoteConnection,
    children: Vec<NodeRef>,
}

impl StyleHeadingNode {
    pub fn new(connection: RemoteConnection, children: Vec<NodeRef>) -> Self {
        Self {
            connection,
            children,
        }
    }

    pub fn connection(&self) -> &RemoteConnection {
        &self.connection
    }
}

impl SelectionNode for StyleHeadingNode {
    fn node_type(&self) -> NodeType {
        NodeType::GeoServerStyleHeading
    }

    fn label(&self) -> &str {
        "Styles"
    }

    fn children(&self) -> &[NodeRef] {
        &self.children
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct StyleNode {
    style: StyleReference,
}

impl StyleNode {
    pub fn new(style: StyleReference) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &StyleReference {
        &self.style
    }
}

impl SelectionNode for StyleNode {
    fn node_type(&self) -> NodeType {
        NodeType::GeoServerStyle
    }

    fn label(&self) -> &str {
        &self.style.style
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
