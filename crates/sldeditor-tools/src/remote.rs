//! GeoServer entities and the style query/update boundary.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};

/// Identifies one remote GeoServer instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteConnection {
    pub connection_name: String,
    pub url: String,
}

impl RemoteConnection {
    pub fn new(connection_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            connection_name: connection_name.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for RemoteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.connection_name, self.url)
    }
}

/// A named style, qualified by the workspace holding it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleReference {
    pub workspace: String,
    pub style: String,
}

impl StyleReference {
    pub fn new(workspace: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            style: style.into(),
        }
    }
}

impl fmt::Display for StyleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.workspace.is_empty() {
            write!(f, "{}", self.style)
        } else {
            write!(f, "{}:{}", self.workspace, self.style)
        }
    }
}

/// A published layer bound to exactly one connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLayer {
    pub workspace: String,
    pub layer_name: String,
    pub style: Option<StyleReference>,
    pub connection: RemoteConnection,
}

impl RemoteLayer {
    pub fn new(
        workspace: impl Into<String>,
        layer_name: impl Into<String>,
        connection: RemoteConnection,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            layer_name: layer_name.into(),
            style: None,
            connection,
        }
    }

    pub fn with_style(mut self, style: StyleReference) -> Self {
        self.style = Some(style);
        self
    }
}

/// A request to point `layer` at `style`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStyleAssignment {
    pub layer: RemoteLayer,
    pub style: StyleReference,
}

/// Style group name (usually the workspace) to the styles it offers.
pub type StyleMap = BTreeMap<String, Vec<StyleReference>>;

/// Remote collaborator that lists styles and applies layer style changes.
///
/// Transport, retries and error reporting belong to the implementation.
#[async_trait::async_trait]
pub trait LayerStyleService: Send + Sync {
    async fn style_map(&self, connection: &RemoteConnection) -> ToolResult<StyleMap>;

    async fn update_layer_style(&self, assignments: Vec<LayerStyleAssignment>) -> ToolResult<()>;
}

/// In-memory service keeping styles per connection and recording commits.
#[derive(Debug, Default)]
pub struct MemoryLayerStyleService {
    styles: Mutex<HashMap<RemoteConnection, StyleMap>>,
    committed: Mutex<Vec<Vec<LayerStyleAssignment>>>,
}

impl MemoryLayerStyleService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_style(&self, connection: &RemoteConnection, style: StyleReference) {
        self.styles
            .lock()
            .entry(connection.clone())
            .or_default()
            .entry(style.workspace.clone())
            .or_default()
            .push(style);
    }

    /// Every batch passed to `update_layer_style`, oldest first.
    pub fn committed(&self) -> Vec<Vec<LayerStyleAssignment>> {
        self.committed.lock().clone()
    }

    pub fn commit_count(&self) -> usize {
        self.committed.lock().len()
    }
}

#[async_trait::async_trait]
impl LayerStyleService for MemoryLayerStyleService {
    async fn style_map(&self, connection: &RemoteConnection) -> ToolResult<StyleMap> {
        self.styles
            .lock()
            .get(connection)
            .cloned()
            .ok_or_else(|| ToolError::Service(format!("unknown connection: {connection}")))
    }

    async fn update_layer_style(&self, assignments: Vec<LayerStyleAssignment>) -> ToolResult<()> {
        self.committed.lock().push(assignments);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local() -> RemoteConnection {
        RemoteConnection::new("local", "http://localhost:8080/geoserver")
    }

    #[tokio::test]
    async fn style_map_groups_by_workspace() {
        let service = MemoryLayerStyleService::new();
        service.add_style(&local(), StyleReference::new("topp", "roads"));
        service.add_style(&local(), StyleReference::new("topp", "rivers"));
        service.add_style(&local(), StyleReference::new("", "point"));

        let map = service.style_map(&local()).await.expect("style map");
        assert_eq!(map.len(), 2);
        assert_eq!(map["topp"].len(), 2);
        assert_eq!(map[""][0].to_string(), "point");
        assert_eq!(map["topp"][1].to_string(), "topp:rivers");
    }

    #[tokio::test]
    async fn unknown_connection_is_service_error() {
        let service = MemoryLayerStyleService::new();
        let err = service.style_map(&local()).await.unwrap_err();
        assert!(matches!(err, ToolError::Service(ref msg) if msg.contains("local")));
    }

    #[tokio::test]
    async fn update_records_each_batch() {
        let service = MemoryLayerStyleService::new();
        let layer = RemoteLayer::new("topp", "states", local());
        let assignment = LayerStyleAssignment {
            layer,
            style: StyleReference::new("topp", "population"),
        };

        service
            .update_layer_style(vec![assignment.clone()])
            .await
            .expect("update");
        assert_eq!(service.commit_count(), 1);
        assert_eq!(service.committed()[0], vec![assignment]);
    }
}
