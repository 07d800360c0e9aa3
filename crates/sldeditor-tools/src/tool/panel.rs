//! The dispatch panel: rebuilds the visible tool set on every selection change.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

use super::registry::ToolRegistry;
use super::Tool;
use crate::config::PanelPreferences;
use crate::data::StyleData;
use crate::node::{NodeRef, NodeType};
use crate::selection::{Selection, SelectionSource};
use crate::surface::{PanelArea, Surface, SurfaceContainer, SurfaceHandle};


/// Result of one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Tools displayed and notified, in display order.
    pub active_tools: Vec<String>,
    /// Tools whose `set_selected_items` panicked and were taken down again.
    pub faulted: Vec<String>,
    pub placeholder: bool,
}

struct PanelState<C> {
    container: C,
    displayed: Vec<SurfaceHandle>,
    active: Vec<Arc<dyn Tool>>,
    recursive: bool,
}

/// Shows the tools applicable to the current tree selection.
///
/// Every selection change discards the previous generation of surfaces and
/// builds the next one from scratch. Rebuilds are serialized; a tool must
/// not call back into the panel from `set_selected_items`.
pub struct ToolPanel<C: SurfaceContainer = PanelArea> {
    registry: ToolRegistry,
    selection_source: Arc<dyn SelectionSource>,
    preferences: PanelPreferences,
    state: Mutex<PanelState<C>>,
}

impl ToolPanel<PanelArea> {
    pub fn new(
        selection_source: Arc<dyn SelectionSource>,
        registry: ToolRegistry,
        preferences: PanelPreferences,
    ) -> Self {
        Self::with_container(selection_source, registry, preferences, PanelArea::new())
    }
}

impl<C: SurfaceContainer> ToolPanel<C> {
    pub fn with_container(
        selection_source: Arc<dyn SelectionSource>,
        registry: ToolRegistry,
        preferences: PanelPreferences,
        container: C,
    ) -> Self {
        let recursive = preferences.recursive_selection;
        if recursive {
            selection_source.set_recursive_flag(true);
        }
        Self {
            registry,
            selection_source,
            preferences,
            state: Mutex::new(PanelState {
                container,
                displayed: Vec::new(),
                active: Vec::new(),
                recursive,
            }),
        }
    }

    pub fn apply(&self, selection: &Selection) -> DispatchOutcome {
        self.set_selected_items(
            &selection.unique_node_types,
            Some(selection.nodes.as_slice()),
            &selection.data_items,
        )
    }

    /// Rebuilds the panel for a new selection.
    ///
    /// `None` and an empty node list both leave only the placeholder.
    pub fn set_selected_items(
        &self,
        unique_node_types: &[NodeType],
        nodes: Option<&[NodeRef]>,
        data_items: &[StyleData],
    ) -> DispatchOutcome {
        let mut state = self.state.lock();

        let nodes = nodes.unwrap_or(&[]);
        let consolidated = if nodes.is_empty() {
            Vec::new()
        } else {
            self.registry.consolidate(unique_node_types, nodes, data_items)
        };

        let PanelState {
            container,
            displayed,
            active,
            ..
        } = &mut *state;

        for surface in displayed.drain(..) {
            container.detach(&surface);
        }
        active.clear();

        let mut outcome = DispatchOutcome::default();
        for tool in consolidated {
            let surface = tool.panel();
            container.attach(surface.clone());
            displayed.push(surface.clone());

            let propagated = panic::catch_unwind(AssertUnwindSafe(|| {
                tool.set_selected_items(nodes, data_items)
            }));
            match propagated {
                Ok(()) => {
                    tracing::debug!("displaying tool: {}", tool.tool_name());
                    outcome.active_tools.push(tool.tool_name().to_string());
                    active.push(tool);
                }
                Err(_) => {
                    tracing::error!(
                        "tool {} panicked while receiving the selection; removed",
                        tool.tool_name()
                    );
                    container.detach(&surface);
                    displayed.retain(|shown| !Arc::ptr_eq(shown, &surface));
                    outcome.faulted.push(tool.tool_name().to_string());
                }
            }
        }

        if active.is_empty() {
            let placeholder: SurfaceHandle =
                Arc::new(Surface::placeholder(self.preferences.placeholder_size()));
            container.attach(placeholder.clone());
            displayed.push(placeholder);
            outcome.placeholder = true;
        }

        container.request_layout();
        outcome
    }

    /// Forwards the recursive-selection toggle to the selection source.
    pub fn set_recursive_flag(&self, recursive: bool) {
        self.state.lock().recursive = recursive;
        self.selection_source.set_recursive_flag(recursive);
    }

    pub fn is_recursive(&self) -> bool {
        self.state.lock().recursive
    }

    pub fn displayed_surfaces(&self) -> Vec<SurfaceHandle> {
        self.state.lock().displayed.clone()
    }

    pub fn active_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.state.lock().active.clone()
    }

    pub fn active_tool_names(&self) -> Vec<String> {
        self.state
            .lock()
            .active
            .iter()
            .map(|tool| tool.tool_name().to_string())
            .collect()
    }

    /// Gives read access to the container, e.g. for a host repaint.
    pub fn inspect_container<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.state.lock().container)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}
