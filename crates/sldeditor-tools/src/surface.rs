//! Toolkit-neutral rendering surfaces for tool panels.
//!
//! A host UI maps each [`Surface`] onto its own widget and implements
//! [`SurfaceContainer`] for the area the tool panel lays them out in.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A button a tool exposes on its surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceAction {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
}

#[derive(Debug)]
pub struct Surface {
    id: Uuid,
    title: Option<String>,
    preferred_size: Size,
    actions: Vec<SurfaceAction>,
}

pub type SurfaceHandle = Arc<Surface>;

impl Surface {
    pub fn new(title: impl Into<String>, preferred_size: Size, actions: Vec<SurfaceAction>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: Some(title.into()),
            preferred_size,
            actions,
        }
    }

    /// An untitled, action-less surface that only reserves space.
    pub fn placeholder(preferred_size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: None,
            preferred_size,
            actions: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn preferred_size(&self) -> Size {
        self.preferred_size
    }

    pub fn actions(&self) -> &[SurfaceAction] {
        &self.actions
    }

    pub fn is_placeholder(&self) -> bool {
        self.title.is_none() && self.actions.is_empty()
    }
}

/// The area tool surfaces are attached to.
pub trait SurfaceContainer: Send {
    fn attach(&mut self, surface: SurfaceHandle);

    fn detach(&mut self, surface: &SurfaceHandle);

    /// Asks the host for a layout and repaint pass.
    fn request_layout(&mut self);
}

/// Container that keeps attached surfaces in order and counts layout requests.
#[derive(Debug, Default)]
pub struct PanelArea {
    surfaces: Vec<SurfaceHandle>,
    layout_requests: u64,
}

impl PanelArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surfaces(&self) -> &[SurfaceHandle] {
        &self.surfaces
    }

    pub fn layout_requests(&self) -> u64 {
        self.layout_requests
    }
}

impl SurfaceContainer for PanelArea {
    fn attach(&mut self, surface: SurfaceHandle) {
        self.surfaces.push(surface);
    }

    fn detach(&mut self, surface: &SurfaceHandle) {
        self.surfaces.retain(|attached| !Arc::ptr_eq(attached, surface));
    }

    fn request_layout(&mut self) {
        self.layout_requests += 1;
    }
}
