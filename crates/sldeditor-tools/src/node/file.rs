use std::any::Any;
use std::path::{Path, PathBuf};

use super::{NodeRef, NodeType, SelectionNode};

#[derive(Debug)]
pub struct FolderNode {
    name: String,
    path: PathBuf,
    children: Vec<NodeRef>,
}

impl FolderNode {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, children: Vec<NodeRef>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectionNode for FolderNode {
    fn node_type(&self) -> NodeType {
        NodeType::Folder
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

/// A style document on disk.
#[derive(Debug)]
pub struct FileNode {
    name: String,
    path: PathBuf,
}

impl FileNode {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectionNode for FileNode {
    fn node_type(&self) -> NodeType {
        NodeType::File
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
