use crate::{Color, Modifier, Rect, Transform};

pub type ViewId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Box,
    Row,
    Column,
    /// Children share one cell and overlap, later ones on top.
    Stack,
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            modifier: Modifier::default(),
            children: vec![],
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    /// Rewrites the current modifier in place; keeps whatever the caller already set.
    pub fn map_modifier(mut self, f: impl FnOnce(Modifier) -> Modifier) -> Self {
        self.modifier = f(std::mem::take(&mut self.modifier));
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn tag(&self) -> Option<&str> {
        self.modifier.tag.as_deref()
    }
}

/// Renderable scene
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect { rect: Rect, color: Color },
    PushTransform { transform: Transform },
    PopTransform,
}

/// Screen-space placement of one laid-out view, transforms applied.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRect {
    pub id: ViewId,
    pub tag: Option<String>,
    pub rect: Rect,
}
