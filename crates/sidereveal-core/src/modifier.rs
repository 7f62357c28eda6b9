use std::rc::Rc;

use taffy::{AlignItems, AlignSelf, JustifyContent};

use crate::{Color, Size, Transform};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaddingValues {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Called by layout with the node's computed size.
pub type SizeCallback = Rc<dyn Fn(Size)>;

#[derive(Clone, Default)]
pub struct Modifier {
    pub size: Option<Size>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill_max: bool,
    pub fill_max_w: bool,
    pub fill_max_h: bool,
    pub padding: Option<f32>,
    pub padding_values: Option<PaddingValues>,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    pub background: Option<Color>,
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub align_self: Option<AlignSelf>,
    pub justify_content: Option<JustifyContent>,
    pub align_items_container: Option<AlignItems>,
    /// Taken out of flow and placed by the `offset_*` insets.
    pub absolute: bool,
    pub offset_left: Option<f32>,
    pub offset_right: Option<f32>,
    pub offset_top: Option<f32>,
    pub offset_bottom: Option<f32>,
    /// Paint-only; layout ignores it.
    pub transform: Option<Transform>,
    pub on_size_changed: Option<SizeCallback>,
    pub tag: Option<String>,
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier")
            .field("size", &self.size)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fill_max", &self.fill_max)
            .field("fill_max_w", &self.fill_max_w)
            .field("fill_max_h", &self.fill_max_h)
            .field("padding", &self.padding)
            .field("padding_values", &self.padding_values)
            .field("min_width", &self.min_width)
            .field("min_height", &self.min_height)
            .field("max_width", &self.max_width)
            .field("max_height", &self.max_height)
            .field("background", &self.background)
            .field("flex_grow", &self.flex_grow)
            .field("flex_shrink", &self.flex_shrink)
            .field("align_self", &self.align_self)
            .field("justify_content", &self.justify_content)
            .field("align_items_container", &self.align_items_container)
            .field("absolute", &self.absolute)
            .field("offset_left", &self.offset_left)
            .field("offset_right", &self.offset_right)
            .field("offset_top", &self.offset_top)
            .field("offset_bottom", &self.offset_bottom)
            .field("transform", &self.transform)
            .field(
                "on_size_changed",
                &self.on_size_changed.as_ref().map(|_| "..."),
            )
            .field("tag", &self.tag)
            .finish()
    }
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Size {
            width: w,
            height: h,
        });
        self
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }
    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }
    pub fn fill_max_size(mut self) -> Self {
        self.fill_max = true;
        self
    }
    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_w = true;
        self
    }
    pub fn fill_max_height(mut self) -> Self {
        self.fill_max_h = true;
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(v);
        self
    }
    pub fn padding_values(mut self, padding: PaddingValues) -> Self {
        self.padding_values = Some(padding);
        self
    }
    pub fn min_width(mut self, w: f32) -> Self {
        self.min_width = Some(w);
        self
    }
    pub fn min_height(mut self, h: f32) -> Self {
        self.min_height = Some(h);
        self
    }
    pub fn max_width(mut self, w: f32) -> Self {
        self.max_width = Some(w);
        self
    }
    pub fn max_height(mut self, h: f32) -> Self {
        self.max_height = Some(h);
        self
    }
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
    pub fn flex_grow(mut self, v: f32) -> Self {
        self.flex_grow = Some(v);
        self
    }
    pub fn flex_shrink(mut self, v: f32) -> Self {
        self.flex_shrink = Some(v);
        self
    }
    pub fn align_self(mut self, a: AlignSelf) -> Self {
        self.align_self = Some(a);
        self
    }
    pub fn justify_content(mut self, j: JustifyContent) -> Self {
        self.justify_content = Some(j);
        self
    }
    pub fn align_items(mut self, a: AlignItems) -> Self {
        self.align_items_container = Some(a);
        self
    }
    pub fn absolute(mut self) -> Self {
        self.absolute = true;
        self
    }
    pub fn offset_left(mut self, v: f32) -> Self {
        self.offset_left = Some(v);
        self
    }
    pub fn offset_right(mut self, v: f32) -> Self {
        self.offset_right = Some(v);
        self
    }
    pub fn offset_top(mut self, v: f32) -> Self {
        self.offset_top = Some(v);
        self
    }
    pub fn offset_bottom(mut self, v: f32) -> Self {
        self.offset_bottom = Some(v);
        self
    }
    pub fn transform(mut self, t: Transform) -> Self {
        self.transform = Some(t);
        self
    }
    pub fn translate(mut self, x: f32, y: f32) -> Self {
        let t = self.transform.unwrap_or_else(Transform::identity);
        self.transform = Some(t.combine(&Transform::translate(x, y)));
        self
    }
    /// Chains with a previously installed size callback rather than replacing it.
    pub fn on_size_changed(mut self, f: impl Fn(Size) + 'static) -> Self {
        self.on_size_changed = Some(match self.on_size_changed.take() {
            Some(prev) => Rc::new(move |s| {
                prev(s);
                f(s)
            }),
            None => Rc::new(f),
        });
        self
    }
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}
