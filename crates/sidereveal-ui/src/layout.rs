//! Taffy-backed layout and paint.
//!
//! Every `View` becomes one taffy node. Modifiers map onto taffy styles and
//! `translate` is paint-only. Once the tree is painted, each node that asked
//! for it (`Modifier::on_size_changed`) is told its computed size.

use std::collections::HashMap;

use sidereveal_core::*;
use taffy::prelude::{
    AvailableSpace, Display, FlexDirection, Line, NodeId, Position, Style, TaffyTree, auto,
    length, line, percent, span,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout engine: {0}")]
    Taffy(#[from] taffy::TaffyError),
}

fn style_from_modifier(m: &Modifier, kind: ViewKind, parent: Option<ViewKind>) -> Style {
    let mut s = Style {
        display: match kind {
            ViewKind::Stack => Display::Grid,
            _ => Display::Flex,
        },
        ..Style::default()
    };

    if matches!(kind, ViewKind::Row) {
        s.flex_direction = if text_direction() == TextDirection::Rtl {
            FlexDirection::RowReverse
        } else {
            FlexDirection::Row
        };
    }
    if matches!(kind, ViewKind::Column | ViewKind::Box) {
        s.flex_direction = FlexDirection::Column;
    }

    s.align_items = Some(match kind {
        ViewKind::Box => AlignItems::FlexStart,
        _ => AlignItems::Stretch,
    });
    s.justify_content = Some(JustifyContent::FlexStart);
    if let Some(j) = m.justify_content {
        s.justify_content = Some(j);
    }
    if let Some(a) = m.align_items_container {
        s.align_items = Some(a);
    }

    if let Some(g) = m.flex_grow {
        s.flex_grow = g;
    }
    if let Some(sh) = m.flex_shrink {
        s.flex_shrink = sh;
    }
    if let Some(a) = m.align_self {
        s.align_self = Some(a);
    }

    if m.absolute {
        s.position = Position::Absolute;
        s.inset = taffy::geometry::Rect {
            left: m.offset_left.map(|v| length(v)).unwrap_or_else(auto),
            right: m.offset_right.map(|v| length(v)).unwrap_or_else(auto),
            top: m.offset_top.map(|v| length(v)).unwrap_or_else(auto),
            bottom: m.offset_bottom.map(|v| length(v)).unwrap_or_else(auto),
        };
    }

    if let Some(pv) = m.padding_values {
        s.padding = taffy::geometry::Rect {
            left: length(pv.left),
            right: length(pv.right),
            top: length(pv.top),
            bottom: length(pv.bottom),
        };
    } else if let Some(p) = m.padding {
        s.padding = taffy::geometry::Rect {
            left: length(p),
            right: length(p),
            top: length(p),
            bottom: length(p),
        };
    }

    // explicit size wins over fill
    let mut width_set = false;
    let mut height_set = false;
    if let Some(sz) = m.size {
        if sz.width.is_finite() {
            s.size.width = length(sz.width.max(0.0));
            width_set = true;
        }
        if sz.height.is_finite() {
            s.size.height = length(sz.height.max(0.0));
            height_set = true;
        }
    }
    if let Some(w) = m.width {
        s.size.width = length(w.max(0.0));
        width_set = true;
    }
    if let Some(h) = m.height {
        s.size.height = length(h.max(0.0));
        height_set = true;
    }

    let want_fill_w = m.fill_max || m.fill_max_w;
    let want_fill_h = m.fill_max || m.fill_max_h;

    // Main axis fill -> weight (flex: 1 1 0%), cross axis fill -> tight (min == max == 100%).
    // Absolute nodes and stack cells have no main axis: both axes go tight.
    let tight_only = s.position == Position::Absolute || parent == Some(ViewKind::Stack);
    let main_is_row = parent == Some(ViewKind::Row);
    let grow = |s: &mut Style| {
        s.flex_grow = s.flex_grow.max(1.0);
        s.flex_shrink = s.flex_shrink.max(1.0);
        s.flex_basis = length(0.0);
    };
    if want_fill_w && !width_set {
        if main_is_row && !tight_only {
            grow(&mut s);
            s.min_size.width = length(0.0);
        } else {
            s.min_size.width = percent(1.0);
            s.max_size.width = percent(1.0);
            if tight_only {
                s.size.width = percent(1.0);
            }
        }
    }
    if want_fill_h && !height_set {
        if !main_is_row && !tight_only {
            grow(&mut s);
            s.min_size.height = length(0.0);
        } else {
            s.min_size.height = percent(1.0);
            s.max_size.height = percent(1.0);
            if tight_only {
                s.size.height = percent(1.0);
            }
        }
    }

    if let Some(v) = m.min_width {
        s.min_size.width = length(v.max(0.0));
    }
    if let Some(v) = m.min_height {
        s.min_size.height = length(v.max(0.0));
    }
    if let Some(v) = m.max_width {
        s.max_size.width = length(v.max(0.0));
    }
    if let Some(v) = m.max_height {
        s.max_size.height = length(v.max(0.0));
    }

    s
}

fn build_node(
    v: &View,
    parent: Option<ViewKind>,
    t: &mut TaffyTree<()>,
    out: &mut HashMap<ViewId, NodeId>,
) -> Result<NodeId, LayoutError> {
    let mut style = style_from_modifier(&v.modifier, v.kind, parent);

    // stack children overlap in the single grid cell
    if parent == Some(ViewKind::Stack) {
        style.grid_row = Line {
            start: line(1),
            end: span(1),
        };
        style.grid_column = Line {
            start: line(1),
            end: span(1),
        };
    }

    let children = v
        .children
        .iter()
        .map(|c| build_node(c, Some(v.kind), t, out))
        .collect::<Result<Vec<_>, _>>()?;

    let node = if children.is_empty() {
        t.new_leaf(style)?
    } else {
        t.new_with_children(style, &children)?
    };
    out.insert(v.id, node);
    Ok(node)
}

fn stamp(mut v: View, id: &mut u64) -> View {
    v.id = *id;
    *id += 1;
    v.children = v.children.into_iter().map(|c| stamp(c, id)).collect();
    v
}

struct Painter<'a> {
    taffy: &'a TaffyTree<()>,
    nodes: &'a HashMap<ViewId, NodeId>,
    scene: Scene,
    rects: Vec<NodeRect>,
    size_reports: Vec<(SizeCallback, Size)>,
}

impl Painter<'_> {
    /// `origin` is in layout space; `shift` is the sum of the translations
    /// pushed so far. Scene rects stay in layout space inside their
    /// Push/PopTransform pair, `NodeRect`s get the shift applied.
    fn paint(&mut self, v: &View, origin: Vec2, shift: Transform) -> Result<(), LayoutError> {
        let Some(&node) = self.nodes.get(&v.id) else {
            return Ok(());
        };
        let (location, computed) = {
            let l = self.taffy.layout(node)?;
            (l.location, l.size)
        };
        let rect = Rect {
            x: origin.x + location.x,
            y: origin.y + location.y,
            w: computed.width,
            h: computed.height,
        };

        if let Some(cb) = &v.modifier.on_size_changed {
            self.size_reports
                .push((cb.clone(), Size::new(computed.width, computed.height)));
        }

        // translation is paint-only: it moves this node and its subtree
        let transform = v.modifier.transform;
        let shift = match transform {
            Some(tf) => {
                self.scene
                    .nodes
                    .push(SceneNode::PushTransform { transform: tf });
                shift.combine(&tf)
            }
            None => shift,
        };

        if let Some(color) = v.modifier.background
            && !color.is_transparent()
        {
            self.scene.nodes.push(SceneNode::Rect { rect, color });
        }
        self.rects.push(NodeRect {
            id: v.id,
            tag: v.modifier.tag.clone(),
            rect: shift.apply_to_rect(rect),
        });

        let child_origin = Vec2 {
            x: rect.x,
            y: rect.y,
        };
        for c in &v.children {
            self.paint(c, child_origin, shift)?;
        }

        if transform.is_some() {
            self.scene.nodes.push(SceneNode::PopTransform);
        }
        Ok(())
    }
}

/// Lay `root` out in a `size` window, paint it, and fire size callbacks.
///
/// Size callbacks run after painting, so anything they invalidate shows up in
/// the next frame.
pub fn layout_and_paint(
    root: &View,
    size: (u32, u32),
) -> Result<(Scene, Vec<NodeRect>), LayoutError> {
    let mut id = 1u64;
    let root = stamp(root.clone(), &mut id);

    let mut taffy: TaffyTree<()> = TaffyTree::new();
    let mut nodes = HashMap::new();
    let root_node = build_node(&root, Some(ViewKind::Column), &mut taffy, &mut nodes)?;

    let (w, h) = (size.0 as f32, size.1 as f32);
    // the window: a fixed-size column hosting the root
    let window = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            align_items: Some(AlignItems::FlexStart),
            size: taffy::geometry::Size {
                width: length(w),
                height: length(h),
            },
            ..Style::default()
        },
        &[root_node],
    )?;
    taffy.compute_layout(
        window,
        taffy::geometry::Size {
            width: AvailableSpace::Definite(w),
            height: AvailableSpace::Definite(h),
        },
    )?;

    let mut painter = Painter {
        taffy: &taffy,
        nodes: &nodes,
        scene: Scene::default(),
        rects: Vec::with_capacity(nodes.len()),
        size_reports: Vec::new(),
    };
    painter.paint(&root, Vec2::default(), Transform::identity())?;

    let Painter {
        scene,
        rects,
        size_reports,
        ..
    } = painter;
    for (cb, s) in size_reports {
        cb(s);
    }

    Ok((scene, rects))
}
