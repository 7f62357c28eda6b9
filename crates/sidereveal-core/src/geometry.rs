#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Rendered extent of a subtree; `(0, 0)` until the first layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Negative or non-finite extents are clamped to zero.
    pub fn new(width: f32, height: f32) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: clamp(width),
            height: clamp(height),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// True when the two rects share any area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Paint-time offset. Layout never sees it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Transform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
        }
    }

    pub fn apply_to_rect(&self, r: Rect) -> Rect {
        Rect {
            x: r.x + self.translate_x,
            y: r.y + self.translate_y,
            ..r
        }
    }

    pub fn combine(&self, other: &Transform) -> Transform {
        Transform::translate(
            self.translate_x + other.translate_x,
            self.translate_y + other.translate_y,
        )
    }
}
