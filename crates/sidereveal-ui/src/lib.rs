#![allow(non_snake_case)]
//! Widgets, layout and the side reveal component.
//!
//! ```rust
//! use sidereveal_core::*;
//! use sidereveal_ui::*;
//!
//! let reveal = SideReveal::new(
//!     Box(Modifier::new().size(300.0, 400.0)),
//!     Box(Modifier::new().fill_max_size()),
//!     SideRevealConfig::default().with_direction(RevealDirection::Trailing),
//!     Just(false),
//! );
//! assert!(!reveal.is_revealed());
//! ```

pub mod layout;
pub mod reveal_state;
pub mod side_reveal;
pub mod size_probe;

pub use layout::{LayoutError, layout_and_paint};
pub use reveal_state::RevealState;
pub use side_reveal::{
    Edge, Invalidation, RevealDirection, SideReveal, SideRevealConfig, closed_offset,
    reveal_offset,
};
pub use size_probe::SizeProbe;

use sidereveal_core::*;

pub fn Box(modifier: Modifier) -> View {
    View::new(0, ViewKind::Box).modifier(modifier)
}

pub fn Row(modifier: Modifier) -> View {
    View::new(0, ViewKind::Row).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Column).modifier(modifier)
}

pub fn Stack(modifier: Modifier) -> View {
    View::new(0, ViewKind::Stack).modifier(modifier)
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(self, children: impl IntoChildren) -> Self {
        self.with_children(children.into_children())
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
