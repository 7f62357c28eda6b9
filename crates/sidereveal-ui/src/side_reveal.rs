//! # Side reveal
//!
//! Overlays a side panel on top of main content and slides it in and out
//! from the leading or trailing edge.
//!
//! The panel is anchored to the main content's edge and shifted horizontally
//! by its own measured width when hidden, so it lands exactly past that edge
//! whatever the main content's width:
//!
//! | revealed | edge  | offset   |
//! |----------|-------|----------|
//! | yes      | any   | `0`      |
//! | no       | left  | `-width` |
//! | no       | right | `+width` |
//!
//! `leading` is the left edge in left-to-right layouts and the right edge in
//! right-to-left ones (see [`with_text_direction`]).
//!
//! ```rust
//! use sidereveal_core::*;
//! use sidereveal_ui::*;
//!
//! let (tx, rx) = ui_channel::<bool>();
//! let reveal = SideReveal::new(
//!     Box(Modifier::new().width(120.0).fill_max_height()),
//!     Box(Modifier::new().fill_max_size()),
//!     SideRevealConfig::default(),
//!     rx,
//! );
//!
//! let mut sched = Scheduler::with_size((800, 600));
//! sched.frame(|_| reveal.compose(), layout_and_paint).unwrap();
//! assert_eq!(reveal.measured_width(), 120.0);
//! // hidden until the source says otherwise
//! assert_eq!(reveal.target_offset(), -120.0);
//!
//! tx.send(true).unwrap();
//! sched.frame(|_| reveal.compose(), layout_and_paint).unwrap();
//! assert!(reveal.is_revealed());
//! assert_eq!(reveal.target_offset(), 0.0);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use sidereveal_core::*;

use crate::{Column, RevealState, SizeProbe, ViewExt};

/// Tag on the positioning layer that carries the side content.
pub const OVERLAY_TAG: &str = "sidereveal.overlay";

/// The edge the side content slides from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealDirection {
    /// Left in left-to-right layouts.
    #[default]
    Leading,
    /// Right in left-to-right layouts.
    Trailing,
}

/// Physical screen edge, after text direction is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

impl RevealDirection {
    pub fn edge(self, dir: TextDirection) -> Edge {
        match (self, dir) {
            (RevealDirection::Leading, TextDirection::Ltr)
            | (RevealDirection::Trailing, TextDirection::Rtl) => Edge::Left,
            (RevealDirection::Leading, TextDirection::Rtl)
            | (RevealDirection::Trailing, TextDirection::Ltr) => Edge::Right,
        }
    }
}

impl fmt::Display for RevealDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RevealDirection::Leading => "leading",
            RevealDirection::Trailing => "trailing",
        })
    }
}

impl FromStr for RevealDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leading" => Ok(RevealDirection::Leading),
            "trailing" => Ok(RevealDirection::Trailing),
            other => Err(ConfigError::UnknownDirection(other.to_string())),
        }
    }
}

/// Fixed at construction; `SideReveal::reconfigure` swaps it wholesale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideRevealConfig {
    pub reveal_direction: RevealDirection,
    pub reveal_animation: AnimationSpec,
}

impl Default for SideRevealConfig {
    fn default() -> Self {
        Self {
            reveal_direction: RevealDirection::Leading,
            reveal_animation: AnimationSpec::smooth(),
        }
    }
}

impl SideRevealConfig {
    pub fn with_direction(mut self, direction: RevealDirection) -> Self {
        self.reveal_direction = direction;
        self
    }

    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.reveal_animation = animation;
        self
    }
}

/// Offset that puts content of `width` just past `edge`.
pub fn closed_offset(edge: Edge, width: f32) -> f32 {
    match edge {
        Edge::Left => -width,
        Edge::Right => width,
    }
}

pub fn reveal_offset(revealed: bool, edge: Edge, width: f32) -> f32 {
    if revealed {
        0.0
    } else {
        closed_offset(edge, width)
    }
}

bitflags! {
    /// Why the component wants another frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Invalidation: u8 {
        const REVEAL = 1;
        const SIZE = 1 << 1;
        const CONFIG = 1 << 2;
    }
}

type ContentBuilder = Rc<dyn Fn() -> View>;

pub struct SideReveal {
    side_content: ContentBuilder,
    main_content: ContentBuilder,
    config: Cell<SideRevealConfig>,
    reveal: Rc<RevealState>,
    probe: SizeProbe,
    offset: RefCell<AnimatedValue<f32>>,
    measured: Cell<bool>,
    last_edge: Cell<Option<Edge>>,
    invalid: Rc<Cell<Invalidation>>,
    scope: Scope,
}

impl SideReveal {
    /// Side and main content as built views; `source` drives the reveal state
    /// for as long as the component lives.
    pub fn new(
        side_content: View,
        main_content: View,
        config: SideRevealConfig,
        source: impl Publisher<bool>,
    ) -> Self {
        Self::build(
            Rc::new(move || side_content.clone()),
            Rc::new(move || main_content.clone()),
            config,
            RevealState::new(source),
        )
    }

    /// Content rebuilt on every frame and a fixed reveal state. Callers that
    /// own the flag rebuild the component when it changes.
    pub fn from_builders(
        side_content: impl Fn() -> View + 'static,
        main_content: impl Fn() -> View + 'static,
        config: SideRevealConfig,
        is_revealed: bool,
    ) -> Self {
        Self::build(
            Rc::new(side_content),
            Rc::new(main_content),
            config,
            RevealState::fixed(is_revealed),
        )
    }

    /// Leading edge, smooth animation, shown.
    pub fn with_defaults(side_content: View, main_content: View) -> Self {
        Self::new(
            side_content,
            main_content,
            SideRevealConfig::default(),
            Just(true),
        )
    }

    fn build(
        side_content: ContentBuilder,
        main_content: ContentBuilder,
        config: SideRevealConfig,
        reveal: RevealState,
    ) -> Self {
        let reveal = Rc::new(reveal);
        let probe = SizeProbe::new();
        let invalid = Rc::new(Cell::new(Invalidation::empty()));
        let scope = current_scope().map(|s| s.child()).unwrap_or_default();

        let reveal_sub = {
            let invalid = invalid.clone();
            reveal.subscribe(move |_| invalid.set(invalid.get() | Invalidation::REVEAL))
        };
        let size_sub = {
            let invalid = invalid.clone();
            probe.subscribe(move |_| invalid.set(invalid.get() | Invalidation::SIZE))
        };
        {
            let reveal = reveal.clone();
            let probe = probe.clone();
            scope.add_disposer(move || {
                reveal.unsubscribe(reveal_sub);
                probe.unsubscribe(size_sub);
                reveal.teardown();
            });
        }

        log::debug!(
            "side reveal: mounted ({}, revealed = {})",
            config.reveal_direction,
            reveal.current()
        );

        Self {
            side_content,
            main_content,
            config: Cell::new(config),
            offset: RefCell::new(AnimatedValue::new(0.0, config.reveal_animation)),
            reveal,
            probe,
            measured: Cell::new(false),
            last_edge: Cell::new(None),
            invalid,
            scope,
        }
    }

    fn edge(&self) -> Edge {
        self.last_edge.get().unwrap_or_else(|| {
            self.config
                .get()
                .reveal_direction
                .edge(text_direction())
        })
    }

    /// Builds main content with the side content overlaid at the configured edge.
    pub fn compose(&self) -> View {
        let config = self.config.get();
        let edge = config.reveal_direction.edge(text_direction());
        self.last_edge.set(Some(edge));

        let flags = self.invalid.replace(Invalidation::empty());
        if !flags.is_empty() {
            log::trace!("side reveal: recompose for {flags:?}");
        }

        let width = self.probe.width();
        let target = reveal_offset(self.reveal.current(), edge, width);
        let offset = {
            let mut anim = self.offset.borrow_mut();
            if !self.measured.get() && width > 0.0 {
                // first real measurement: place it, don't slide it there
                self.measured.set(true);
                anim.snap_to(target);
            } else if *anim.target() != target {
                anim.set_target(target);
            }
            anim.update();
            *anim.get()
        };

        let side = self
            .probe
            .wrap((self.side_content)())
            .map_modifier(|m| m.translate(offset, 0.0));

        let anchor = Column(
            Modifier::new()
                .absolute()
                .offset_top(0.0)
                .offset_bottom(0.0)
                .justify_content(JustifyContent::Center)
                .align_items(AlignItems::FlexStart)
                .tag(OVERLAY_TAG),
        );
        let anchor = match edge {
            Edge::Left => anchor.map_modifier(|m| m.offset_left(0.0)),
            Edge::Right => anchor.map_modifier(|m| m.offset_right(0.0)),
        };

        let mut root = (self.main_content)();
        root.children.push(anchor.child(side));
        root
    }

    /// Where the side content is heading, from the current inputs.
    pub fn target_offset(&self) -> f32 {
        reveal_offset(self.reveal.current(), self.edge(), self.probe.width())
    }

    /// Where the side content was drawn in the latest `compose`.
    pub fn current_offset(&self) -> f32 {
        *self.offset.borrow().get()
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal.current()
    }

    pub fn measured_width(&self) -> f32 {
        self.probe.width()
    }

    pub fn is_animating(&self) -> bool {
        self.offset.borrow().is_animating()
    }

    pub fn pending_invalidation(&self) -> Invalidation {
        self.invalid.get()
    }

    /// True while the host should keep producing frames.
    pub fn needs_frame(&self) -> bool {
        !self.invalid.get().is_empty() || self.is_animating() || dispatch::has_pending()
    }

    pub fn config(&self) -> SideRevealConfig {
        self.config.get()
    }

    pub fn reconfigure(&self, config: SideRevealConfig) {
        let old = self.config.replace(config);
        if old == config {
            return;
        }
        log::debug!(
            "side reveal: reconfigured {} -> {}",
            old.reveal_direction,
            config.reveal_direction
        );
        self.offset.borrow_mut().set_spec(config.reveal_animation);
        self.last_edge.set(None);
        self.invalid.set(self.invalid.get() | Invalidation::CONFIG);
    }

    pub fn reveal_state(&self) -> &RevealState {
        &self.reveal
    }

    pub fn size_probe(&self) -> &SizeProbe {
        &self.probe
    }

    /// Cancels the reveal subscription; nothing is delivered afterwards.
    pub fn teardown(&self) {
        self.scope.dispose();
    }

    pub fn is_torn_down(&self) -> bool {
        self.scope.is_disposed()
    }
}

impl Drop for SideReveal {
    fn drop(&mut self) {
        self.teardown();
    }
}
