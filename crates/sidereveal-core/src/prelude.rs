pub use crate::animation::*;
pub use crate::color::Color;
pub use crate::dispatch::{UiReceiver, UiSender, ui_channel};
pub use crate::effects::{Dispose, Subscription};
pub use crate::error::*;
pub use crate::geometry::{Rect, Size, Transform, Vec2};
pub use crate::locals::{TextDirection, text_direction, with_text_direction};
pub use crate::modifier::Modifier;
pub use crate::publisher::{Just, Publisher, Sink, sequence};
pub use crate::runtime::{Frame, Scheduler};
pub use crate::scope::{Scope, current_scope};
pub use crate::signal::{Signal, SubId, signal};
pub use crate::view::{NodeRect, Scene, SceneNode, View, ViewId, ViewKind};
pub use taffy::{AlignItems, AlignSelf, JustifyContent};
