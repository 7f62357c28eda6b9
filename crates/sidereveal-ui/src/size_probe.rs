use sidereveal_core::*;

/// Reports the laid-out size of whatever view it wraps.
///
/// The probe adds no node of its own: it hooks the wrapped view's modifier,
/// so the subtree draws, sizes and hit-tests exactly as it would unwrapped.
/// Only the latest size is kept, and an unchanged size does not notify.
#[derive(Clone)]
pub struct SizeProbe {
    size: Signal<Size>,
}

impl Default for SizeProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SizeProbe {
    pub fn new() -> Self {
        Self {
            size: signal(Size::ZERO),
        }
    }

    pub fn wrap(&self, view: View) -> View {
        let size = self.size.clone();
        view.map_modifier(|m| {
            m.on_size_changed(move |s| {
                if size.set_if_changed(s) {
                    log::trace!("size probe: {}x{}", s.width, s.height);
                }
            })
        })
    }

    pub fn size(&self) -> Size {
        self.size.get()
    }

    pub fn width(&self) -> f32 {
        self.size.with(|s| s.width)
    }

    /// Set by hand, as layout would. Used when the host measures elsewhere.
    pub fn report(&self, s: Size) -> bool {
        self.size.set_if_changed(Size::new(s.width, s.height))
    }

    pub fn subscribe(&self, f: impl Fn(&Size) + 'static) -> SubId {
        self.size.subscribe(f)
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.size.unsubscribe(id)
    }
}
