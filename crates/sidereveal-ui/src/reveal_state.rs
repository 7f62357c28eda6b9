use std::cell::Cell;
use std::rc::Rc;

use sidereveal_core::*;

/// The current "is revealed" flag, fed by a publisher.
///
/// There is no setter: the value only changes when the source emits. Values
/// are applied in emission order and every one of them notifies, even when it
/// repeats the previous value. Sources living on other threads go through a
/// [`ui_channel`], so delivery always happens on the UI thread.
pub struct RevealState {
    current: Signal<bool>,
    emissions: Rc<Cell<u64>>,
    alive: Rc<Cell<bool>>,
    subscription: Subscription,
}

impl RevealState {
    pub fn new(source: impl Publisher<bool>) -> Self {
        let current = signal(false);
        let emissions = Rc::new(Cell::new(0));
        let alive = Rc::new(Cell::new(true));

        let sink: Sink<bool> = {
            let current = current.clone();
            let emissions = emissions.clone();
            let alive = alive.clone();
            Rc::new(move |v| {
                if !alive.get() {
                    return;
                }
                emissions.set(emissions.get() + 1);
                log::debug!("reveal state: {v} (emission #{})", emissions.get());
                current.set(v);
            })
        };
        let subscription = source.connect(sink);

        Self {
            current,
            emissions,
            alive,
            subscription,
        }
    }

    /// One value, delivered once; later changes come from rebuilding with a new value.
    pub fn fixed(is_revealed: bool) -> Self {
        Self::new(Just(is_revealed))
    }

    /// `false` until the source's first value arrives.
    pub fn current(&self) -> bool {
        self.current.get()
    }

    pub fn emissions(&self) -> u64 {
        self.emissions.get()
    }

    pub fn subscribe(&self, f: impl Fn(bool) + 'static) -> SubId {
        self.current.subscribe(move |v| f(*v))
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.current.unsubscribe(id)
    }

    /// Stops listening to the source. Nothing is delivered afterwards.
    pub fn teardown(&self) {
        if self.alive.replace(false) {
            log::debug!(
                "reveal state: torn down after {} emission(s)",
                self.emissions.get()
            );
        }
        self.subscription.cancel();
    }

    pub fn is_active(&self) -> bool {
        self.alive.get()
    }
}

impl Drop for RevealState {
    fn drop(&mut self) {
        self.teardown();
    }
}
