use std::rc::Rc;

use crate::{Signal, Subscription};

/// Receives values on the UI thread.
pub type Sink<T> = Rc<dyn Fn(T)>;

/// A source of values that cannot fail.
pub trait Publisher<T>: 'static {
    fn connect(self, sink: Sink<T>) -> Subscription;
}

/// Emits one value, synchronously, on connect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Just<T>(pub T);

impl<T: 'static> Publisher<T> for Just<T> {
    fn connect(self, sink: Sink<T>) -> Subscription {
        sink(self.0);
        Subscription::finished()
    }
}

pub struct Sequence<I>(I);

/// Emits every item in order, synchronously, on connect.
pub fn sequence<I: IntoIterator>(items: I) -> Sequence<I::IntoIter> {
    Sequence(items.into_iter())
}

impl<T, I> Publisher<T> for Sequence<I>
where
    T: 'static,
    I: Iterator<Item = T> + 'static,
{
    fn connect(self, sink: Sink<T>) -> Subscription {
        for v in self.0 {
            sink(v);
        }
        Subscription::finished()
    }
}

/// Replays the current value, then every write until cancelled.
impl<T: Clone + 'static> Publisher<T> for Signal<T> {
    fn connect(self, sink: Sink<T>) -> Subscription {
        sink(self.get());
        let id = self.subscribe(move |v| sink(v.clone()));
        Subscription::new(move || {
            self.unsubscribe(id);
        })
    }
}
