use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    pub struct SubId;
}

type Subscriber<T> = Rc<dyn Fn(&T)>;

#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: SlotMap<SubId, Subscriber<T>>,
    // insertion order; slotmap iteration order is not stable across removals
    order: Vec<SubId>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: SlotMap::with_key(),
            order: Vec::new(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, v: T)
    where
        T: Clone,
    {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    /// Writes and notifies only when `v` differs from the stored value.
    /// Returns whether a write happened.
    pub fn set_if_changed(&self, v: T) -> bool
    where
        T: Clone + PartialEq,
    {
        {
            let mut inner = self.0.borrow_mut();
            if inner.value == v {
                return false;
            }
            inner.value = v;
        }
        self.notify();
        true
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F)
    where
        T: Clone,
    {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        let id = inner.subs.insert(Rc::new(f));
        inner.order.push(id);
        id
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        let mut inner = self.0.borrow_mut();
        inner.order.retain(|s| *s != id);
        inner.subs.remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().subs.len()
    }

    // Runs with no borrow held: subscribers may read the signal, subscribe or
    // unsubscribe. Writing from a subscriber re-enters `notify`.
    fn notify(&self)
    where
        T: Clone,
    {
        let (value, subs): (T, Vec<(SubId, Subscriber<T>)>) = {
            let inner = self.0.borrow();
            let subs = inner
                .order
                .iter()
                .filter_map(|id| inner.subs.get(*id).map(|s| (*id, s.clone())))
                .collect();
            (inner.value.clone(), subs)
        };
        for (id, s) in subs {
            // removed by an earlier subscriber in this round
            if !self.0.borrow().subs.contains_key(id) {
                continue;
            }
            s(&value);
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
