use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::Dispose;

thread_local! {
    static CURRENT_SCOPE: RefCell<Option<Weak<ScopeInner>>> = const { RefCell::new(None) };
}

/// Lifetime of a mounted component: everything it owns is torn down with it.
pub struct Scope {
    inner: Rc<ScopeInner>,
}

struct ScopeInner {
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
    // weak: a child lives as long as its owner holds it
    children: RefCell<Vec<Weak<ScopeInner>>>,
    disposed: Cell<bool>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                disposers: RefCell::new(Vec::new()),
                children: RefCell::new(Vec::new()),
                disposed: Cell::new(false),
            }),
        }
    }

    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        CURRENT_SCOPE.with(|current| {
            let prev = current.borrow().clone();
            *current.borrow_mut() = Some(Rc::downgrade(&self.inner));
            let result = f();
            *current.borrow_mut() = prev;
            result
        })
    }

    /// Registers cleanup. On an already disposed scope the disposer runs immediately.
    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        if self.inner.disposed.get() {
            disposer();
            return;
        }
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    pub fn add_dispose(&self, d: Dispose) {
        self.add_disposer(move || d.run());
    }

    /// A scope disposed together with this one. Dropped or disposed children
    /// are forgotten on the next call.
    pub fn child(&self) -> Scope {
        let child = Scope::new();
        self.inner.prune_children();
        self.inner
            .children
            .borrow_mut()
            .push(Rc::downgrade(&child.inner));
        child
    }

    /// Live, undisposed children still tracked by this scope.
    pub fn child_count(&self) -> usize {
        self.inner.prune_children();
        self.inner.children.borrow().len()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    pub fn dispose(&self) {
        self.inner.dispose();
    }
}

impl ScopeInner {
    fn prune_children(&self) {
        self.children
            .borrow_mut()
            .retain(|c| c.upgrade().is_some_and(|c| !c.disposed.get()));
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        // children first
        let children = std::mem::take(&mut *self.children.borrow_mut());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.dispose();
        }

        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        for disposer in disposers {
            disposer();
        }
    }
}

impl Clone for Scope {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub fn current_scope() -> Option<Scope> {
    CURRENT_SCOPE.with(|current| {
        current
            .borrow()
            .as_ref()
            .and_then(|weak| weak.upgrade().map(|inner| Scope { inner }))
    })
}

impl Drop for ScopeInner {
    fn drop(&mut self) {
        self.dispose();
    }
}
