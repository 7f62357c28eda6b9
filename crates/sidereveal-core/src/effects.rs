use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// A guard with nothing to clean up.
    pub fn noop() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.borrow().is_none()
    }
}

/// Live connection to a publisher. Cancelled explicitly or when dropped.
pub struct Subscription {
    dispose: Dispose,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Dispose::new(cancel),
        }
    }

    /// A subscription whose source already completed.
    pub fn finished() -> Self {
        Self {
            dispose: Dispose::noop(),
        }
    }

    pub fn cancel(&self) {
        self.dispose.run();
    }

    pub fn is_active(&self) -> bool {
        !self.dispose.is_spent()
    }

    /// Hands the cancellation over to a `Dispose` guard (e.g. to park it in a `Scope`).
    pub fn into_dispose(mut self) -> Dispose {
        std::mem::replace(&mut self.dispose, Dispose::noop())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose.run();
    }
}
