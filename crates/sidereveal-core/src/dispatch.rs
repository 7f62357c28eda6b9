//! Delivery of values produced on other threads onto the UI thread.
//!
//! A `UiSender` can be moved to any thread. Values it sends are queued and
//! only handed to the subscriber when the UI thread calls [`drain`], which
//! the `Scheduler` does at the start of every frame.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use sidereveal_core::*;
//!
//! let (tx, rx) = ui_channel::<bool>();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sub = rx.connect({
//!     let seen = seen.clone();
//!     Rc::new(move |v| seen.borrow_mut().push(v))
//! });
//!
//! std::thread::spawn(move || {
//!     tx.send(true).unwrap();
//!     tx.send(false).unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! assert!(seen.borrow().is_empty());
//! assert_eq!(dispatch::drain(), 2);
//! assert_eq!(*seen.borrow(), vec![true, false]);
//! sub.cancel();
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::error::DispatchError;
use crate::publisher::{Publisher, Sink};
use crate::Subscription;

new_key_type! {
    struct PumpKey;
}

pub type Waker = Arc<dyn Fn() + Send + Sync>;

static WAKER: RwLock<Option<Waker>> = parking_lot::const_rwlock(None);

thread_local! {
    static PUMPS: RefCell<SlotMap<PumpKey, Rc<dyn Pump>>> = RefCell::new(SlotMap::with_key());
}

/// Install the callback a sender uses to ask the host for a frame
/// (typically an event loop proxy). Replaces any previous waker.
pub fn set_waker(waker: impl Fn() + Send + Sync + 'static) {
    *WAKER.write() = Some(Arc::new(waker));
}

pub fn clear_waker() {
    *WAKER.write() = None;
}

fn wake() {
    let waker = WAKER.read().clone();
    if let Some(w) = waker {
        w();
    }
}

trait Pump {
    fn pump(&self) -> usize;
    fn pending(&self) -> usize;
}

struct Shared<T> {
    queue: Mutex<VecDeque<T>>,
    closed: AtomicBool,
}

impl<T> Shared<T> {
    fn close(&self) {
        let mut q = self.queue.lock();
        self.closed.store(true, Ordering::Release);
        q.clear();
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

pub struct UiSender<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for UiSender<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T: Send> UiSender<T> {
    pub fn send(&self, value: T) -> Result<(), DispatchError> {
        {
            let mut q = self.shared.queue.lock();
            if self.shared.is_closed() {
                log::warn!("ui_channel: send after receiver was torn down; value dropped");
                return Err(DispatchError::Disconnected);
            }
            q.push_back(value);
        }
        wake();
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        !self.shared.is_closed()
    }
}

/// UI-thread end of a [`ui_channel`]. Connect it on the thread that calls [`drain`].
pub struct UiReceiver<T> {
    shared: Option<Arc<Shared<T>>>,
}

impl<T> Drop for UiReceiver<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            shared.close();
        }
    }
}

pub fn ui_channel<T: Send>() -> (UiSender<T>, UiReceiver<T>) {
    let shared = Arc::new(Shared {
        queue: Mutex::new(VecDeque::new()),
        closed: AtomicBool::new(false),
    });
    (
        UiSender {
            shared: shared.clone(),
        },
        UiReceiver {
            shared: Some(shared),
        },
    )
}

struct ChannelPump<T> {
    shared: Arc<Shared<T>>,
    sink: Sink<T>,
}

impl<T> Pump for ChannelPump<T> {
    fn pump(&self) -> usize {
        let batch: SmallVec<[T; 8]> = self.shared.queue.lock().drain(..).collect();
        let mut delivered = 0;
        for v in batch {
            // a sink may tear the subscription down mid-batch
            if self.shared.is_closed() {
                break;
            }
            (self.sink)(v);
            delivered += 1;
        }
        delivered
    }

    fn pending(&self) -> usize {
        self.shared.queue.lock().len()
    }
}

impl<T: Send + 'static> Publisher<T> for UiReceiver<T> {
    fn connect(mut self, sink: Sink<T>) -> Subscription {
        let Some(shared) = self.shared.take() else {
            return Subscription::finished();
        };
        let pump: Rc<dyn Pump> = Rc::new(ChannelPump {
            shared: shared.clone(),
            sink,
        });
        let key = PUMPS.with(|p| p.borrow_mut().insert(pump));
        Subscription::new(move || {
            PUMPS.with(|p| p.borrow_mut().remove(key));
            shared.close();
        })
    }
}

/// Deliver everything queued for receivers connected on this thread, in
/// emission order per channel. Returns how many values were delivered.
pub fn drain() -> usize {
    let pumps: SmallVec<[Rc<dyn Pump>; 4]> =
        PUMPS.with(|p| p.borrow().values().cloned().collect());
    let delivered: usize = pumps.iter().map(|p| p.pump()).sum();
    if delivered > 0 {
        log::trace!("dispatch: delivered {delivered} queued value(s)");
    }
    delivered
}

pub fn has_pending() -> bool {
    PUMPS.with(|p| p.borrow().values().any(|pump| pump.pending() > 0))
}
