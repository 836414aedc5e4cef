use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle for one `Signal::subscribe` registration.
    pub struct WatchId;
}

/// Observable state cell.
///
/// `Signal<T>` is a cloneable handle to a single value; all clones point at
/// the same storage. Writes notify watchers synchronously, in registration
/// order is not guaranteed.
///
/// ```rust
/// use attune_core::*;
///
/// let count = signal(0);
/// count.set(1);
/// count.update(|v| *v += 1);
/// assert_eq!(count.get(), 2);
/// ```
#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    watchers: SlotMap<WatchId, Rc<dyn Fn(&T)>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            watchers: SlotMap::with_key(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    /// Borrow the value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    /// Registers a watcher called after every `set`/`update`.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> WatchId {
        self.0.borrow_mut().watchers.insert(Rc::new(f))
    }

    /// Removes a watcher. Returns false if the id was already gone.
    pub fn unsubscribe(&self, id: WatchId) -> bool {
        self.0.borrow_mut().watchers.remove(id).is_some()
    }

    pub fn watcher_count(&self) -> usize {
        self.0.borrow().watchers.len()
    }

    fn notify(&self) {
        // Snapshot first so removal during iteration can't invalidate it.
        // Watchers must not write back into the same signal re-entrantly.
        let snapshot: Vec<Rc<dyn Fn(&T)>> = self.0.borrow().watchers.values().cloned().collect();
        for f in snapshot {
            f(&self.0.borrow().value);
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
