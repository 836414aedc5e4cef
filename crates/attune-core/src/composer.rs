use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::scope::Scope;

thread_local! {
    static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

/// Slot storage for one composition.
///
/// Sequential slots back `remember`: the Nth call in a pass always lands on
/// the Nth slot, so call order must be stable across passes. Keyed slots
/// back `remember_with_key` and survive conditional call sites.
#[derive(Default)]
pub struct Composer {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
    keyed_slots: HashMap<String, Box<dyn Any>>,
}

impl Composer {
    fn rewind(&mut self) {
        self.cursor = 0;
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.keyed_slots.clear();
        self.cursor = 0;
    }
}

/// Clears the calling thread's bare composer. Test hook.
pub fn reset_ambient_composer() {
    COMPOSER.with(|c| c.borrow_mut().clear());
}

/// Slot-based remember. Sequential composition only.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            c.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = c.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            log::warn!(
                "remember: slot {} changed type between passes; replacing. \
                 Conditional call sites should use remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            c.slots[cursor] = Box::new(rc.clone());
            rc
        }
    })
}

/// Key-based remember.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let key = key.into();

        if let Some(existing) = c.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            log::warn!("remember_with_key: key '{key}' reused with a different type; replacing.");
        }

        let rc: Rc<T> = Rc::new(init());
        c.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    })
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

/// One live composition: private slot storage plus a root scope that lasts
/// from the first pass until `retire`.
///
/// The host calls `compose` once per pass; remembered slots persist between
/// passes, and disposers registered on the root scope (effect cleanups) run
/// exactly once, at retirement.
///
/// ```rust
/// use attune_core::*;
///
/// let mut host = Composition::new();
/// for _ in 0..3 {
///     host.compose(|| {
///         let count = remember_state(|| 0u32);
///         *count.borrow_mut() += 1;
///     });
/// }
/// host.retire();
/// ```
pub struct Composition {
    composer: Composer,
    scope: Option<Scope>,
}

impl Composition {
    pub fn new() -> Self {
        Self {
            composer: Composer::default(),
            scope: Some(Scope::new()),
        }
    }

    /// Runs one composition pass. Swaps this composition's slots into the
    /// thread-local seen by `remember*`, so passes of different compositions
    /// never share state.
    pub fn compose<R>(&mut self, f: impl FnOnce() -> R) -> R {
        let Some(scope) = self.scope.clone() else {
            log::warn!("compose after retire: running without slots or scope");
            return f();
        };

        self.composer.rewind();
        COMPOSER.with(|c| std::mem::swap(&mut *c.borrow_mut(), &mut self.composer));
        let result = scope.run(f);
        COMPOSER.with(|c| std::mem::swap(&mut *c.borrow_mut(), &mut self.composer));
        result
    }

    /// Ends the composition: runs every pending effect cleanup and drops the
    /// remembered slots.
    pub fn retire(mut self) {
        self.retire_in_place();
    }

    fn retire_in_place(&mut self) {
        if let Some(scope) = self.scope.take() {
            scope.dispose();
        }
        self.composer.clear();
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Composition {
    fn drop(&mut self) {
        self.retire_in_place();
    }
}
