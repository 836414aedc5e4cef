use std::cell::RefCell;

use crate::effects::Dispose;
use crate::{remember, remember_with_key, scoped_effect};

/// Keyed effect with cleanup: the effect re-runs only when `key` changes,
/// and the previous cleanup runs *before* the new effect body.
///
/// An equal key is a no-op: no cleanup, no re-run. At scope disposal the
/// latest cleanup runs once.
///
/// Slot-based, so one call site per composition position (as with
/// `remember`).
pub fn disposable_effect<K: PartialEq + Clone + 'static>(
    key: K,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    let last_key = remember(|| RefCell::new(None::<K>));
    let cleanup_slot = remember(|| RefCell::new(None::<Dispose>));
    let installed = remember(|| RefCell::new(false));

    // One unmount disposer per call site, draining whatever cleanup is
    // pending when the owning scope goes away.
    if !*installed.borrow() {
        *installed.borrow_mut() = true;
        let cleanup_slot = cleanup_slot.clone();
        scoped_effect(move || {
            Box::new(move || {
                if let Some(d) = cleanup_slot.borrow_mut().take() {
                    d.run();
                }
            })
        });
    }

    let changed = last_key.borrow().as_ref() != Some(&key);
    if changed {
        *last_key.borrow_mut() = Some(key);

        // Release before re-establish.
        if let Some(d) = cleanup_slot.borrow_mut().take() {
            d.run();
        }
        *cleanup_slot.borrow_mut() = Some(effect());
    }
}

/// Runs on every composition pass.
pub fn side_effect(effect: impl Fn()) {
    effect();
}

/// Keyed fire-and-forget effect: runs when the key changes, never cleaned
/// up. Use `launched_effect!` so the call site id is derived for you.
pub fn launched_effect_at<K: PartialEq + Clone + 'static>(
    callsite: &'static str,
    key: K,
    effect: impl FnOnce() + 'static,
) {
    let last_key = remember_with_key(format!("launched:{callsite}"), || RefCell::new(None::<K>));

    let mut last = last_key.borrow_mut();
    if last.as_ref() != Some(&key) {
        *last = Some(key);
        effect();
    }
}

#[macro_export]
macro_rules! launched_effect {
    ($key:expr, $effect:expr) => {
        $crate::effects_ext::launched_effect_at(
            concat!(module_path!(), ":", line!(), ":", column!()),
            $key,
            $effect,
        )
    };
}
