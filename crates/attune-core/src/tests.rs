#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::composer::reset_ambient_composer;
    use crate::prelude::*;

    #[test]
    fn signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn signal_watchers_fire_and_release() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        let watch = sig.subscribe(move |v| seen_clone.borrow_mut().push(*v));

        sig.set(1);
        sig.set(2);
        assert_eq!(*seen.borrow(), vec![1, 2]);

        assert!(sig.unsubscribe(watch));
        assert!(!sig.unsubscribe(watch));
        sig.set(3);
        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(sig.watcher_count(), 0);
    }

    #[test]
    fn scope_runs_disposers_on_dispose_only() {
        let cleaned = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        let cleaned_clone = cleaned.clone();
        scope.add_disposer(move || *cleaned_clone.borrow_mut() = true);

        assert!(!*cleaned.borrow());
        scope.dispose();
        assert!(*cleaned.borrow());
    }

    #[test]
    fn scope_children_dispose_before_parent() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let parent = Scope::new();
        let child = parent.child();

        let o = order.clone();
        parent.add_disposer(move || o.borrow_mut().push("parent"));
        let o = order.clone();
        child.add_disposer(move || o.borrow_mut().push("child"));

        parent.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn dispose_guard_runs_once() {
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let d = Dispose::new(move || *c.borrow_mut() += 1);

        assert!(!d.is_spent());
        d.run();
        d.run();
        assert!(d.is_spent());
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn keyed_remember_is_stable() {
        reset_ambient_composer();

        let first = remember_with_key("stable", || 42);
        let second = remember_with_key("stable", || 100);

        assert_eq!(*first, 42);
        assert_eq!(*second, 42); // key already present, init ignored
    }

    #[test]
    fn composition_slots_persist_across_passes() {
        let mut host = Composition::new();

        for expected in 1..=3u32 {
            host.compose(move || {
                let count = remember_state(|| 0u32);
                *count.borrow_mut() += 1;
                assert_eq!(*count.borrow(), expected);
            });
        }
        host.retire();
    }

    #[test]
    fn compositions_do_not_share_slots() {
        let mut a = Composition::new();
        let mut b = Composition::new();

        a.compose(|| {
            let v = remember_state(|| 10u32);
            *v.borrow_mut() += 1;
        });
        b.compose(|| {
            let v = remember_state(|| 10u32);
            assert_eq!(*v.borrow(), 10); // b's slot, untouched by a
        });
    }

    #[test]
    fn disposable_effect_orders_cleanup_before_rerun() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut host = Composition::new();

        for key in ["a", "a", "b"] {
            let log = log.clone();
            host.compose(move || {
                disposable_effect(key, move || {
                    log.borrow_mut().push(format!("sub:{key}"));
                    let log = log.clone();
                    on_unmount(move || log.borrow_mut().push(format!("unsub:{key}")))
                });
            });
        }
        host.retire();

        // The repeated "a" pass contributes nothing.
        assert_eq!(*log.borrow(), vec!["sub:a", "unsub:a", "sub:b", "unsub:b"]);
    }

    #[test]
    fn disposable_effect_balances_at_retire() {
        let live = Rc::new(RefCell::new(0i32));
        let mut host = Composition::new();

        for key in [1u64, 2, 3, 3, 2] {
            let live = live.clone();
            let effect_live = live.clone();
            host.compose(move || {
                disposable_effect(key, move || {
                    *effect_live.borrow_mut() += 1;
                    let effect_live = effect_live.clone();
                    on_unmount(move || *effect_live.borrow_mut() -= 1)
                });
            });
            assert_eq!(*live.borrow(), 1); // exactly one live subscription
        }
        host.retire();
        assert_eq!(*live.borrow(), 0);
    }

    #[test]
    fn memo_recomputes_only_on_key_change() {
        let runs = Rc::new(RefCell::new(0));
        let mut host = Composition::new();

        for (key, expected) in [(2u32, 4u32), (2, 4), (3, 9)] {
            let runs = runs.clone();
            host.compose(move || {
                let square = memo(key, || {
                    *runs.borrow_mut() += 1;
                    key * key
                });
                assert_eq!(square, expected);
            });
        }
        assert_eq!(*runs.borrow(), 2);
        host.retire();
    }

    #[test]
    fn derived_state_caches_until_invalidated() {
        let runs = Rc::new(RefCell::new(0));
        let r = runs.clone();
        let derived = DerivedState::new(move || {
            *r.borrow_mut() += 1;
            "value"
        });

        assert_eq!(derived.get(), "value");
        assert_eq!(derived.get(), "value");
        assert_eq!(*runs.borrow(), 1);

        derived.invalidate();
        assert_eq!(derived.get(), "value");
        assert_eq!(*runs.borrow(), 2);
    }

    #[test]
    fn launched_effect_fires_once_per_key() {
        reset_ambient_composer();
        let fired = Rc::new(RefCell::new(Vec::new()));

        for key in [1u32, 1, 2] {
            let fired = fired.clone();
            crate::launched_effect!(key, move || fired.borrow_mut().push(key));
        }
        assert_eq!(*fired.borrow(), vec![1, 2]);
    }
}
