use std::cell::RefCell;
use std::rc::Rc;

/// Keyed memoization: `compute` runs only when `key` differs from the
/// previous pass at this call site.
///
/// ```rust
/// use attune_core::*;
///
/// let menu = vec![(120u32, 2u32), (80, 1)];
/// let total = memo(menu.clone(), move || {
///     menu.iter().map(|(price, qty)| price * qty).sum::<u32>()
/// });
/// assert_eq!(total, 320);
/// ```
///
/// Slot-based, like `remember`: one call site per composition position.
pub fn memo<K, T>(key: K, compute: impl FnOnce() -> T) -> T
where
    K: PartialEq + 'static,
    T: Clone + 'static,
{
    let slot = crate::remember(|| RefCell::new(None::<(K, T)>));

    {
        let cached = slot.borrow();
        if let Some((k, v)) = cached.as_ref()
            && *k == key
        {
            return v.clone();
        }
    }

    let v = compute();
    *slot.borrow_mut() = Some((key, v.clone()));
    v
}

/// Pull-based cached computation, invalidated by hand.
///
/// Unlike `memo` this is not tied to a composition slot; holders re-`get`
/// after `invalidate` to recompute.
pub struct DerivedState<T: Clone + 'static> {
    compute: Rc<dyn Fn() -> T>,
    cached: RefCell<Option<T>>,
}

impl<T: Clone + 'static> DerivedState<T> {
    pub fn new(compute: impl Fn() -> T + 'static) -> Self {
        Self {
            compute: Rc::new(compute),
            cached: RefCell::new(None),
        }
    }

    pub fn invalidate(&self) {
        *self.cached.borrow_mut() = None;
    }

    pub fn get(&self) -> T {
        if let Some(v) = self.cached.borrow().as_ref() {
            return v.clone();
        }
        let v = (self.compute)();
        *self.cached.borrow_mut() = Some(v.clone());
        v
    }
}
