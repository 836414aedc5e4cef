use std::rc::Rc;

use thiserror::Error;

use crate::service::{FriendId, Registration, Status, StatusCallback, StatusFeed};

/// Usage-contract violations of a `StatusBinding`. None are recoverable;
/// they mean the host delivered lifecycle callbacks out of order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    #[error("already subscribed for friend {0}")]
    DoubleSubscribe(FriendId),
    #[error("subscription for friend {0} was already released")]
    DoubleRelease(FriendId),
    #[error("no live subscription for friend {0}")]
    NotSubscribed(FriendId),
}

#[derive(Clone, Copy)]
enum BindState {
    Idle,
    Bound { id: FriendId, reg: Registration },
    Retired { id: FriendId },
}

/// Keyed subscription synchronizer: keeps exactly one feed subscription
/// alive, matching the latest accepted key.
///
/// The contract, independent of which surface drives it:
///
/// - `activate(k)` — one subscribe call.
/// - `rekey(old, new)` — release `old`, then subscribe `new`; equal keys do
///   nothing.
/// - `retire(k)` — release with no replacement; valid exactly once.
///
/// At any point the binding holds a live registration iff it has been
/// activated and not retired, and that registration's key equals the latest
/// accepted key.
pub struct StatusBinding<F: StatusFeed> {
    feed: Rc<F>,
    callback: StatusCallback,
    state: BindState,
}

impl<F: StatusFeed> StatusBinding<F> {
    pub fn new(feed: Rc<F>, callback: impl Fn(Status) + 'static) -> Self {
        Self {
            feed,
            callback: Rc::new(callback),
            state: BindState::Idle,
        }
    }

    /// The key of the live subscription, if one exists.
    pub fn bound_key(&self) -> Option<FriendId> {
        match self.state {
            BindState::Bound { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn activate(&mut self, id: FriendId) -> Result<(), BindError> {
        match self.state {
            BindState::Bound { id: live, .. } => Err(BindError::DoubleSubscribe(live)),
            // A retired binding may start a fresh cycle (remount).
            BindState::Idle | BindState::Retired { .. } => {
                let reg = self.feed.subscribe(id, self.callback.clone());
                self.state = BindState::Bound { id, reg };
                Ok(())
            }
        }
    }

    pub fn rekey(&mut self, old: FriendId, new: FriendId) -> Result<(), BindError> {
        if old == new {
            return Ok(());
        }
        match self.state {
            BindState::Bound { id, reg } if id == old => {
                // Release before re-establish.
                self.feed.unsubscribe(reg);
                let reg = self.feed.subscribe(new, self.callback.clone());
                self.state = BindState::Bound { id: new, reg };
                Ok(())
            }
            _ => Err(BindError::NotSubscribed(old)),
        }
    }

    pub fn retire(&mut self, id: FriendId) -> Result<(), BindError> {
        match self.state {
            BindState::Bound { id: live, reg } if live == id => {
                self.feed.unsubscribe(reg);
                self.state = BindState::Retired { id };
                Ok(())
            }
            BindState::Bound { .. } | BindState::Idle => Err(BindError::NotSubscribed(id)),
            BindState::Retired { id: done } if done == id => Err(BindError::DoubleRelease(id)),
            BindState::Retired { .. } => Err(BindError::NotSubscribed(id)),
        }
    }
}

impl<F: StatusFeed> Drop for StatusBinding<F> {
    fn drop(&mut self) {
        // A binding dropped while bound still returns its registration; the
        // error surface is only for explicit lifecycle calls.
        if let BindState::Bound { id, reg } = self.state {
            log::warn!("binding for friend {id} dropped while live; releasing");
            self.feed.unsubscribe(reg);
        }
    }
}
