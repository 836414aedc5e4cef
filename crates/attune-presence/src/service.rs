use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

/// Identifier of the friend a subscription is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FriendId(pub u64);

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Online,
    Offline,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Online => f.write_str("online"),
            Status::Offline => f.write_str("offline"),
        }
    }
}

pub type StatusCallback = Rc<dyn Fn(Status)>;

new_key_type! {
    /// Handle returned by `StatusFeed::subscribe`; releases the watcher when
    /// passed back to `unsubscribe`.
    pub struct Registration;
}

/// External status source. The binding layer treats this as a black box:
/// one subscribe call per activation, one unsubscribe per release.
pub trait StatusFeed {
    fn subscribe(&self, id: FriendId, callback: StatusCallback) -> Registration;

    /// Returns false if the registration was not live.
    fn unsubscribe(&self, reg: Registration) -> bool;
}

struct Watcher {
    id: FriendId,
    callback: StatusCallback,
}

#[derive(Default)]
struct HubInner {
    watchers: SlotMap<Registration, Watcher>,
    by_friend: HashMap<FriendId, SmallVec<[Registration; 4]>>,
}

/// In-memory `StatusFeed`: fans published statuses out to every watcher of
/// that friend. Single-threaded, like the composition side.
#[derive(Default)]
pub struct PresenceHub {
    inner: RefCell<HubInner>,
}

impl PresenceHub {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn publish(&self, id: FriendId, status: Status) {
        // Callbacks run outside the borrow; one may subscribe or
        // unsubscribe while handling the status.
        let targets: Vec<StatusCallback> = {
            let inner = self.inner.borrow();
            let Some(regs) = inner.by_friend.get(&id) else {
                log::debug!("publish {id} {status}: no watchers");
                return;
            };
            regs.iter()
                .filter_map(|reg| inner.watchers.get(*reg))
                .map(|w| w.callback.clone())
                .collect()
        };

        log::debug!("publish {id} {status} to {} watcher(s)", targets.len());
        for callback in targets {
            callback(status);
        }
    }

    pub fn watcher_count(&self, id: FriendId) -> usize {
        self.inner
            .borrow()
            .by_friend
            .get(&id)
            .map_or(0, |regs| regs.len())
    }

    pub fn total_watchers(&self) -> usize {
        self.inner.borrow().watchers.len()
    }
}

impl StatusFeed for PresenceHub {
    fn subscribe(&self, id: FriendId, callback: StatusCallback) -> Registration {
        let mut inner = self.inner.borrow_mut();
        let reg = inner.watchers.insert(Watcher { id, callback });
        inner.by_friend.entry(id).or_default().push(reg);
        log::debug!("subscribe {id} -> {reg:?}");
        reg
    }

    fn unsubscribe(&self, reg: Registration) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(watcher) = inner.watchers.remove(reg) else {
            log::warn!("unsubscribe of unknown registration {reg:?}");
            return false;
        };

        if let Some(regs) = inner.by_friend.get_mut(&watcher.id) {
            regs.retain(|r| *r != reg);
            if regs.is_empty() {
                inner.by_friend.remove(&watcher.id);
            }
        }
        log::debug!("unsubscribe {} <- {reg:?}", watcher.id);
        true
    }
}
