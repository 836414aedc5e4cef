use std::rc::Rc;

use attune_core::{Signal, signal};

use crate::service::{FriendId, Status, StatusFeed};
use crate::sync::{BindError, StatusBinding};

/// Class-style surface: mount / update / unmount callbacks delivered
/// sequentially by a host cycle, never overlapping for one instance.
pub trait Lifecycle<P> {
    fn mount(&mut self, props: &P) -> Result<(), BindError>;
    fn update(&mut self, old: &P, new: &P) -> Result<(), BindError>;
    fn unmount(&mut self, props: &P) -> Result<(), BindError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FriendProps {
    pub friend: FriendId,
}

/// Lifecycle component that keeps a `StatusBinding` in step with its props
/// and mirrors the feed into an observable signal.
///
/// `status()` reads `None` until the feed reports for the bound friend.
pub struct StatusWatcher<F: StatusFeed> {
    binding: StatusBinding<F>,
    status: Signal<Option<Status>>,
}

impl<F: StatusFeed> StatusWatcher<F> {
    pub fn new(feed: Rc<F>) -> Self {
        let status = signal(None::<Status>);
        let mirror = status.clone();
        Self {
            binding: StatusBinding::new(feed, move |s| mirror.set(Some(s))),
            status,
        }
    }

    pub fn status(&self) -> Signal<Option<Status>> {
        self.status.clone()
    }
}

impl<F: StatusFeed> Lifecycle<FriendProps> for StatusWatcher<F> {
    fn mount(&mut self, props: &FriendProps) -> Result<(), BindError> {
        self.binding.activate(props.friend)
    }

    fn update(&mut self, old: &FriendProps, new: &FriendProps) -> Result<(), BindError> {
        if old.friend != new.friend {
            // Stale status from the previous friend must not leak through.
            self.status.set(None);
        }
        self.binding.rekey(old.friend, new.friend)
    }

    fn unmount(&mut self, props: &FriendProps) -> Result<(), BindError> {
        self.binding.retire(props.friend)
    }
}

/// Minimal host cycle: owns a component and its current props, delivering
/// lifecycle callbacks in order. Contract errors surface to the caller.
pub struct Host<P, L: Lifecycle<P>> {
    component: L,
    props: P,
}

impl<P, L: Lifecycle<P>> Host<P, L> {
    pub fn mount(mut component: L, props: P) -> Result<Self, BindError> {
        component.mount(&props)?;
        Ok(Self { component, props })
    }

    pub fn props(&self) -> &P {
        &self.props
    }

    pub fn component(&self) -> &L {
        &self.component
    }

    /// Re-renders with new props, delivering `update(old, new)`.
    pub fn set_props(&mut self, next: P) -> Result<(), BindError> {
        let prev = std::mem::replace(&mut self.props, next);
        self.component.update(&prev, &self.props)
    }

    /// Retires the component and hands it back.
    pub fn unmount(mut self) -> Result<L, BindError> {
        self.component.unmount(&self.props)?;
        Ok(self.component)
    }
}
