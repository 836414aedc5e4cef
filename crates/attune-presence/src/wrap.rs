use std::rc::Rc;

use crate::lifecycle::{FriendProps, Lifecycle, StatusWatcher};
use crate::service::{Status, StatusFeed};
use crate::sync::BindError;

/// A component that wants the friend's status handed to it, without owning
/// the subscription. Closures `Fn(&FriendProps, Option<Status>) -> R` are
/// components.
pub trait StatusView {
    type Output;

    fn render(&self, props: &FriendProps, status: Option<Status>) -> Self::Output;
}

impl<R, F> StatusView for F
where
    F: Fn(&FriendProps, Option<Status>) -> R,
{
    type Output = R;

    fn render(&self, props: &FriendProps, status: Option<Status>) -> R {
        self(props, status)
    }
}

/// Higher-order surface: wraps a status-consuming component into one that
/// manages its own subscription through the shared binding contract.
///
/// The wrapper's lifecycle is the watcher's; `render` injects the latest
/// status the feed reported for the current friend.
pub struct WithFriendStatus<F: StatusFeed, C: StatusView> {
    watcher: StatusWatcher<F>,
    inner: C,
}

pub fn with_friend_status<F: StatusFeed, C: StatusView>(
    feed: Rc<F>,
    inner: C,
) -> WithFriendStatus<F, C> {
    WithFriendStatus {
        watcher: StatusWatcher::new(feed),
        inner,
    }
}

impl<F: StatusFeed, C: StatusView> WithFriendStatus<F, C> {
    pub fn render(&self, props: &FriendProps) -> C::Output {
        self.inner.render(props, self.watcher.status().get())
    }
}

impl<F: StatusFeed, C: StatusView> Lifecycle<FriendProps> for WithFriendStatus<F, C> {
    fn mount(&mut self, props: &FriendProps) -> Result<(), BindError> {
        self.watcher.mount(props)
    }

    fn update(&mut self, old: &FriendProps, new: &FriendProps) -> Result<(), BindError> {
        self.watcher.update(old, new)
    }

    fn unmount(&mut self, props: &FriendProps) -> Result<(), BindError> {
        self.watcher.unmount(props)
    }
}
