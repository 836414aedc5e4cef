use std::cell::RefCell;
use std::rc::Rc;

use attune_core::{Signal, disposable_effect, on_unmount, remember, signal};

use crate::service::{FriendId, Status, StatusFeed};
use crate::sync::StatusBinding;

/// Effect-style surface: subscribe inside a composition pass, keyed by the
/// friend id.
///
/// The subscription follows `disposable_effect` semantics: established on
/// the first pass, released-then-reestablished when `id` changes, released
/// for good when the composition retires. Passing the same id again does
/// nothing.
///
/// ```rust,ignore
/// let mut host = Composition::new();
/// host.compose(|| {
///     let status = use_friend_status(&hub, FriendId(1));
///     // status.get() is None until the feed reports
/// });
/// ```
pub fn use_friend_status<F: StatusFeed + 'static>(
    feed: &Rc<F>,
    id: FriendId,
) -> Signal<Option<Status>> {
    let status = remember(|| signal(None::<Status>));
    let binding = remember({
        let feed = feed.clone();
        let mirror = (*status).clone();
        move || RefCell::new(StatusBinding::new(feed, move |s| mirror.set(Some(s))))
    });

    {
        let status = (*status).clone();
        let binding = binding.clone();
        disposable_effect(id, move || {
            // Key changed: whatever the previous friend reported is stale.
            status.set(None);
            if let Err(err) = binding.borrow_mut().activate(id) {
                log::error!("use_friend_status: {err}");
            }
            on_unmount(move || {
                if let Err(err) = binding.borrow_mut().retire(id) {
                    log::error!("use_friend_status release: {err}");
                }
            })
        });
    }

    (*status).clone()
}
