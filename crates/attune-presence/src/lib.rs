//! # Friend presence
//!
//! One subscription contract, three surfaces.
//!
//! A component watches the status of the friend named in its current input.
//! When that id changes, the old subscription must be released and a new one
//! established, exactly once per change, and released for good when the
//! component goes away. `StatusBinding` implements that contract once;
//! the rest of the crate adapts it to the three integration styles the host
//! might use:
//!
//! - [`lifecycle`] — explicit mount/update/unmount callbacks
//!   (`StatusWatcher` driven by a [`lifecycle::Host`]).
//! - [`hook`] — [`hook::use_friend_status`] inside a composition pass,
//!   keyed the way `disposable_effect` keys everything.
//! - [`wrap`] — [`wrap::with_friend_status`], wrapping a status-consuming
//!   component into one that owns its subscription.
//!
//! Misuse (double subscribe, double release, releasing without a
//! subscription) surfaces as [`BindError`] to the host, never swallowed.

pub mod hook;
pub mod lifecycle;
pub mod service;
pub mod sync;
pub mod wrap;

pub use hook::use_friend_status;
pub use lifecycle::{FriendProps, Host, Lifecycle, StatusWatcher};
pub use service::{FriendId, PresenceHub, Registration, Status, StatusCallback, StatusFeed};
pub use sync::{BindError, StatusBinding};
pub use wrap::{StatusView, WithFriendStatus, with_friend_status};
