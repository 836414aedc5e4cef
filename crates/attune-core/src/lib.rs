//! # State, scopes, and keyed effects
//!
//! Attune's core is a small single-threaded reactive runtime. There are
//! three main pieces:
//!
//! - `Signal<T>` — observable, watchable value.
//! - `remember*` / `Composition` — slot storage bound to a composition pass.
//! - `effect` / `disposable_effect` — side-effects with cleanup, keyed by
//!   the input they depend on.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state:
//!
//! ```rust
//! use attune_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Remembered state
//!
//! Inside a composition pass, state lives in `remember*` slots rather than
//! in globals. A `Composition` gives the slots and the cleanup scope a
//! lifetime: mount on the first pass, retire exactly once.
//!
//! ```rust
//! use attune_core::*;
//!
//! let mut host = Composition::new();
//! host.compose(|| {
//!     let clicks = remember(|| signal(0u32));
//!     clicks.update(|c| *c += 1);
//! });
//! host.retire();
//! ```
//!
//! ## Keyed effects
//!
//! `disposable_effect(key, f)` is the synchronization primitive the rest of
//! the workspace is built on: `f` runs when `key` first appears or changes,
//! its cleanup runs before the re-run, and the last cleanup fires at
//! retirement. An unchanged key does nothing.
//!
//! ```rust
//! use attune_core::*;
//!
//! let mut host = Composition::new();
//! for id in [7u64, 7, 9] {
//!     host.compose(move || {
//!         disposable_effect(id, move || {
//!             log::info!("watching {id}");
//!             on_unmount(move || log::info!("released {id}"))
//!         });
//!     });
//! }
//! host.retire();
//! ```

pub mod composer;
pub mod effects;
pub mod effects_ext;
pub mod memo;
pub mod prelude;
pub mod scope;
pub mod signal;
pub mod tests;

pub use composer::*;
pub use effects::*;
pub use effects_ext::*;
pub use memo::*;
pub use scope::*;
pub use signal::*;
