//! Pipeline backends.
//!
//! Both backends wire the same four stages the same way:
//!
//! ```text
//!                    ┌─ worker 0 ─▶ collector 0 ─┐
//! generator ─▶ input ┼─ worker 1 ─▶ collector 1 ─┼─▶ merge ─▶ aggregator
//!                    └─ worker n ─▶ collector n ─┘
//! ```
//!
//! - The generator is the sole owner of the input sender. Dropping it on
//!   return is the only way the input closes.
//! - Every worker owns exactly one output sender and drops it when its input
//!   is closed and drained.
//! - Collectors hold clones of the merge sender. A dedicated closer task owns
//!   the original and drops it only after every collector has been joined.
//!
//! Closure is therefore always the drop of the last sender, each sender has
//! exactly one owner, and a send on a closed channel cannot be expressed.
//!
//! ## Backends
//!
//! - [`threaded`]: one OS thread per stage inside [`std::thread::scope`],
//!   with `crossbeam-channel` rendezvous channels.
//! - [`tokio`]: one tokio task per stage on the multi-thread scheduler.

#[cfg_attr(docsrs, doc(cfg(feature = "threaded")))]
#[cfg(feature = "threaded")]
pub mod threaded;
#[cfg_attr(docsrs, doc(cfg(feature = "async-tokio")))]
#[cfg(feature = "async-tokio")]
pub mod tokio;
