#[cfg(feature = "parking-lot")]
pub use parking_lot::Mutex;
#[cfg(not(feature = "parking-lot"))]
pub use std::sync::{Mutex, PoisonError};
