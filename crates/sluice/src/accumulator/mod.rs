mod atomic;
mod interface;
mod lock;
mod mutex;
mod tally;

pub use atomic::*;
pub use interface::*;
pub use lock::*;
pub use tally::*;
