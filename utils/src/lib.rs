//! Runtime infrastructure for tackle.
//!
//! Unlike the pure helpers in `tackle-types`, everything here owns threads,
//! locks or files:
//!
//! - **`guarded`**: [`Guarded`], a value box whose every access is one critical section
//! - **`dispatch`**: [`SerialQueue`], a caller-owned single-worker job queue
//! - **`atomic_write`**: crash-safe file persistence (temp + rename)
//! - **`persist`**: saving named documents into a directory

pub mod atomic_write;
pub mod dispatch;
pub mod guarded;
pub mod persist;

pub use atomic_write::{AtomicWriteOptions, PersistMode, atomic_write, atomic_write_with_options};
pub use dispatch::{DispatchError, MAX_DELAY, SerialQueue, delay_seconds};
pub use guarded::Guarded;
pub use persist::{PersistError, write_document};
