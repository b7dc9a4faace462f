//! Null-safe helpers for optional values, collections, dates and numbers.
//!
//! # Design Principles
//!
//! - **Absent is not an error** - `None` inputs map to `false`, empty, zero
//!   or `None`, never to `Err`
//! - **One null policy** - every comparison treats absent operands the same
//!   way (see [`comparator`])
//! - **Pure functions** - the only shared state is an application-owned
//!   [`NamedNumberRegistry`]

pub mod clock;
pub mod collection;
pub mod common;
pub mod comparator;
pub mod config;
pub mod datetime;
pub mod error;
pub mod named;
pub mod number;
pub mod pattern;

// Re-export commonly used items at crate root for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use collection::{find_in_collection, is_empty, is_not_empty, Collection};
pub use common::{denullify, denullify_or};
pub use comparator::{is, Comparator, TimeComparator, TotalOrd};
pub use config::HelperConfig;
pub use datetime::{to_milliseconds, DateHelper, TimeUnit};
pub use error::{HelperError, Result};
pub use named::{NamedNumber, NamedNumberRegistry};
pub use number::{parse_double, parse_int, parse_long, ParseMode};
pub use pattern::{CommonDateTimePatterns, DatePattern};
