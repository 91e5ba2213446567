//! Presentation arithmetic for findbig.
//!
//! - **Size units** - convert byte counts to `B`/`K`/`M`/`G`/`T` magnitudes
//! - **Ages** - express the time since a timestamp in the largest fitting unit
//!
//! ```rust
//! use findbig_analyze::{ByteUnit, HumanSize};
//!
//! let size = HumanSize::from_bytes(1536);
//! assert_eq!(size.unit, ByteUnit::K);
//! assert_eq!(size.to_string(), "1.5K");
//! ```

pub mod age;
mod units;

pub use age::{Age, AgeUnit, age_since, format_age};
pub use units::{ByteUnit, HumanSize};
