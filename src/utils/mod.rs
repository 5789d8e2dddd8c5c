//! Various unsorted numerical helpers.

pub use self::inv::inv;

mod inv;
