//! Clock port - source of the current time.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
///
/// Recording adapters take a clock so elapsed times can be asserted
/// deterministically in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
