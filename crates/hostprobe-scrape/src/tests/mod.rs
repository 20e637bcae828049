//! Scraper falsification tests.
//!
//! | ID Range | Area |
//! |----------|------|
//! | F001-F010 | Lifecycle and partial failures |
//! | F011-F020 | Status classification and counters |


pub use mocks::MockReaders;
