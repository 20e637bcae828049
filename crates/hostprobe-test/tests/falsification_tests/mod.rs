//! Popperian Falsification Tests for hostprobe
//!
//! | Category | ID Range | Description |
//! |----------|----------|-------------|
//! | A | F001-F020 | Resource detection |
//! | B | F021-F040 | Processes scraping |
//! | C | F041-F050 | Configuration |

// Allow test-specific patterns that are denied in production code
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod config;
mod detector;
mod scraper;
