//! Backend test support utilities
//!
//! Shared by the backend's integration test binaries. Currently this is the
//! logging bootstrap; fixture builders live next to the tests that use them.

pub mod logging;
