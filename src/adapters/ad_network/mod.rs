//! Ad network adapters.
//!
//! The real SDK binding lives with the host application. This module ships
//! the scriptable mock used by tests and local development.

mod mock;

pub use mock::{MockAdNetwork, MockFetch, MockSurface, NetworkCall};
