//! Interactive runtime for the bikeshare explorer.
//!
//! Owns the prompt loop, raw-row pagination and the session state machine
//! that ties loading, filtering and reporting together.

pub mod browser;
pub mod prompt;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
