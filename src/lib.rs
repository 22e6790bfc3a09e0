//! Library crate root re-exporting the refresh pipeline modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cache;
pub mod cli;
pub mod credentials;
pub mod refresh;
