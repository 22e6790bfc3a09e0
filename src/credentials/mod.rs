//! Credentials file model: the ordered section store, the fan-out table and the merge-writer.
pub mod fanout;
pub mod merger;
pub mod store;
pub mod triple;

pub use fanout::{FanoutPolicy, SANDBOX_ALIAS};
pub use merger::{CredentialsFile, MergeOutcome};
pub use store::{BlankLines, CredentialsStore};
pub use triple::CredentialTriple;
