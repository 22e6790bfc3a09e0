//! Access to the AWS CLI SSO cache directory.
pub mod extractor;
pub mod locator;

pub use extractor::{extract_credentials, CachedCredentials};
pub use locator::{find_latest_artifact, find_latest_artifact_if_any, CacheArtifact};
