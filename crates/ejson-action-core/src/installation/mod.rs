//! Installation of the ejson binary from its GitHub releases
//!
//! Resolution picks the release, provisioning fetches and unpacks it. Both
//! share one HTTP client and the same release coordinates.

pub mod release;
pub mod resolver;
pub mod provisioner;

pub use release::{http_client, strip_version_prefix, ReleaseDescriptor};
pub use resolver::VersionResolver;
pub use provisioner::BinaryProvisioner;
