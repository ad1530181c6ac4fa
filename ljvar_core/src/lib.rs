#[cfg(feature = "cli")]
pub mod args;
pub mod audio;
pub mod config;
pub mod error;
pub mod index;
pub mod layout;
pub mod manifest;
pub mod provision;

pub use audio::{AudioLoader, DecodeError, SymphoniaLoader, Waveform};
pub use config::{CorpusConfig, RatePolicy, ReleaseConfig};
pub use error::CorpusError;
pub use index::{CorpusIndex, Sample, SamplePaths};
pub use layout::CorpusLayout;
pub use manifest::ManifestEntry;
pub use provision::{LocalProvisioner, Provisioner, provision};
