pub mod decoder;

use std::path::Path;

use ndarray::Array2;

pub use decoder::{DecodeError, SymphoniaLoader};

/// Decoded audio: channel-first float samples plus the rate they were encoded at.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Shape `(channels, frames)`, values nominally in `[-1.0, 1.0]`.
    pub samples: Array2<f32>,
    pub sample_rate: u32,
}

/// Anything that can turn a path on disk into a [`Waveform`].
///
/// The index calls this three times per lookup and never caches the result.
pub trait AudioLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Waveform, DecodeError>;
}

impl<L: AudioLoader + ?Sized> AudioLoader for &L {
    fn load(&self, path: &Path) -> Result<Waveform, DecodeError> {
        (**self).load(path)
    }
}

