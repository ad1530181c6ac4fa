use std::fmt;

use ndarray::Array2;

/// Quick sanity numbers for a decoded waveform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveStats {
    pub channels: usize,
    pub frames: usize,
    pub min: f32,
    pub max: f32,
    pub rms: f32,
    pub nan_count: usize,
}

impl WaveStats {
    pub fn of(samples: &Array2<f32>) -> Self {
        let (channels, frames) = samples.dim();
        let min = samples.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = samples.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let nan_count = samples.iter().filter(|x| x.is_nan()).count();
        let rms = if samples.is_empty() {
            0.0
        } else {
            (samples.iter().map(|x| x * x).sum::<f32>() / samples.len() as f32).sqrt()
        };
        Self {
            channels,
            frames,
            min,
            max,
            rms,
            nan_count,
        }
    }
}

impl fmt::Display for WaveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} min={:.4} max={:.4} rms={:.4} nan_count={}",
            self.channels, self.frames, self.min, self.max, self.rms, self.nan_count
        )
    }
}
