use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use ndarray::Array2;
use symphonia::core::{
    audio::SampleBuffer,
    codecs::{CODEC_TYPE_NULL, DecoderOptions},
    errors::Error as SymphoniaError,
    formats::FormatOptions,
    io::MediaSourceStream,
    meta::MetadataOptions,
    probe::Hint,
};
use thiserror::Error;
use tracing::trace;

use super::{AudioLoader, Waveform};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open audio file: {0}")]
    Open(#[source] std::io::Error),
    #[error("unsupported format or failed to probe container: {0}")]
    Probe(#[source] SymphoniaError),
    #[error("no supported audio tracks found")]
    NoTrack,
    #[error("codec error: {0}")]
    Codec(#[source] SymphoniaError),
    #[error("decoder reset required (chained streams are not supported)")]
    ResetRequired,
    #[error("could not determine sample rate or channel count")]
    UnknownSpec,
    #[error("decoded audio was empty")]
    Empty,
    #[error("sample layout error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Decodes any container symphonia's default registry understands, at the
/// file's native rate and channel count.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaLoader;

impl AudioLoader for SymphoniaLoader {
    fn load(&self, path: &Path) -> Result<Waveform, DecodeError> {
        decode_file(path)
    }
}

/// Decode an audio file into a channel-first [`Waveform`].
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Waveform, DecodeError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(DecodeError::Open)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(DecodeError::Probe)?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoTrack)?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(DecodeError::Codec)?;

    let mut interleaved: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => return Err(DecodeError::ResetRequired),
            Err(e) => return Err(DecodeError::Codec(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            // Corrupt packet: skip it, the rest of the stream may still be usable.
            Err(SymphoniaError::DecodeError(msg)) => {
                trace!(path = %path.display(), msg, "skipping undecodable packet");
                continue;
            }
            Err(SymphoniaError::ResetRequired) => return Err(DecodeError::ResetRequired),
            Err(e) => return Err(DecodeError::Codec(e)),
        };

        sample_rate.get_or_insert(decoded.spec().rate);
        channels.get_or_insert(decoded.spec().channels.count());

        let mut sbuf = SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
        sbuf.copy_interleaved_ref(decoded);
        interleaved.extend_from_slice(sbuf.samples());
    }

    let (Some(sample_rate), Some(channels)) = (sample_rate, channels) else {
        return Err(DecodeError::UnknownSpec);
    };
    if channels == 0 {
        return Err(DecodeError::UnknownSpec);
    }
    if interleaved.is_empty() {
        return Err(DecodeError::Empty);
    }

    Ok(Waveform {
        samples: deinterleave(interleaved, channels)?,
        sample_rate,
    })
}

/// `[l0, r0, l1, r1, ..]` into rows `[[l0, l1, ..], [r0, r1, ..]]`.
/// A trailing partial frame is dropped.
fn deinterleave(mut interleaved: Vec<f32>, channels: usize) -> Result<Array2<f32>, DecodeError> {
    let frames = interleaved.len() / channels;
    interleaved.truncate(frames * channels);
    let by_frame = Array2::from_shape_vec((frames, channels), interleaved)?;
    Ok(by_frame.t().as_standard_layout().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn write_wav(path: &Path, channels: u16, rate: u32, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for s in samples {
            writer.write_sample(*s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn deinterleave_splits_channels() {
        let out = deinterleave(vec![1.0, 2.0, 3.0, 4.0, 5.0], 2).unwrap();
        assert_eq!(out, array![[1.0, 3.0], [2.0, 4.0]]);
    }

    #[test]
    fn decodes_mono_wav_at_native_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 1, 22_050, &[0, 16_384, -16_384, 0]);

        let wav = decode_file(&path).unwrap();
        assert_eq!(wav.sample_rate, 22_050);
        assert_eq!(wav.samples.dim(), (1, 4));
        assert!((wav.samples[[0, 1]] - 0.5).abs() < 1e-3);
        assert!((wav.samples[[0, 2]] + 0.5).abs() < 1e-3);
    }

    #[test]
    fn decodes_stereo_channel_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav(&path, 2, 16_000, &[16_384, 0, 16_384, 0, 16_384, 0]);

        let wav = SymphoniaLoader.load(&path).unwrap();
        assert_eq!(wav.sample_rate, 16_000);
        assert_eq!(wav.samples.dim(), (2, 3));
        assert!(wav.samples.row(0).iter().all(|s| (s - 0.5).abs() < 1e-3));
        assert!(wav.samples.row(1).iter().all(|s| *s == 0.0));
    }

    #[test]
    fn missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_file(dir.path().join("nope.wav")).unwrap_err();
        assert!(matches!(err, DecodeError::Open(_)));
    }

    #[test]
    fn garbage_is_probe_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.wav");
        std::fs::write(&path, b"definitely not a riff header").unwrap();
        let err = decode_file(&path).unwrap_err();
        assert!(matches!(err, DecodeError::Probe(_)));
    }
}
