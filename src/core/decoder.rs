// src/core/decoder.rs
//
// Audio decoding into f64 samples. Uses Symphonia for format-agnostic
// decoding.

use anyhow::{bail, Context, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use std::fs::File;
use std::path::Path;

/// File extensions the decoder is expected to handle
pub const AUDIO_EXTENSIONS: [&str; 6] = ["wav", "flac", "mp3", "ogg", "m4a", "aac"];

/// Container for decoded audio data and metadata
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Interleaved samples normalized to [-1.0, 1.0]
    pub samples: Vec<f64>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of audio channels
    pub channels: usize,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Original codec name
    pub codec_name: String,
}

/// Stream properties of the track selected for decoding
struct TrackInfo {
    id: u32,
    sample_rate: u32,
    channels: usize,
    codec_name: String,
}

/// Whether `path` carries one of the supported audio extensions
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode audio file to interleaved f64 samples
pub fn decode_audio(path: &Path) -> Result<AudioData> {
    let mut format = open_format(path)?;
    let (info, mut decoder) = select_track(format.as_ref())?;

    let samples = read_samples(format.as_mut(), decoder.as_mut(), info.id, path)?;
    if samples.is_empty() {
        bail!("No audio samples decoded from file");
    }

    let duration_secs = samples.len() as f64 / (info.sample_rate as f64 * info.channels as f64);
    log::debug!(
        "Decoded {}: {} Hz, {} ch, {:.2}s ({})",
        path.display(),
        info.sample_rate,
        info.channels,
        duration_secs,
        info.codec_name
    );

    Ok(AudioData {
        samples,
        sample_rate: info.sample_rate,
        channels: info.channels,
        duration_secs,
        codec_name: info.codec_name,
    })
}

fn open_format(path: &Path) -> Result<Box<dyn FormatReader>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .context("Failed to probe file format - may be corrupted or unsupported")?;
    Ok(probed.format)
}

/// First track with a known codec, and a decoder for it
fn select_track(format: &dyn FormatReader) -> Result<(TrackInfo, Box<dyn Decoder>)> {
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No supported audio track found in file")?;
    let params = &track.codec_params;

    let sample_rate = params.sample_rate.context("File does not specify sample rate")?;
    let channels = params.channels.map(|c| c.count()).unwrap_or(1);
    if channels == 0 {
        bail!("File reports 0 audio channels");
    }

    let decoder = symphonia::default::get_codecs()
        .make(params, &DecoderOptions::default())
        .context("Failed to create decoder for audio codec")?;

    let info = TrackInfo {
        id: track.id,
        sample_rate,
        channels,
        codec_name: format!("{:?}", params.codec),
    };
    Ok((info, decoder))
}

fn is_end_of_stream(err: &SymphoniaError) -> bool {
    matches!(err, SymphoniaError::IoError(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
}

/// Pull packets for `track_id` until end of stream. Corrupt packets are skipped.
fn read_samples(
    format: &mut dyn FormatReader,
    decoder: &mut dyn Decoder,
    track_id: u32,
    path: &Path,
) -> Result<Vec<f64>> {
    let mut samples = Vec::new();
    let mut scratch: Option<SampleBuffer<f64>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(e) if is_end_of_stream(&e) => break,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(msg)) => {
                log::warn!("Skipping undecodable packet in {}: {}", path.display(), msg);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let needed = decoded.capacity() * spec.channels.count();
        if scratch.as_ref().map_or(true, |buf| buf.capacity() < needed) {
            scratch = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
        }
        if let Some(buf) = scratch.as_mut() {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }
    Ok(samples)
}

/// Extract mono samples from potentially multi-channel audio
pub fn extract_mono(audio: &AudioData) -> Vec<f64> {
    if audio.channels <= 1 {
        return audio.samples.clone();
    }

    audio
        .samples
        .chunks_exact(audio.channels)
        .map(|frame| frame.iter().sum::<f64>() / audio.channels as f64)
        .collect()
}
