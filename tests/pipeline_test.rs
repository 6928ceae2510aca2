// tests/pipeline_test.rs
//
// End-to-end analysis of generated WAV captures: decode, frame, window,
// transform and accumulate.
//
// Usage:
//   cargo test --test pipeline_test -- --nocapture

use freqcheck::cli::{format_report, Args};
use freqcheck::{AnalysisConfig, AudioAnalyzer, CaptureMode, RunningVectorAccumulator, WindowType};
use clap::Parser;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

const OUTPUT_DIR: &str = "target/pipeline-tests";
const SAMPLE_RATE: u32 = 48000;

// ============================================================================
// Fixtures
// ============================================================================

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(OUTPUT_DIR);
    std::fs::create_dir_all(&dir).expect("Failed to create test output directory");
    dir
}

/// Write a 16-bit WAV with the sum of the given (frequency, amplitude) tones
fn write_tones(path: &Path, tones: &[(f64, f64)], seconds: f64, channels: u16) {
    let spec = hound::WavSpec {
        channels,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV");
    let frames = (seconds * SAMPLE_RATE as f64) as usize;
    for i in 0..frames {
        let t = i as f64 / SAMPLE_RATE as f64;
        let value: f64 = tones
            .iter()
            .map(|(f, a)| a * (2.0 * PI * f * t).sin())
            .sum();
        let sample = (value * i16::MAX as f64) as i16;
        for _ in 0..channels {
            writer.write_sample(sample).expect("Failed to write sample");
        }
    }
    writer.finalize().expect("Failed to finalize WAV");
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn single_tone_peak_frequency() {
    let path = output_dir().join("tone_1k.wav");
    write_tones(&path, &[(1000.0, 0.5)], 1.0, 1);

    let analyzer = AudioAnalyzer::builder()
        .fft_size(4096)
        .peak_count(1)
        .build(&path)
        .unwrap();
    let report = analyzer.analyze().unwrap();

    assert_eq!(report.sample_rate, SAMPLE_RATE);
    assert_eq!(report.channels, 1);
    assert!(report.frames > 1);

    let resolution = SAMPLE_RATE as f64 / 4096.0;
    let peak = &report.peaks[0];
    assert!((peak.frequency_hz - 1000.0).abs() <= resolution);
    // 0.5 amplitude is about -6 dB; scalloping loss stays under 1.5 dB with Hanning
    assert!(peak.magnitude_db < -5.0 && peak.magnitude_db > -8.0, "{}", peak.magnitude_db);
    assert!((report.rms_db - (-9.03)).abs() < 0.2, "{}", report.rms_db);
}

#[test]
fn two_tones_ordered_by_strength() {
    let path = output_dir().join("tones_500_3k.wav");
    write_tones(&path, &[(500.0, 0.35), (3000.0, 0.6)], 0.5, 2);

    let config = AnalysisConfig::default()
        .with_fft_size(2048)
        .with_window(WindowType::HammingFlatTop)
        .with_overlap(256);
    let analyzer = AudioAnalyzer::builder()
        .config(config)
        .peak_count(2)
        .build(&path)
        .unwrap();
    let report = analyzer.analyze().unwrap();

    assert_eq!(report.channels, 2);
    let resolution = SAMPLE_RATE as f64 / 2048.0;
    assert!((report.peaks[0].frequency_hz - 3000.0).abs() <= resolution);
    assert!((report.peaks[1].frequency_hz - 500.0).abs() <= resolution);
}

#[test]
fn state_carries_between_files() {
    let dir = output_dir();
    let first = dir.join("state_a.wav");
    let second = dir.join("state_b.wav");
    write_tones(&first, &[(750.0, 0.5)], 0.25, 1);
    write_tones(&second, &[(750.0, 0.5)], 0.25, 1);

    let config = AnalysisConfig::default().with_replace_first(false);
    let a = AudioAnalyzer::builder().config(config.clone()).build(&first).unwrap();
    let (report_a, state) = a.analyze_with_state(None).unwrap();

    let text = state.to_text();
    let mut restored = RunningVectorAccumulator::new(CaptureMode::Average);
    restored.from_text(&text).unwrap();

    let b = AudioAnalyzer::builder().config(config).build(&second).unwrap();
    let (report_b, _) = b.analyze_with_state(Some(&restored)).unwrap();

    // Restored state counts as one observation
    assert_eq!(report_b.accumulated_count, 1 + report_b.frames);
    assert_eq!(report_a.accumulated_count, report_a.frames);

    // Same tone in both files, so the continued average keeps its level
    let level_a = report_a.peaks[0].magnitude_db;
    let level_b = report_b.peaks[0].magnitude_db;
    assert!((report_b.peaks[0].frequency_hz - report_a.peaks[0].frequency_hz).abs() < 1e-9);
    assert!((level_a - level_b).abs() < 0.25, "{} vs {}", level_a, level_b);
}

#[test]
fn json_report_shape() {
    let path = output_dir().join("tone_json.wav");
    write_tones(&path, &[(2000.0, 0.3)], 0.2, 1);

    let analyzer = AudioAnalyzer::builder()
        .fft_size(512)
        .include_spectrum(true)
        .build(&path)
        .unwrap();
    let report = analyzer.analyze().unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["fft_size"], 512);
    assert_eq!(json["window"], "hanning");
    assert_eq!(json["capture_mode"], "average");
    assert_eq!(json["spectrum_db"].as_array().unwrap().len(), 257);

    let text = format_report(&report, true);
    assert!(text.contains("Peaks:"));
    assert!(text.contains("Spectrum (bin, Hz, dB):"));
}

#[test]
fn cli_config_resolution() {
    let args = Args::parse_from(["freqcheck", "capture.wav", "--preset", "precise", "--overlap", "64"]);
    let config = args.analysis_config().unwrap();
    assert_eq!(config.fft_size, 4096);
    assert_eq!(config.window, WindowType::HammingFlatTop);
    assert_eq!(config.overlap, 64);
}
