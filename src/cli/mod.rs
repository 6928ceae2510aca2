// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

pub use args::Args;
pub use output::{format_report, print_json, print_reports};

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::AnalysisConfig;
use crate::core::decoder::is_audio_file;
use crate::core::dsp::RunningVectorAccumulator;
use crate::core::{AudioAnalyzer, SpectrumReport};

/// Run the CLI with parsed arguments
pub fn run(args: Args) -> Result<()> {
    let config = args.analysis_config()?;
    let files = collect_audio_files(&args.input);
    if files.is_empty() {
        anyhow::bail!("No audio files found in {}", args.input.display());
    }
    log::info!("Found {} audio file(s)", files.len());

    let reports = match &args.state {
        Some(state_path) => run_with_state(&files, &config, &args, state_path)?,
        None => run_parallel(&files, &config, &args),
    };

    if args.json {
        print_json(&reports)?;
    } else {
        print_reports(&reports, args.verbose);
    }
    Ok(())
}

/// Collect audio files from a file or directory path
pub fn collect_audio_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return if is_audio_file(path) {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_audio_file(p))
        .collect();
    files.sort();
    files
}

fn analyzer_for(path: &Path, config: &AnalysisConfig, args: &Args) -> Result<AudioAnalyzer> {
    AudioAnalyzer::builder()
        .config(config.clone())
        .peak_count(args.top)
        .include_spectrum(args.spectrum)
        .build(path)
}

/// Each file from an empty accumulator, files analysed in parallel.
/// Failed files are logged and skipped.
fn run_parallel(files: &[PathBuf], config: &AnalysisConfig, args: &Args) -> Vec<SpectrumReport> {
    files
        .par_iter()
        .filter_map(|path| {
            match analyzer_for(path, config, args).and_then(|a| a.analyze()) {
                Ok(report) => Some(report),
                Err(e) => {
                    log::warn!("Skipping {}: {:#}", path.display(), e);
                    None
                }
            }
        })
        .collect()
}

/// Files in order, one accumulator carried through all of them and persisted
fn run_with_state(
    files: &[PathBuf],
    config: &AnalysisConfig,
    args: &Args,
    state_path: &Path,
) -> Result<Vec<SpectrumReport>> {
    let mut state = load_state(state_path)?;
    let config = config.clone().with_replace_first(false);
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
        let result = analyzer_for(path, &config, args)
            .and_then(|a| a.analyze_with_state(state.as_ref()));
        match result {
            Ok((report, accumulator)) => {
                state = Some(accumulator);
                reports.push(report);
            }
            Err(e) => log::warn!("Skipping {}: {:#}", path.display(), e),
        }
    }

    if let Some(accumulator) = state.as_ref().filter(|a| !a.is_empty()) {
        std::fs::write(state_path, accumulator.to_text())
            .with_context(|| format!("Failed to write state: {}", state_path.display()))?;
        log::info!("Saved accumulator state to {}", state_path.display());
    }
    Ok(reports)
}

/// Load a saved accumulator; a missing file means no previous state
fn load_state(path: &Path) -> Result<Option<RunningVectorAccumulator>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state: {}", path.display()))?;
    let mut accumulator = RunningVectorAccumulator::default();
    accumulator
        .from_text(&text)
        .with_context(|| format!("Invalid state file: {}", path.display()))?;
    Ok(Some(accumulator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn test_dir(name: &str) -> PathBuf {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("target/cli-tests")
            .join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_tone(path: &Path) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..4000 {
            let t = i as f64 / 8000.0;
            let v = 0.5 * (2.0 * std::f64::consts::PI * 440.0 * t).sin();
            writer.write_sample((v * i16::MAX as f64) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_collect_ignores_non_audio() {
        assert!(collect_audio_files(Path::new("Cargo.toml")).is_empty());
        assert!(collect_audio_files(Path::new("does/not/exist")).is_empty());
    }

    #[test]
    fn test_stateful_run_skips_undecodable_file() {
        let dir = test_dir("skip-decode");
        write_tone(&dir.join("a_good.wav"));
        std::fs::write(dir.join("b_broken.wav"), b"not a wav file").unwrap();
        let state_path = dir.join("state.txt");

        let args = Args::parse_from(["freqcheck", dir.to_str().unwrap()]);
        let files = collect_audio_files(&dir);
        assert_eq!(files.len(), 2);

        let reports =
            run_with_state(&files, &AnalysisConfig::default(), &args, &state_path).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(state_path.exists());
    }

    #[test]
    fn test_stateful_run_skips_failed_analysis() {
        let dir = test_dir("skip-analysis");
        write_tone(&dir.join("tone.wav"));
        let state_path = dir.join("state.txt");

        let args = Args::parse_from(["freqcheck", dir.to_str().unwrap()]);
        let files = collect_audio_files(&dir);
        // Decodes fine, but the engine rejects the length
        let config = AnalysisConfig::default().with_fft_size(1000);

        let reports = run_with_state(&files, &config, &args, &state_path).unwrap();
        assert!(reports.is_empty());
        assert!(!state_path.exists());
    }

    #[test]
    fn test_saved_state_holds_average() {
        let dir = test_dir("average");
        write_tone(&dir.join("tone.wav"));
        let state_path = dir.join("state.txt");

        let args = Args::parse_from(["freqcheck", dir.to_str().unwrap()]);
        let files = collect_audio_files(&dir);
        let config = AnalysisConfig::default().with_fft_size(256).with_hop_size(256);
        run_with_state(&files, &config, &args, &state_path).unwrap();

        let saved = load_state(&state_path).unwrap().unwrap();
        assert_eq!(saved.count(), 1);
        // A 0.5 amplitude tone never averages above full scale
        assert!(saved.extract(true).iter().all(|&m| m <= 1.0));
    }
}
