//! Output formatting for CLI results

use colorful::Colorful;

use crate::core::SpectrumReport;

/// Format one report for terminal output
pub fn format_report(report: &SpectrumReport, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", report.file_path.as_str().cyan().bold()));
    output.push_str(&format!(
        "  {} Hz, {} ch, {:.2}s\n",
        report.sample_rate, report.channels, report.duration_secs
    ));
    output.push_str(&format!(
        "  Level: {:.1} dB RMS, {:.1} dB peak\n",
        report.rms_db, report.peak_db
    ));

    if report.peaks.is_empty() {
        output.push_str(&format!("  {}\n", "No spectral peaks found".yellow()));
    } else {
        output.push_str("  Peaks:\n");
        for peak in &report.peaks {
            output.push_str(&format!(
                "    {:>10.1} Hz  {}\n",
                peak.frequency_hz,
                format!("{:>7.1} dB", peak.magnitude_db).green()
            ));
        }
    }

    if verbose {
        output.push_str("\n  Analysis:\n");
        output.push_str(&format!(
            "    FFT: {} points, {} window, {} mode\n",
            report.fft_size,
            report.window.name(),
            report.capture_mode.name()
        ));
        output.push_str(&format!(
            "    Frames: {} (accumulated: {})\n",
            report.frames, report.accumulated_count
        ));
        output.push_str(&format!("    Spectral centroid: {:.0} Hz\n", report.centroid_hz));
    }

    if let Some(spectrum) = &report.spectrum_db {
        output.push_str("\n  Spectrum (bin, Hz, dB):\n");
        let resolution = report.sample_rate as f64 / report.fft_size as f64;
        for (bin, db) in spectrum.iter().enumerate() {
            output.push_str(&format!(
                "    {:>5} {:>10.1} {:>8.1}\n",
                bin,
                bin as f64 * resolution,
                db
            ));
        }
    }

    output
}

/// Print reports as a JSON array
pub fn print_json(reports: &[SpectrumReport]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(reports)?);
    Ok(())
}

/// Print reports for the terminal
pub fn print_reports(reports: &[SpectrumReport], verbose: bool) {
    for report in reports {
        println!("{}", format_report(report, verbose));
    }
}
