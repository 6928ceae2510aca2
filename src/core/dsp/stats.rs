//! Level and spectral statistics

/// Compute RMS (Root Mean Square)
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// Compute peak amplitude
pub fn peak_amplitude(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0f64, f64::max)
}

/// Convert amplitude to dB (relative to 1.0)
pub fn amplitude_to_db(amplitude: f64) -> f64 {
    if amplitude > 1e-10 {
        20.0 * amplitude.log10()
    } else {
        -200.0
    }
}

/// Convert dB to amplitude
pub fn db_to_amplitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Frequency of a spectrum bin for a transform of `fft_size` samples
pub fn bin_frequency(bin: usize, fft_size: usize, sample_rate: u32) -> f64 {
    if fft_size == 0 {
        return 0.0;
    }
    bin as f64 * sample_rate as f64 / fft_size as f64
}

/// Compute spectral centroid (brightness measure) of a one-sided magnitude
/// spectrum from a transform of `fft_size` samples
pub fn spectral_centroid(magnitudes: &[f64], fft_size: usize, sample_rate: u32) -> f64 {
    let total_energy: f64 = magnitudes.iter().sum();
    if total_energy < 1e-10 {
        return 0.0;
    }

    let weighted_sum: f64 = magnitudes
        .iter()
        .enumerate()
        .map(|(i, &m)| bin_frequency(i, fft_size, sample_rate) * m)
        .sum();

    weighted_sum / total_energy
}

/// Indices of the `count` largest local maxima, strongest first
pub fn find_peaks(magnitudes: &[f64], count: usize) -> Vec<usize> {
    let mut peaks: Vec<usize> = (0..magnitudes.len())
        .filter(|&i| {
            let left = i == 0 || magnitudes[i] > magnitudes[i - 1];
            let right = i + 1 == magnitudes.len() || magnitudes[i] >= magnitudes[i + 1];
            left && right && magnitudes[i] > 0.0
        })
        .collect();

    peaks.sort_by(|&a, &b| {
        magnitudes[b]
            .partial_cmp(&magnitudes[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    peaks.truncate(count);
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms() {
        let samples = vec![1.0, -1.0, 1.0, -1.0];
        assert!((rms(&samples) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_db_conversion() {
        assert!((amplitude_to_db(1.0)).abs() < 1e-12);
        assert!((amplitude_to_db(0.1) + 20.0).abs() < 1e-9);
        assert_eq!(amplitude_to_db(0.0), -200.0);
        assert!((db_to_amplitude(-6.0) - 0.501187).abs() < 1e-5);
    }

    #[test]
    fn test_find_peaks() {
        let mags = vec![0.0, 1.0, 0.2, 0.1, 3.0, 0.5, 0.7];
        assert_eq!(find_peaks(&mags, 2), vec![4, 1]);
        assert_eq!(find_peaks(&mags, 10), vec![4, 1, 6]);
    }

    #[test]
    fn test_centroid_single_bin() {
        let mut mags = vec![0.0; 513];
        mags[100] = 1.0;
        let c = spectral_centroid(&mags, 1024, 48000);
        assert!((c - 100.0 * 48000.0 / 1024.0).abs() < 1e-9);
    }
}
