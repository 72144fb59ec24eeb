//! Click sounds — synthesis and WAV loading.
//!
//! The default high/low pair is synthesized: a short sine burst with an
//! exponential decay and a seeded noise attack for bite. A custom pair can
//! be loaded from WAV files instead; those are mixed down to mono and
//! resampled to the output rate.

use std::path::Path;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::clock::CLICK_SECONDS;

/// Pitch of the synthesized accent click (A7).
pub const HIGH_HZ: f64 = 3520.0;
/// Pitch of the synthesized normal click (A6).
pub const LOW_HZ: f64 = 1760.0;

/// Errors when loading click sounds from disk.
#[derive(Debug)]
pub enum ClickError {
    /// WAV decoding or I/O error.
    Wav(hound::Error),
    /// The WAV file contains no samples.
    Empty,
}

impl std::fmt::Display for ClickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClickError::Wav(e) => write!(f, "WAV error: {e}"),
            ClickError::Empty => write!(f, "WAV file contains no samples"),
        }
    }
}

impl std::error::Error for ClickError {}

impl From<hound::Error> for ClickError {
    fn from(e: hound::Error) -> Self {
        ClickError::Wav(e)
    }
}

/// A mono click at a known sample rate.
#[derive(Debug, Clone)]
pub struct ClickSound {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl ClickSound {
    /// Wrap raw mono samples.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Synthesize a click at `freq_hz`.
    pub fn synth(freq_hz: f64, sample_rate: u32, seed: u64) -> Self {
        Self::from_mono(generate_click(freq_hz, sample_rate, seed), sample_rate)
    }

    /// Load a WAV file, converting to mono f32 at `target_rate`.
    ///
    /// Integer and float formats are both accepted. Multi-channel files are
    /// mixed down by averaging; a differing source rate is bridged with
    /// linear-interpolation resampling.
    pub fn from_wav(path: &Path, target_rate: u32) -> Result<Self, ClickError> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let channels = spec.channels as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let full_scale = (1u32 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<Result<_, _>>()?
            }
        };

        if interleaved.is_empty() {
            return Err(ClickError::Empty);
        }

        let mono: Vec<f32> = interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();

        Ok(Self {
            samples: resample(&mono, spec.sample_rate, target_rate),
            sample_rate: target_rate,
        })
    }

    /// The mono sample buffer.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Take the samples, for shipping to the mixer.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

/// Generate one click: a sine at `freq_hz` lasting [`CLICK_SECONDS`], with
/// exponential amplitude decay and a seeded noise transient on the attack.
pub fn generate_click(freq_hz: f64, sample_rate: u32, seed: u64) -> Vec<f32> {
    let num_samples = (sample_rate as f64 * CLICK_SECONDS) as usize;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut output = Vec::with_capacity(num_samples);
    let mut phase = 0.0_f64;

    for i in 0..num_samples {
        let norm = i as f64 / num_samples as f64;

        let amp = (-norm * 6.0).exp();
        phase += freq_hz / sample_rate as f64;
        let tone = (phase * 2.0 * std::f64::consts::PI).sin();

        // Noise dies out within the first fifth of the click.
        let noise: f64 = rng.gen_range(-1.0..1.0) * (-norm * 30.0).exp();

        output.push(((tone * 0.8 + noise * 0.2) * amp) as f32);
    }

    output
}

/// Load the conventional `high.wav` / `low.wav` pair from `dir`.
pub fn load_pair(dir: &Path, target_rate: u32) -> Result<(ClickSound, ClickSound), ClickError> {
    let high = ClickSound::from_wav(&dir.join("high.wav"), target_rate)?;
    let low = ClickSound::from_wav(&dir.join("low.wav"), target_rate)?;
    Ok((high, low))
}

/// Synthesize the default high/low pair at [`HIGH_HZ`] and [`LOW_HZ`].
pub fn default_pair(sample_rate: u32, seed: u64) -> (ClickSound, ClickSound) {
    (
        ClickSound::synth(HIGH_HZ, sample_rate, seed),
        ClickSound::synth(LOW_HZ, sample_rate, seed.wrapping_add(1)),
    )
}

/// Linear-interpolation resample from `source_rate` to `target_rate`.
fn resample(input: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if input.len() < 2 || source_rate == target_rate {
        return input.to_vec();
    }

    let step = source_rate as f64 / target_rate as f64;
    let output_len = (input.len() as f64 / step).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let pos = i as f64 * step;
            let idx = pos as usize;
            let frac = (pos - idx as f64) as f32;
            match input.get(idx + 1) {
                Some(&next) => input[idx] * (1.0 - frac) + next * frac,
                None => input[input.len() - 1],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: u32 = 44100;
    const SEED: u64 = 42;

    fn rms(samples: &[f32]) -> f32 {
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    }

    #[test]
    fn click_has_the_nominal_length() {
        let click = generate_click(HIGH_HZ, SR, SEED);
        assert_eq!(click.len(), (SR as f64 * CLICK_SECONDS) as usize);
    }

    #[test]
    fn click_not_silent() {
        let click = generate_click(HIGH_HZ, SR, SEED);
        assert!(click.iter().any(|&s| s.abs() > 0.01));
    }

    #[test]
    fn click_peak_within_bounds() {
        for &freq in &[HIGH_HZ, LOW_HZ] {
            for &s in &generate_click(freq, SR, SEED) {
                assert!((-1.0..=1.0).contains(&s), "sample out of bounds: {s}");
            }
        }
    }

    #[test]
    fn click_starts_loud_ends_quiet() {
        let click = generate_click(LOW_HZ, SR, SEED);
        let first = &click[..click.len() / 4];
        let last = &click[click.len() * 3 / 4..];
        assert!(rms(first) > rms(last) * 2.0);
    }

    #[test]
    fn same_seed_is_deterministic() {
        assert_eq!(
            generate_click(HIGH_HZ, SR, SEED),
            generate_click(HIGH_HZ, SR, SEED)
        );
    }

    #[test]
    fn high_and_low_differ() {
        let (high, low) = default_pair(SR, SEED);
        assert_eq!(high.len(), low.len());
        assert_ne!(high.samples(), low.samples());
        assert_eq!(high.sample_rate(), SR);
    }

    #[test]
    fn from_mono_stores_samples() {
        let click = ClickSound::from_mono(vec![0.1, 0.2], 22050);
        assert_eq!(click.samples(), &[0.1, 0.2]);
        assert_eq!(click.len(), 2);
        assert!(!click.is_empty());
        assert_eq!(click.sample_rate(), 22050);
        assert_eq!(click.into_samples(), vec![0.1, 0.2]);
    }

    /// Helper: write a 16-bit WAV into `dir` and return its path.
    fn write_wav_16bit(
        dir: &std::path::Path,
        name: &str,
        samples: &[i16],
        sample_rate: u32,
        channels: u16,
    ) -> std::path::PathBuf {
        let path = dir.join(name);
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    /// Helper: write a 32-bit float WAV into `dir` and return its path.
    fn write_wav_f32(
        dir: &std::path::Path,
        name: &str,
        samples: &[f32],
        sample_rate: u32,
        channels: u16,
    ) -> std::path::PathBuf {
        let path = dir.join(name);
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn from_wav_mono_16bit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_wav_16bit(dir.path(), "c.wav", &[0, 16384, -16384], SR, 1);
        let click = ClickSound::from_wav(&path, SR).unwrap();
        assert_eq!(click.len(), 3);
        assert!(click.samples()[0].abs() < 1e-6);
        assert!((click.samples()[1] - 0.5).abs() < 1e-3);
        assert!((click.samples()[2] + 0.5).abs() < 1e-3);
    }

    #[test]
    fn from_wav_stereo_averages_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_wav_f32(dir.path(), "c.wav", &[0.8, 0.2, -0.4, -0.6], SR, 2);
        let click = ClickSound::from_wav(&path, SR).unwrap();
        assert_eq!(click.len(), 2);
        assert!((click.samples()[0] - 0.5).abs() < 1e-6);
        assert!((click.samples()[1] + 0.5).abs() < 1e-6);
    }

    #[test]
    fn from_wav_resamples_to_target_rate() {
        let dir = tempfile::tempdir().unwrap();
        let src: Vec<f32> = (0..100).map(|i| (i as f32 / 10.0).sin()).collect();
        let path = write_wav_f32(dir.path(), "c.wav", &src, 22050, 1);
        let click = ClickSound::from_wav(&path, SR).unwrap();
        assert!(click.len() >= 190 && click.len() <= 210);
        assert_eq!(click.sample_rate(), SR);
    }

    #[test]
    fn from_wav_missing_file_is_a_wav_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClickSound::from_wav(&dir.path().join("nope.wav"), SR).unwrap_err();
        assert!(matches!(err, ClickError::Wav(_)));
    }

    #[test]
    fn from_wav_zero_samples_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_wav_16bit(dir.path(), "c.wav", &[], SR, 1);
        let err = ClickSound::from_wav(&path, SR).unwrap_err();
        assert!(matches!(err, ClickError::Empty));
    }

    #[test]
    fn load_pair_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        write_wav_16bit(dir.path(), "high.wav", &[16384; 8], SR, 1);
        write_wav_16bit(dir.path(), "low.wav", &[-16384; 4], SR, 1);
        let (high, low) = load_pair(dir.path(), SR).unwrap();
        assert_eq!(high.len(), 8);
        assert_eq!(low.len(), 4);
        assert!(high.samples()[0] > 0.0);
        assert!(low.samples()[0] < 0.0);
    }

    #[test]
    fn load_pair_fails_when_one_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        write_wav_16bit(dir.path(), "high.wav", &[100; 4], SR, 1);
        assert!(load_pair(dir.path(), SR).is_err());
    }

    #[test]
    fn resample_identity_at_equal_rates() {
        let input = vec![0.1, 0.2, 0.3];
        assert_eq!(resample(&input, SR, SR), input);
    }

    #[test]
    fn resample_double_rate_roughly_doubles_length() {
        let input: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let output = resample(&input, 22050, 44100);
        assert!(output.len() >= 190 && output.len() <= 210);
        assert!((output[0] - input[0]).abs() < 1e-6);
    }

    #[test]
    fn resample_half_rate_roughly_halves_length() {
        let input: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let output = resample(&input, 44100, 22050);
        assert!(output.len() >= 45 && output.len() <= 55);
    }

    #[test]
    fn error_messages() {
        assert_eq!(ClickError::Empty.to_string(), "WAV file contains no samples");
        let err = ClickSound::from_wav(std::path::Path::new("/definitely/not/here.wav"), SR)
            .unwrap_err();
        assert!(err.to_string().starts_with("WAV error:"));
    }
}
