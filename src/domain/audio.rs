use zeroize::Zeroize;

/// Sample rate expected by the whisper backend.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Decoded audio, mono f32 in [-1, 1], securely zeroed on drop.
/// Audio data never touches disk and is cleared from memory after transcription.
#[derive(Debug, Zeroize)]
#[zeroize(drop)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a buffer from mono samples at the given rate.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Downmix interleaved multi-channel samples to mono by averaging frames.
    pub fn from_interleaved(samples: &[f32], channels: u16, sample_rate: u32) -> Self {
        let channels = channels.max(1) as usize;
        if channels == 1 {
            return Self::from_mono(samples.to_vec(), sample_rate);
        }
        let mono = samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();
        Self::from_mono(mono, sample_rate)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Linearly resample to `target_rate`. Returns the buffer unchanged when
    /// the rate already matches. Quality is sufficient for speech recognition
    /// input; this is not a general-purpose resampler.
    pub fn resampled(&self, target_rate: u32) -> AudioBuffer {
        if self.sample_rate == target_rate || self.samples.is_empty() {
            return AudioBuffer::from_mono(self.samples.clone(), target_rate.max(1));
        }

        let ratio = self.sample_rate as f64 / target_rate as f64;
        let out_len = ((self.samples.len() as f64) / ratio).round() as usize;
        let mut out = Vec::with_capacity(out_len);

        for i in 0..out_len {
            let pos = i as f64 * ratio;
            let idx = pos as usize;
            let frac = (pos - idx as f64) as f32;
            let a = self.samples[idx.min(self.samples.len() - 1)];
            let b = self.samples[(idx + 1).min(self.samples.len() - 1)];
            out.push(a + (b - a) * frac);
        }

        AudioBuffer::from_mono(out, target_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_interleaved_downmixes_stereo() {
        let buffer = AudioBuffer::from_interleaved(&[1.0, 0.0, 0.5, 0.5], 2, 44_100);
        assert_eq!(buffer.samples(), &[0.5, 0.5]);
        assert_eq!(buffer.sample_rate(), 44_100);
    }

    #[test]
    fn test_duration() {
        let buffer = AudioBuffer::from_mono(vec![0.0; 16_000], WHISPER_SAMPLE_RATE);
        assert!((buffer.duration_secs() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_resample_halves_length() {
        let buffer = AudioBuffer::from_mono(vec![0.5; 32_000], 32_000);
        let resampled = buffer.resampled(WHISPER_SAMPLE_RATE);
        assert_eq!(resampled.sample_rate(), WHISPER_SAMPLE_RATE);
        let len = resampled.len() as i64;
        assert!((len - 16_000).abs() <= 1, "unexpected length {}", len);
        assert!(resampled.samples().iter().all(|&s| (s - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_resample_same_rate_is_identity() {
        let buffer = AudioBuffer::from_mono(vec![0.1, 0.2, 0.3], WHISPER_SAMPLE_RATE);
        let resampled = buffer.resampled(WHISPER_SAMPLE_RATE);
        assert_eq!(resampled.samples(), buffer.samples());
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = AudioBuffer::from_mono(Vec::new(), WHISPER_SAMPLE_RATE);
        assert!(buffer.is_empty());
        assert_eq!(buffer.resampled(8_000).len(), 0);
    }
}
