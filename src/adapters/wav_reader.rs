use std::path::Path;

use tracing::debug;

use crate::domain::{AudioBuffer, DomainError};
use crate::ports::AudioReader;

/// WAV file reader backed by `hound`. Primary audio-loading path: fast and
/// dependency-light, but limited to RIFF/WAV input.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoundWavReader;

impl AudioReader for HoundWavReader {
    fn name(&self) -> &'static str {
        "wav"
    }

    fn read(&self, path: &Path) -> Result<AudioBuffer, DomainError> {
        let mut reader = hound::WavReader::open(path)
            .map_err(|e| DomainError::AudioDecode(format!("open {}: {}", path.display(), e)))?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| DomainError::AudioDecode(e.to_string()))?,
            hound::SampleFormat::Int => {
                let bits = spec.bits_per_sample;
                if bits == 0 || bits > 32 {
                    return Err(DomainError::AudioDecode(format!(
                        "unsupported PCM bit depth: {}",
                        bits
                    )));
                }
                let denom = (1u64 << (bits - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / denom))
                    .collect::<Result<_, _>>()
                    .map_err(|e| DomainError::AudioDecode(e.to_string()))?
            }
        };

        debug!(
            path = %path.display(),
            sample_rate = spec.sample_rate,
            channels = spec.channels,
            samples = samples.len(),
            "WAV decoded"
        );

        Ok(AudioBuffer::from_interleaved(
            &samples,
            spec.channels,
            spec.sample_rate,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn write_test_wav(path: &Path, sample_rate: u32, channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..(sample_rate / 10) {
            for _ in 0..channels {
                let t = i as f32 / sample_rate as f32;
                let sample = (t * 440.0 * 2.0 * std::f32::consts::PI).sin();
                writer.write_sample((sample * i16::MAX as f32) as i16).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_reads_mono_wav() {
        let path = env::temp_dir().join("parscribe_wav_reader_mono.wav");
        write_test_wav(&path, 16_000, 1);

        let buffer = HoundWavReader.read(&path).unwrap();
        assert_eq!(buffer.sample_rate(), 16_000);
        assert_eq!(buffer.len(), 1_600);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_downmixes_stereo_wav() {
        let path = env::temp_dir().join("parscribe_wav_reader_stereo.wav");
        write_test_wav(&path, 44_100, 2);

        let buffer = HoundWavReader.read(&path).unwrap();
        assert_eq!(buffer.sample_rate(), 44_100);
        assert_eq!(buffer.len(), 4_410);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let result = HoundWavReader.read(Path::new("/nonexistent/audio.wav"));
        assert!(matches!(result, Err(DomainError::AudioDecode(_))));
    }
}
