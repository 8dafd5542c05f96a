use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use crate::domain::{AudioBuffer, DomainError};
use crate::ports::AudioReader;

/// General-purpose audio decoder backed by `symphonia`.
///
/// Fallback audio-loading path: handles MP3/AAC/FLAC/OGG and friends when
/// the WAV reader cannot parse the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaAudioReader;

impl AudioReader for SymphoniaAudioReader {
    fn name(&self) -> &'static str {
        "symphonia"
    }

    fn read(&self, path: &Path) -> Result<AudioBuffer, DomainError> {
        let file = File::open(path)
            .map_err(|e| DomainError::AudioDecode(format!("open {}: {}", path.display(), e)))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| DomainError::AudioDecode(format!("probe: {}", e)))?;
        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| DomainError::AudioDecode("no decodable audio track".to_string()))?;
        let track_id = track.id;

        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| DomainError::AudioDecode("unknown sample rate".to_string()))?;
        let channels = track
            .codec_params
            .channels
            .map(|c| c.count() as u16)
            .unwrap_or(1);

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| DomainError::AudioDecode(format!("codec: {}", e)))?;

        let mut interleaved: Vec<f32> = Vec::new();
        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(DomainError::AudioDecode(format!("read packet: {}", e))),
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let mut buf =
                        SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                    buf.copy_interleaved_ref(decoded);
                    interleaved.extend_from_slice(buf.samples());
                }
                // Recoverable corruption: skip the packet.
                Err(SymphoniaError::DecodeError(_)) => continue,
                Err(e) => return Err(DomainError::AudioDecode(format!("decode: {}", e))),
            }
        }

        if interleaved.is_empty() {
            return Err(DomainError::AudioDecode(
                "no audio samples decoded".to_string(),
            ));
        }

        debug!(
            path = %path.display(),
            sample_rate = sample_rate,
            channels = channels,
            samples = interleaved.len(),
            "audio decoded via symphonia"
        );

        Ok(AudioBuffer::from_interleaved(
            &interleaved,
            channels,
            sample_rate,
        ))
    }
}
