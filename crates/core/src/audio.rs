//! Audio chunk types and PCM frame decoding

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Sample width in bytes for signed 16-bit PCM
pub const PCM_I16_WIDTH: usize = 2;

/// Audio format expected by the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Bytes per sample
    #[serde(default = "default_sample_width")]
    pub sample_width: usize,
    /// Number of channels (1 = mono)
    #[serde(default = "default_channels")]
    pub channels: u8,
}

fn default_sample_rate() -> u32 {
    16_000
}

fn default_sample_width() -> usize {
    PCM_I16_WIDTH
}

fn default_channels() -> u8 {
    1
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            sample_width: default_sample_width(),
            channels: default_channels(),
        }
    }
}

/// One inbound unit of raw audio, decoded and tagged with its format
///
/// The relay performs no resampling or channel mixing; the sender is
/// responsible for audio already in the expected format.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioChunk {
    /// Decode a raw inbound byte buffer as signed 16-bit little-endian PCM.
    ///
    /// Fails fast when the buffer length is not a whole multiple of the
    /// sample width; a malformed frame is surfaced, never truncated.
    pub fn from_pcm_bytes(bytes: &[u8], format: AudioFormat) -> Result<Self, CoreError> {
        if format.sample_width != PCM_I16_WIDTH {
            return Err(CoreError::UnsupportedFormat(format!(
                "sample width {} (only {}-byte PCM is supported)",
                format.sample_width, PCM_I16_WIDTH
            )));
        }
        if bytes.len() % format.sample_width != 0 {
            return Err(CoreError::MalformedFrame {
                len: bytes.len(),
                width: format.sample_width,
            });
        }
        Ok(Self {
            data: bytes.to_vec(),
            format,
        })
    }

    /// Raw sample bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Format metadata carried to the recognizer
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Total samples across all channels
    pub fn sample_count(&self) -> usize {
        self.data.len() / self.format.sample_width
    }

    /// Decoded i16 sample view
    pub fn samples(&self) -> Vec<i16> {
        self.data
            .chunks_exact(PCM_I16_WIDTH)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }

    /// Chunk duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        let frames = self.sample_count() as u64 / self.format.channels.max(1) as u64;
        frames * 1000 / self.format.sample_rate.max(1) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_default() {
        let format = AudioFormat::default();
        assert_eq!(format.sample_rate, 16_000);
        assert_eq!(format.sample_width, 2);
        assert_eq!(format.channels, 1);
    }

    #[test]
    fn test_decode_valid_frame() {
        // 1 s of mono 16 kHz int16
        let bytes = vec![0u8; 32_000];
        let chunk = AudioChunk::from_pcm_bytes(&bytes, AudioFormat::default()).unwrap();
        assert_eq!(chunk.sample_count(), 16_000);
        assert_eq!(chunk.duration_ms(), 1000);
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        let bytes = vec![0u8; 31];
        let err = AudioChunk::from_pcm_bytes(&bytes, AudioFormat::default()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::MalformedFrame { len: 31, width: 2 }
        ));
    }

    #[test]
    fn test_decode_rejects_unsupported_width() {
        let format = AudioFormat {
            sample_width: 4,
            ..AudioFormat::default()
        };
        let err = AudioChunk::from_pcm_bytes(&[0u8; 8], format).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_samples_little_endian() {
        let chunk =
            AudioChunk::from_pcm_bytes(&[0x01, 0x00, 0xFF, 0xFF], AudioFormat::default()).unwrap();
        assert_eq!(chunk.samples(), vec![1, -1]);
    }

    #[test]
    fn test_duration_accounts_for_channels() {
        let format = AudioFormat {
            channels: 2,
            ..AudioFormat::default()
        };
        let chunk = AudioChunk::from_pcm_bytes(&vec![0u8; 64_000], format).unwrap();
        assert_eq!(chunk.duration_ms(), 1000);
    }
}
