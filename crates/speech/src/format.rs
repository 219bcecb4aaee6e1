//! Audio container detection by magic bytes

/// Containers accepted by the transcription endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Flac,
    Ogg,
    Mp3,
    WebM,
}

impl AudioFormat {
    /// Identify the container of `bytes`, `None` when unrecognized
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => Some(Self::Wav),
            [b'f', b'L', b'a', b'C', ..] => Some(Self::Flac),
            [b'O', b'g', b'g', b'S', ..] => Some(Self::Ogg),
            [b'I', b'D', b'3', ..] => Some(Self::Mp3),
            // MPEG frame sync
            [0xFF, second, ..] if second & 0xE0 == 0xE0 => Some(Self::Mp3),
            // EBML header (browser MediaRecorder output)
            [0x1A, 0x45, 0xDF, 0xA3, ..] => Some(Self::WebM),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Mp3 => "mp3",
            Self::WebM => "webm",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Flac => "audio/flac",
            Self::Ogg => "audio/ogg",
            Self::Mp3 => "audio/mpeg",
            Self::WebM => "audio/webm",
        }
    }
}
