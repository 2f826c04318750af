//! Frame Codec
//!
//! Serializes a tag plus deterministic filler into a fixed-capacity
//! buffer, and classifies received buffers by exact 4-byte prefix
//! comparison. Independent of the state machine's decision logic.

use heapless::Vec;

use crate::config::MAX_PAYLOAD;
use crate::types::{LinkQuality, Tag};

/// Length of the ASCII tag at the start of every frame
pub const TAG_LEN: usize = 4;

/// Classification of a received buffer's tag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// Frame starts with the literal "PING"
    Ping,
    /// Frame starts with the literal "PONG"
    Pong,
    /// Anything else, including frames shorter than the tag
    Other,
}

impl From<Tag> for FrameKind {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Ping => Self::Ping,
            Tag::Pong => Self::Pong,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FrameKind {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ping => defmt::write!(f, "PING"),
            Self::Pong => defmt::write!(f, "PONG"),
            Self::Other => defmt::write!(f, "OTHER"),
        }
    }
}

/// Classify a received buffer by its first 4 bytes
///
/// Case-sensitive exact comparison against the tag literals; bytes
/// beyond the tag are never inspected. Buffers shorter than 4 bytes
/// cannot match and classify as [`FrameKind::Other`].
#[must_use]
pub fn classify(bytes: &[u8]) -> FrameKind {
    if bytes.len() < TAG_LEN {
        return FrameKind::Other;
    }
    match &bytes[..TAG_LEN] {
        b"PING" => FrameKind::Ping,
        b"PONG" => FrameKind::Pong,
        _ => FrameKind::Other,
    }
}

/// Build an outbound frame: tag literal followed by deterministic filler
///
/// Filler byte at frame position `i` (for `i` in `4..len`) is `i - 4`,
/// so the payload is fully reproducible from `len` alone. `len` is
/// clamped to [`MAX_PAYLOAD`]; lengths below the tag size are not
/// exercised by the protocol and simply truncate the tag.
#[must_use]
pub fn encode(tag: Tag, len: u16) -> Vec<u8, MAX_PAYLOAD> {
    let len = (len as usize).min(MAX_PAYLOAD);
    let mut bytes: Vec<u8, MAX_PAYLOAD> = Vec::new();
    let _ = bytes.extend_from_slice(&tag.as_bytes()[..TAG_LEN.min(len)]);
    for i in TAG_LEN..len {
        let _ = bytes.push((i - TAG_LEN) as u8);
    }
    bytes
}

/// A received frame with its link-quality metadata
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, MAX_PAYLOAD>,
    quality: LinkQuality,
}

impl Frame {
    /// Capture a frame from the receive buffer handed up by the driver
    ///
    /// Bytes beyond [`MAX_PAYLOAD`] are dropped; the radio is configured
    /// with the same maximum, so truncation only occurs on a misbehaving
    /// driver.
    #[must_use]
    pub fn from_received(bytes: &[u8], quality: LinkQuality) -> Self {
        let take = bytes.len().min(MAX_PAYLOAD);
        let mut buf: Vec<u8, MAX_PAYLOAD> = Vec::new();
        let _ = buf.extend_from_slice(&bytes[..take]);
        Self { bytes: buf, quality }
    }

    /// Classify this frame's tag
    #[must_use]
    pub fn kind(&self) -> FrameKind {
        classify(&self.bytes)
    }

    /// Frame length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check whether the frame is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw frame bytes
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Link quality observed during reception
    #[must_use]
    pub const fn quality(&self) -> LinkQuality {
        self.quality
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Frame({}, {}B, {})", self.kind(), self.len(), self.quality);
    }
}
