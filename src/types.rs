//! Shared types used across the ping-pong firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

/// Negotiated protocol role
///
/// Every node starts as `Initiator` and steps down to `Responder` when
/// it hears a peer already claiming the initiator role (a received
/// "PING"). An anomalous reception flips a `Responder` back to
/// `Initiator`, so the pair self-corrects within one timeout cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Role {
    /// Originates each request cycle by sending "PING" (master)
    #[default]
    Initiator,
    /// Replies to a received "PING" with "PONG" (slave)
    Responder,
}

impl Role {
    /// Get the tag this role transmits
    #[must_use]
    pub const fn tag(self) -> Tag {
        match self {
            Self::Initiator => Tag::Ping,
            Self::Responder => Tag::Pong,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Role {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Initiator => defmt::write!(f, "MASTER"),
            Self::Responder => defmt::write!(f, "SLAVE"),
        }
    }
}

/// Outbound frame tag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// Request tag, sent by the initiator
    Ping,
    /// Reply tag, sent by the responder
    Pong,
}

impl Tag {
    /// Get the 4-byte ASCII literal for this tag
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8; 4] {
        match self {
            Self::Ping => b"PING",
            Self::Pong => b"PONG",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Tag {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ping => defmt::write!(f, "PING"),
            Self::Pong => defmt::write!(f, "PONG"),
        }
    }
}

/// Pending protocol state between radio events
///
/// Produced by the last radio event and consumed (reset to `Idle`) when
/// the reaction is computed. Exactly one value is pending at a time;
/// the reaction step is the unique consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProtocolState {
    /// No event pending; waiting in low power
    #[default]
    Idle,
    /// A frame arrived and awaits classification
    FrameReceived,
    /// The bounded listen elapsed without a frame
    ReceiveTimedOut,
    /// Reception failed (CRC or header error)
    ReceiveFailed,
    /// The last transmission completed
    TransmitComplete,
    /// The last transmission timed out
    TransmitTimedOut,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ProtocolState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(f, "IDLE"),
            Self::FrameReceived => defmt::write!(f, "RX"),
            Self::ReceiveTimedOut => defmt::write!(f, "RX-TIMEOUT"),
            Self::ReceiveFailed => defmt::write!(f, "RX-ERROR"),
            Self::TransmitComplete => defmt::write!(f, "TX"),
            Self::TransmitTimedOut => defmt::write!(f, "TX-TIMEOUT"),
        }
    }
}

/// Antenna switch direction
///
/// Driven explicitly before every radio command: `Rx` before a listen,
/// `Tx` before a send, with a settle delay in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AntennaDirection {
    /// Antenna routed to the transmit path
    Tx,
    /// Antenna routed to the receive path
    Rx,
}

#[cfg(feature = "embedded")]
impl defmt::Format for AntennaDirection {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Tx => defmt::write!(f, "ANT-TX"),
            Self::Rx => defmt::write!(f, "ANT-RX"),
        }
    }
}

/// Link-quality metadata attached to a received frame
///
/// Informational only; never consulted by the state machine. Raw values
/// use the SX126x scales: RSSI in halved dBm, SNR in quarter dB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LinkQuality {
    /// Raw RSSI in halved-dBm units
    pub rssi: i16,
    /// Raw SNR in quarter-dB units
    pub snr: i8,
}

impl LinkQuality {
    /// Create a new link quality reading from raw driver values
    #[must_use]
    pub const fn new(rssi: i16, snr: i8) -> Self {
        Self { rssi, snr }
    }

    /// RSSI in whole dBm
    #[must_use]
    pub const fn rssi_dbm(self) -> i16 {
        self.rssi / 2
    }

    /// SNR in whole dB
    #[must_use]
    pub const fn snr_db(self) -> i8 {
        self.snr / 4
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LinkQuality {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} dBm / {} dB", self.rssi_dbm(), self.snr_db());
    }
}
