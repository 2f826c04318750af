//! Role/Exchange State Machine
//!
//! Owns the node's role belief and decides, for each radio event, the
//! next radio command and role transition. Implements immutable state
//! transitions for predictable behavior: `react` is pure, so the whole
//! arbitration logic is unit-testable without radio hardware.
//!
//! The only symmetry-breaking information available is *who transmits
//! "PING" first and is heard doing so*. A node that starts as initiator,
//! listens, and hears "PING" infers a peer already occupies that role
//! and steps down to responder. If both peers transmit before either
//! listens, both may keep or both may drop the initiator role; any
//! anomalous reception resets the observer to initiator, so the pair
//! recovers within one timeout cycle.

use crate::config::{MAX_PAYLOAD, RX_TIMEOUT_MS};
use crate::frame::{Frame, FrameKind};
use crate::types::{AntennaDirection, ProtocolState, Role, Tag};

/// Event raised by the radio collaborator
///
/// Exactly one arrives per outstanding radio operation; the driver
/// guarantees no two events overlap without an intervening command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RadioEvent {
    /// The outstanding transmission completed
    TransmitDone,
    /// The outstanding transmission timed out
    TransmitTimeout,
    /// A frame was received
    ReceiveDone(Frame),
    /// The bounded listen elapsed without a frame
    ReceiveTimeout,
    /// Reception failed (CRC or header error)
    ReceiveError,
}

impl RadioEvent {
    /// The protocol state this event leaves pending
    #[must_use]
    pub const fn phase(&self) -> ProtocolState {
        match self {
            Self::TransmitDone => ProtocolState::TransmitComplete,
            Self::TransmitTimeout => ProtocolState::TransmitTimedOut,
            Self::ReceiveDone(_) => ProtocolState::FrameReceived,
            Self::ReceiveTimeout => ProtocolState::ReceiveTimedOut,
            Self::ReceiveError => ProtocolState::ReceiveFailed,
        }
    }
}

/// Radio command requested by the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Build and send a tagged frame of the given length
    Transmit {
        /// Tag to place in the first 4 bytes
        tag: Tag,
        /// Total frame length including the tag
        len: u16,
    },
    /// Enter receive mode with a bounded timeout
    Listen {
        /// Receive timeout in milliseconds
        timeout_ms: u32,
    },
}

/// One reaction of the state machine: a command plus the antenna
/// direction that must be driven (and settled) before issuing it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Action {
    /// Antenna switch position required by the command
    pub antenna: AntennaDirection,
    /// The radio command to issue
    pub command: Command,
}

impl Action {
    /// Send a tagged frame
    #[must_use]
    pub const fn send(tag: Tag, len: u16) -> Self {
        Self {
            antenna: AntennaDirection::Tx,
            command: Command::Transmit { tag, len },
        }
    }

    /// Listen with the configured bounded timeout
    #[must_use]
    pub const fn listen() -> Self {
        Self {
            antenna: AntennaDirection::Rx,
            command: Command::Listen {
                timeout_ms: RX_TIMEOUT_MS,
            },
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Action {
    fn format(&self, f: defmt::Formatter) {
        match self.command {
            Command::Transmit { tag, len } => defmt::write!(f, "send {} ({}B)", tag, len),
            Command::Listen { timeout_ms } => defmt::write!(f, "listen {}ms", timeout_ms),
        }
    }
}

/// Complete exchange state (immutable)
///
/// A single owned value; the event-reaction path is the only writer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkState {
    role: Role,
    phase: ProtocolState,
    payload_len: u16,
}

impl LinkState {
    /// Create a fresh state: initiator, idle, full-size frames
    #[must_use]
    pub const fn new() -> Self {
        Self {
            role: Role::Initiator,
            phase: ProtocolState::Idle,
            payload_len: MAX_PAYLOAD as u16,
        }
    }

    /// Current role belief
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Pending protocol state (always `Idle` between reactions)
    #[must_use]
    pub const fn phase(&self) -> ProtocolState {
        self.phase
    }

    /// Length used for the next outbound frame
    #[must_use]
    pub const fn payload_len(&self) -> u16 {
        self.payload_len
    }

    /// The node's first action after power-up
    ///
    /// Both freshly started peers listen before transmitting, so they
    /// first try to hear each other rather than collide.
    #[must_use]
    pub const fn start(&self) -> Action {
        Action::listen()
    }

    /// React to a radio event, returning the successor state and the
    /// single radio command to issue next
    ///
    /// The event's pending phase is recorded and consumed within the
    /// same step; the returned state is always back in `Idle`.
    #[must_use]
    pub fn react(self, event: RadioEvent) -> (Self, Action) {
        let pending = Self {
            phase: event.phase(),
            ..self
        };
        let (reacted, action) = match event {
            RadioEvent::ReceiveDone(frame) => pending.on_receive(&frame),
            RadioEvent::ReceiveTimeout => pending.on_receive_timeout(),
            RadioEvent::ReceiveError => pending.on_receive_error(),
            RadioEvent::TransmitDone | RadioEvent::TransmitTimeout => pending.on_transmit_settled(),
        };
        (
            Self {
                phase: ProtocolState::Idle,
                ..reacted
            },
            action,
        )
    }

    /// A frame arrived: arbitrate roles and answer or re-listen
    fn on_receive(self, frame: &Frame) -> (Self, Action) {
        // An empty reception carries no tag and must not shrink the
        // exchange size; treat it as noise below.
        let payload_len = if frame.is_empty() {
            self.payload_len
        } else {
            frame.len() as u16
        };
        let state = Self {
            payload_len,
            ..self
        };

        match (state.role, frame.kind()) {
            // The peer answered: keep the initiative, send the next request
            (Role::Initiator, FrameKind::Pong) => (state, Action::send(Tag::Ping, payload_len)),
            // A rival initiator is already on the air: step down
            (Role::Initiator, FrameKind::Ping) => (state.with_role(Role::Responder), Action::listen()),
            // Noise: keep listening as initiator
            (Role::Initiator, FrameKind::Other) => (state, Action::listen()),
            // A request for us: answer it
            (Role::Responder, FrameKind::Ping) => (state, Action::send(Tag::Pong, payload_len)),
            // Anything else is unexpected for a responder: re-claim the
            // initiator role and start over
            (Role::Responder, FrameKind::Pong | FrameKind::Other) => {
                (state.with_role(Role::Initiator), Action::listen())
            }
        }
    }

    /// The peer stayed silent: transmit our own tag to restart the cycle
    fn on_receive_timeout(self) -> (Self, Action) {
        (self, Action::send(self.role.tag(), self.payload_len))
    }

    /// Reception failed: the initiator pushes a fresh request, a
    /// responder gives up the role and listens again
    fn on_receive_error(self) -> (Self, Action) {
        match self.role {
            Role::Initiator => (self, Action::send(Tag::Ping, self.payload_len)),
            Role::Responder => (self.with_role(Role::Initiator), Action::listen()),
        }
    }

    /// A transmission finished (or gave up): turn around and listen
    fn on_transmit_settled(self) -> (Self, Action) {
        (self, Action::listen())
    }

    const fn with_role(self, role: Role) -> Self {
        Self { role, ..self }
    }
}

impl Default for LinkState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LinkState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Link({}, {}, {}B)", self.role, self.phase, self.payload_len);
    }
}
