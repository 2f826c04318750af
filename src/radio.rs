//! Radio Collaborator Interface
//!
//! The narrow command/event boundary between the protocol core and the
//! SX126x transceiver driver, plus the event-loop runner that drives
//! the state machine through it. The driver owns channel selection,
//! modulation registers, and interrupt servicing; this layer only
//! issues commands and consumes the resulting events.

use embedded_hal::delay::DelayNs;

use crate::config::{
    ANTENNA_SETTLE_MS, LORA_BANDWIDTH, LORA_CODING_RATE, LORA_FIX_LENGTH_PAYLOAD,
    LORA_IQ_INVERSION, LORA_PREAMBLE_LENGTH, LORA_SPREADING_FACTOR, LORA_SYMBOL_TIMEOUT,
    MAX_PAYLOAD, RF_FREQUENCY_HZ, TX_OUTPUT_POWER_DBM, TX_TIMEOUT_MS,
};
use crate::frame;
use crate::link::{Action, Command, LinkState, RadioEvent};
use crate::types::AntennaDirection;

/// LoRa channel and modulation parameters handed to the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModemConfig {
    /// RF channel frequency in Hz
    pub frequency_hz: u32,
    /// Transmit power in dBm
    pub tx_power_dbm: i8,
    /// Bandwidth code (0: 125 kHz, 1: 250 kHz, 2: 500 kHz)
    pub bandwidth: u8,
    /// Spreading factor (7..=12)
    pub spreading_factor: u8,
    /// Coding rate code (1: 4/5 .. 4: 4/8)
    pub coding_rate: u8,
    /// Preamble length in symbols
    pub preamble_len: u16,
    /// RX symbol timeout in symbols
    pub symbol_timeout: u16,
    /// Implicit-header (fixed length) mode
    pub fixed_length: bool,
    /// IQ inversion on the air interface
    pub iq_inverted: bool,
    /// Transmit completion timeout in milliseconds
    pub tx_timeout_ms: u32,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            frequency_hz: RF_FREQUENCY_HZ,
            tx_power_dbm: TX_OUTPUT_POWER_DBM,
            bandwidth: LORA_BANDWIDTH,
            spreading_factor: LORA_SPREADING_FACTOR,
            coding_rate: LORA_CODING_RATE,
            preamble_len: LORA_PREAMBLE_LENGTH,
            symbol_timeout: LORA_SYMBOL_TIMEOUT,
            fixed_length: LORA_FIX_LENGTH_PAYLOAD,
            iq_inverted: LORA_IQ_INVERSION,
            tx_timeout_ms: TX_TIMEOUT_MS,
        }
    }
}

/// Synchronous command interface to the transceiver driver
///
/// Commands are infallible at this layer: chip-level failures surface
/// as [`RadioEvent`]s on the next poll, never as return values. The
/// driver delivers exactly one event per outstanding operation.
pub trait RadioControl {
    /// Apply channel and modulation parameters
    fn configure(&mut self, config: &ModemConfig);

    /// Set the maximum accepted payload length
    fn set_max_payload(&mut self, len: u8);

    /// Drive the antenna switch
    ///
    /// Callers must observe the settle delay before the next command.
    fn set_antenna(&mut self, direction: AntennaDirection);

    /// Start transmitting the given frame
    fn transmit(&mut self, bytes: &[u8]);

    /// Enter receive mode with a bounded timeout
    fn listen(&mut self, timeout_ms: u32);

    /// Drop into low-power sleep between operations
    fn sleep(&mut self);

    /// Clear accumulated device error flags
    fn clear_errors(&mut self);

    /// Fetch the next pending event, if any
    ///
    /// Polled from the main loop; this is the driver's interrupt
    /// servicing entry point.
    fn poll_event(&mut self) -> Option<RadioEvent>;
}

/// Event-loop runner binding the state machine to a radio driver
///
/// Owns the single outstanding-operation discipline: one command is
/// issued per consumed event, with the antenna switch driven and
/// settled before every command.
pub struct Link<R, D> {
    radio: R,
    delay: D,
    state: LinkState,
}

impl<R: RadioControl, D: DelayNs> Link<R, D> {
    /// Bind a radio driver and delay provider to a fresh state machine
    pub fn new(radio: R, delay: D) -> Self {
        Self {
            radio,
            delay,
            state: LinkState::new(),
        }
    }

    /// Current state machine value
    #[must_use]
    pub const fn state(&self) -> LinkState {
        self.state
    }

    /// Configure the modem and start the first bounded listen
    pub fn start(&mut self) {
        self.radio.configure(&ModemConfig::default());
        self.radio.set_max_payload(MAX_PAYLOAD as u8);
        let action = self.state.start();
        self.apply(action);
    }

    /// Consume at most one pending radio event
    ///
    /// Returns `true` if an event was handled. Call repeatedly from the
    /// main loop; between events the node idles in low power.
    pub fn service(&mut self) -> bool {
        let Some(event) = self.radio.poll_event() else {
            return false;
        };

        // The driver parks the chip between operations; timeouts also
        // leave error flags behind that must not leak into the retry.
        self.radio.sleep();
        if matches!(event, RadioEvent::ReceiveTimeout | RadioEvent::TransmitTimeout) {
            self.radio.clear_errors();
        }

        self.log_event(&event);

        let (next, action) = self.state.react(event);
        self.state = next;
        self.apply(action);
        true
    }

    /// Drive the antenna, wait out the settle time, issue the command
    fn apply(&mut self, action: Action) {
        self.radio.set_antenna(action.antenna);
        self.delay.delay_ms(ANTENNA_SETTLE_MS);
        match action.command {
            Command::Transmit { tag, len } => {
                let bytes = frame::encode(tag, len);
                self.radio.transmit(&bytes);
            }
            Command::Listen { timeout_ms } => self.radio.listen(timeout_ms),
        }
    }

    #[cfg(feature = "embedded")]
    fn log_event(&self, event: &RadioEvent) {
        match event {
            RadioEvent::ReceiveDone(frame) => {
                defmt::info!("{}: rx {}", self.state.role(), frame);
            }
            RadioEvent::ReceiveTimeout => defmt::info!("{}: rx timeout", self.state.role()),
            RadioEvent::ReceiveError => defmt::warn!("{}: rx error", self.state.role()),
            RadioEvent::TransmitTimeout => defmt::warn!("{}: tx timeout", self.state.role()),
            RadioEvent::TransmitDone => defmt::trace!("{}: tx done", self.state.role()),
        }
    }

    #[cfg(not(feature = "embedded"))]
    #[allow(clippy::unused_self)]
    fn log_event(&self, _event: &RadioEvent) {}
}
