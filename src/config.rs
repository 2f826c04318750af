//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the ping-pong node
//! hardware. All pin mappings, modem parameters, and protocol timing
//! values are centralized here.

/// RF channel frequency (433 MHz for the RP2040-LoRa-LF board)
///
/// HF boards use 868 MHz instead.
pub const RF_FREQUENCY_HZ: u32 = 433_000_000;

/// Transmit output power in dBm
pub const TX_OUTPUT_POWER_DBM: i8 = 22;

/// LoRa bandwidth code
///
/// 0: 125 kHz, 1: 250 kHz, 2: 500 kHz, 3: reserved
pub const LORA_BANDWIDTH: u8 = 0;

/// LoRa spreading factor (SF7..SF12)
pub const LORA_SPREADING_FACTOR: u8 = 7;

/// LoRa coding rate code
///
/// 1: 4/5, 2: 4/6, 3: 4/7, 4: 4/8
pub const LORA_CODING_RATE: u8 = 1;

/// Preamble length in symbols (same for TX and RX)
pub const LORA_PREAMBLE_LENGTH: u16 = 8;

/// RX symbol timeout in symbols
pub const LORA_SYMBOL_TIMEOUT: u16 = 5;

/// Fixed-length (implicit header) payload mode
pub const LORA_FIX_LENGTH_PAYLOAD: bool = false;

/// IQ inversion on the air interface
pub const LORA_IQ_INVERSION: bool = false;

/// Transmit completion timeout in milliseconds
pub const TX_TIMEOUT_MS: u32 = 3000;

/// Bounded receive timeout in milliseconds
///
/// Every listen command carries this timeout, so the state machine is
/// re-entered within a bounded interval even if the peer stays silent.
pub const RX_TIMEOUT_MS: u32 = 2000;

/// Maximum on-air payload size in bytes (tag + filler)
pub const MAX_PAYLOAD: usize = 64;

/// Minimum antenna switch settle time in milliseconds
///
/// Must elapse between driving the antenna switch and issuing the next
/// radio command; issuing the command earlier corrupts the RF path.
pub const ANTENNA_SETTLE_MS: u32 = 1;

/// Pin assignments for GPIO
pub mod pins {
    //! RP2040 GPIO assignments for the SX126x module, matching the
    //! RP2040-LoRa board wiring.

    /// Status LED (Pico on-board LED)
    pub const LED_STATUS: u8 = 25;

    /// SPI1 SCK to the radio
    pub const RADIO_SCLK: u8 = 2;

    /// SPI1 MOSI to the radio
    pub const RADIO_MOSI: u8 = 3;

    /// SPI1 MISO from the radio
    pub const RADIO_MISO: u8 = 4;

    /// Radio chip select (NSS)
    pub const RADIO_NSS: u8 = 13;

    /// Radio BUSY line
    pub const RADIO_BUSY: u8 = 18;

    /// Radio DIO1 interrupt line
    pub const RADIO_DIO_1: u8 = 16;

    /// Antenna switch power control
    pub const RADIO_ANT_SWITCH_POWER: u8 = 17;
}
