//! LoRa Ping-Pong Node Firmware Library
//!
//! Core logic for an RP2040-based LoRa node that negotiates a
//! master/slave role with a peer running the same firmware and then
//! alternates fixed-size PING/PONG exchanges indefinitely.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        Event-Loop Runner  │  Board Bring-up (main)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     PROTOCOL LAYER                           │
//! │  Role Arbitration State Machine  │  Frame Codec              │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   RADIO COLLABORATOR                         │
//! │      SX126x driver behind the `RadioControl` trait           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Immutable-by-default**: state transitions return new instances
//! - **Functional core, imperative shell**: the transition function is
//!   pure; the runner turns its actions into radio commands
//! - **Type-driven design**: closed enums for events, actions, and roles
//! - **No unsafe in application code**
//! - **Errors are events**: timeouts and receive failures feed back into
//!   the state machine instead of aborting anything

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_rp;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Frame Codec
///
/// Builds and classifies the fixed-format 4-byte-tag frames.
pub mod frame;

/// Role/Exchange State Machine
///
/// Decides, for each radio event, the next radio command and role
/// transition. The only module with real decision logic.
pub mod link;

/// Radio Collaborator Interface
///
/// The narrow command/event interface to the transceiver driver, plus
/// the event-loop runner that drives the state machine through it.
pub mod radio;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
