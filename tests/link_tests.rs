//! Role arbitration state machine tests
//!
//! Exercises the full transition table: arbitration on reception,
//! timeout-driven retransmission, error recovery, and the turn-around
//! after every transmission.

use pingpong_firmware::config::{MAX_PAYLOAD, RX_TIMEOUT_MS};
use pingpong_firmware::frame::Frame;
use pingpong_firmware::link::{Action, Command, LinkState, RadioEvent};
use pingpong_firmware::types::{AntennaDirection, LinkQuality, ProtocolState, Role, Tag};

fn received(bytes: &[u8]) -> RadioEvent {
    RadioEvent::ReceiveDone(Frame::from_received(bytes, LinkQuality::default()))
}

fn full_frame(tag: &[u8; 4]) -> Vec<u8> {
    let mut bytes = tag.to_vec();
    bytes.extend((0..MAX_PAYLOAD - 4).map(|i| i as u8));
    bytes
}

// ============================================================================
// Initial Conditions
// ============================================================================

#[test]
fn fresh_state_is_idle_initiator() {
    let state = LinkState::new();
    assert_eq!(state.role(), Role::Initiator);
    assert_eq!(state.phase(), ProtocolState::Idle);
    assert_eq!(state.payload_len(), MAX_PAYLOAD as u16);
}

#[test]
fn first_action_is_a_bounded_listen() {
    let action = LinkState::new().start();
    assert_eq!(action.antenna, AntennaDirection::Rx);
    assert_eq!(
        action.command,
        Command::Listen {
            timeout_ms: RX_TIMEOUT_MS
        }
    );
}

#[test]
fn default_matches_new() {
    assert_eq!(LinkState::default(), LinkState::new());
}

// ============================================================================
// Initiator Reception
// ============================================================================

#[test]
fn initiator_answers_pong_with_ping() {
    let (next, action) = LinkState::new().react(received(&full_frame(b"PONG")));
    assert_eq!(next.role(), Role::Initiator);
    assert_eq!(action, Action::send(Tag::Ping, MAX_PAYLOAD as u16));
    assert_eq!(action.antenna, AntennaDirection::Tx);
}

#[test]
fn initiator_steps_down_on_rival_ping() {
    let (next, action) = LinkState::new().react(received(&full_frame(b"PING")));
    assert_eq!(next.role(), Role::Responder);
    assert_eq!(action, Action::listen());
}

#[test]
fn initiator_ignores_noise() {
    let (next, action) = LinkState::new().react(received(b"JUNKJUNK"));
    assert_eq!(next.role(), Role::Initiator);
    assert_eq!(action, Action::listen());
}

// ============================================================================
// Responder Reception
// ============================================================================

fn responder() -> LinkState {
    // A responder is made, not constructed: start as initiator and
    // hear a rival PING.
    let (state, _) = LinkState::new().react(received(&full_frame(b"PING")));
    assert_eq!(state.role(), Role::Responder);
    state
}

#[test]
fn responder_answers_ping_with_pong() {
    let (next, action) = responder().react(received(&full_frame(b"PING")));
    assert_eq!(next.role(), Role::Responder);
    assert_eq!(action, Action::send(Tag::Pong, MAX_PAYLOAD as u16));
}

#[test]
fn responder_reclaims_initiator_on_pong() {
    let (next, action) = responder().react(received(&full_frame(b"PONG")));
    assert_eq!(next.role(), Role::Initiator);
    assert_eq!(action, Action::listen());
}

#[test]
fn responder_reclaims_initiator_on_garbage() {
    let (next, action) = responder().react(received(b"????????"));
    assert_eq!(next.role(), Role::Initiator);
    assert_eq!(action, Action::listen());
}

// ============================================================================
// Timeouts and Errors
// ============================================================================

#[test]
fn receive_timeout_makes_initiator_send_ping() {
    let (next, action) = LinkState::new().react(RadioEvent::ReceiveTimeout);
    assert_eq!(next.role(), Role::Initiator);
    assert_eq!(action, Action::send(Tag::Ping, MAX_PAYLOAD as u16));
}

#[test]
fn receive_timeout_makes_responder_send_pong() {
    let (next, action) = responder().react(RadioEvent::ReceiveTimeout);
    assert_eq!(next.role(), Role::Responder);
    assert_eq!(action, Action::send(Tag::Pong, MAX_PAYLOAD as u16));
}

#[test]
fn receive_error_makes_initiator_retry_ping() {
    let (next, action) = LinkState::new().react(RadioEvent::ReceiveError);
    assert_eq!(next.role(), Role::Initiator);
    assert_eq!(action, Action::send(Tag::Ping, MAX_PAYLOAD as u16));
}

#[test]
fn receive_error_demotes_responder_to_listening_initiator() {
    let (next, action) = responder().react(RadioEvent::ReceiveError);
    assert_eq!(next.role(), Role::Initiator);
    assert_eq!(action, Action::listen());
}

#[test]
fn receive_error_reaction_is_idempotent() {
    // No state drift across repeated identical events
    let mut state = LinkState::new();
    for _ in 0..5 {
        let (next, action) = state.react(RadioEvent::ReceiveError);
        assert_eq!(action, Action::send(Tag::Ping, MAX_PAYLOAD as u16));
        assert_eq!(next.role(), Role::Initiator);
        state = next;
    }
}

// ============================================================================
// Transmit Turn-Around
// ============================================================================

#[test]
fn transmit_done_always_listens() {
    let (next, action) = LinkState::new().react(RadioEvent::TransmitDone);
    assert_eq!(next.role(), Role::Initiator);
    assert_eq!(action, Action::listen());

    let (next, action) = responder().react(RadioEvent::TransmitDone);
    assert_eq!(next.role(), Role::Responder);
    assert_eq!(action, Action::listen());
}

#[test]
fn transmit_timeout_always_listens() {
    let (_, action) = LinkState::new().react(RadioEvent::TransmitTimeout);
    assert_eq!(action, Action::listen());

    let (_, action) = responder().react(RadioEvent::TransmitTimeout);
    assert_eq!(action, Action::listen());
}

#[test]
fn no_two_sends_without_an_intervening_listen() {
    // A timeout triggers a send; the send's completion must flip the
    // node back into receive mode before any further send.
    let (state, action) = LinkState::new().react(RadioEvent::ReceiveTimeout);
    assert!(matches!(action.command, Command::Transmit { .. }));

    let (_, action) = state.react(RadioEvent::TransmitDone);
    assert!(matches!(action.command, Command::Listen { .. }));
}

// ============================================================================
// Phase Invariant
// ============================================================================

#[test]
fn phase_returns_to_idle_after_every_reaction() {
    let events = [
        RadioEvent::TransmitDone,
        RadioEvent::TransmitTimeout,
        received(&full_frame(b"PING")),
        RadioEvent::ReceiveTimeout,
        RadioEvent::ReceiveError,
    ];
    for event in events {
        let (next, _) = LinkState::new().react(event);
        assert_eq!(next.phase(), ProtocolState::Idle);
    }
}

// ============================================================================
// Payload Length Mirroring
// ============================================================================

#[test]
fn reply_length_mirrors_received_length() {
    let (next, action) = responder().react(received(b"PING\x00\x01\x02\x03"));
    assert_eq!(next.payload_len(), 8);
    assert_eq!(action, Action::send(Tag::Pong, 8));
}

#[test]
fn timeout_retransmission_reuses_mirrored_length() {
    let (state, _) = LinkState::new().react(received(b"PONG\x00\x01"));
    let (_, action) = state.react(RadioEvent::ReceiveTimeout);
    assert_eq!(action, Action::send(Tag::Ping, 6));
}

#[test]
fn empty_reception_is_noise_and_keeps_length() {
    let (next, action) = LinkState::new().react(received(&[]));
    assert_eq!(next.role(), Role::Initiator);
    assert_eq!(next.payload_len(), MAX_PAYLOAD as u16);
    assert_eq!(action, Action::listen());
}

// ============================================================================
// Two-Node Arbitration Scenarios
// ============================================================================

#[test]
fn arbitration_settles_one_initiator_one_responder() {
    let node_a = LinkState::new();
    let node_b = LinkState::new();

    // A's listen times out first, so A transmits PING and B hears it.
    let (node_a, a_action) = node_a.react(RadioEvent::ReceiveTimeout);
    assert_eq!(a_action, Action::send(Tag::Ping, MAX_PAYLOAD as u16));

    let (node_b, b_action) = node_b.react(received(&full_frame(b"PING")));
    assert_eq!(node_b.role(), Role::Responder);
    assert_eq!(b_action, Action::listen());

    // A turns around to listen; B's next timeout produces the PONG.
    let (node_a, _) = node_a.react(RadioEvent::TransmitDone);
    let (node_b, b_action) = node_b.react(RadioEvent::ReceiveTimeout);
    assert_eq!(b_action, Action::send(Tag::Pong, MAX_PAYLOAD as u16));

    // A hears the PONG and keeps the initiative.
    let (node_a, a_action) = node_a.react(received(&full_frame(b"PONG")));
    assert_eq!(node_a.role(), Role::Initiator);
    assert_eq!(a_action, Action::send(Tag::Ping, MAX_PAYLOAD as u16));
    assert_eq!(node_b.role(), Role::Responder);
}

#[test]
fn simultaneous_ping_race_is_known_to_not_converge() {
    // If both peers transmit PING before either listens, each then
    // hears the other's PING and both step down. The protocol does not
    // resolve this deterministically; the next anomalous reception or
    // timeout restarts arbitration. Documented, not fixed.
    let (node_a, _) = LinkState::new().react(received(&full_frame(b"PING")));
    let (node_b, _) = LinkState::new().react(received(&full_frame(b"PING")));
    assert_eq!(node_a.role(), Role::Responder);
    assert_eq!(node_b.role(), Role::Responder);

    // Both now listen, both time out, both send PONG...
    let (node_a, a_action) = node_a.react(RadioEvent::ReceiveTimeout);
    let (node_b, b_action) = node_b.react(RadioEvent::ReceiveTimeout);
    assert_eq!(a_action, Action::send(Tag::Pong, MAX_PAYLOAD as u16));
    assert_eq!(b_action, Action::send(Tag::Pong, MAX_PAYLOAD as u16));

    // ...and an unexpected PONG resets each back to initiator.
    let (node_a, _) = node_a.react(RadioEvent::TransmitDone);
    let (node_b, _) = node_b.react(RadioEvent::TransmitDone);
    let (node_a, _) = node_a.react(received(&full_frame(b"PONG")));
    let (node_b, _) = node_b.react(received(&full_frame(b"PONG")));
    assert_eq!(node_a.role(), Role::Initiator);
    assert_eq!(node_b.role(), Role::Initiator);
}
