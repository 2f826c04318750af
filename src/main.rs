//! Ping-Pong Node Main Application
//!
//! Entry point for the RP2040-based LoRa ping-pong node.
//! Initializes the board and spawns async tasks.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use pingpong_firmware::config::pins;
use pingpong_firmware::prelude::*;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Ping-pong node firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize RP2040 peripherals with default clock configuration
    let p = embassy_rp::init(embassy_rp::config::Config::default());

    info!("Peripherals initialized");

    // Report the radio wiring once at boot
    info!("RADIO_SCLK: {}", pins::RADIO_SCLK);
    info!("RADIO_MOSI: {}", pins::RADIO_MOSI);
    info!("RADIO_MISO: {}", pins::RADIO_MISO);
    info!("RADIO_NSS : {}", pins::RADIO_NSS);
    info!("RADIO_BUSY: {}", pins::RADIO_BUSY);
    info!("RADIO_DIO_1: {}", pins::RADIO_DIO_1);
    info!("RADIO_ANT_SWITCH_POWER: {}", pins::RADIO_ANT_SWITCH_POWER);

    // Status LED on the Pico's on-board pin
    let led = Output::new(p.PIN_25, Level::High);

    // Spawn background tasks
    spawner.spawn(heartbeat_task(led)).unwrap();
    // The SX126x driver task binds SPI1 plus the BUSY/DIO1 lines to a
    // `RadioControl` implementation and runs `radio::Link` over it:
    // spawner.spawn(link_task(...)).unwrap();

    info!("Tasks spawned, entering main loop");

    // Main loop - additional coordination can happen here
    loop {
        Timer::after(Duration::from_secs(10)).await;
        info!("Main loop tick");
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
