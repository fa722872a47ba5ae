//! Heptad - Seven-Segment Calculator Firmware
//!
//! Main firmware binary for RP2040 boards driving a single-digit
//! seven-segment display and a two-colour status lamp. Expressions arrive
//! over the UART0 console; results are shown one glyph at a time.

#![no_std]
#![no_main]

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::Peri;
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use heptad_core::session::Session;
use heptad_drivers::DelayClock;

use crate::config::load_board;
use crate::pins::{board_port, PinBank};

mod config;
mod pins;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Heptad firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let board = load_board();

    // Console on UART0 (GPIO0 TX, GPIO1 RX), 115200 baud default
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("UART console initialized");

    // Everything except the console pins is available to the board file
    let mut bank = PinBank::new([
        None,
        None,
        Some(any(p.PIN_2)),
        Some(any(p.PIN_3)),
        Some(any(p.PIN_4)),
        Some(any(p.PIN_5)),
        Some(any(p.PIN_6)),
        Some(any(p.PIN_7)),
        Some(any(p.PIN_8)),
        Some(any(p.PIN_9)),
        Some(any(p.PIN_10)),
        Some(any(p.PIN_11)),
        Some(any(p.PIN_12)),
        Some(any(p.PIN_13)),
        Some(any(p.PIN_14)),
        Some(any(p.PIN_15)),
        Some(any(p.PIN_16)),
        Some(any(p.PIN_17)),
        Some(any(p.PIN_18)),
        Some(any(p.PIN_19)),
        Some(any(p.PIN_20)),
        Some(any(p.PIN_21)),
        Some(any(p.PIN_22)),
        Some(any(p.PIN_23)),
        Some(any(p.PIN_24)),
        Some(any(p.PIN_25)),
        Some(any(p.PIN_26)),
        Some(any(p.PIN_27)),
        Some(any(p.PIN_28)),
        Some(any(p.PIN_29)),
    ]);

    let port = match board_port(&mut bank, &board) {
        Ok(port) => port,
        Err(e) => {
            error!("Pin setup failed: {:?}", e);
            halt().await
        }
    };
    info!("Output port initialized");

    let session = Session::new(port, DelayClock::new(Delay), board);

    if let Err(e) = spawner.spawn(tasks::console_task(session, tx, rx)) {
        error!("Failed to spawn console task: {:?}", e);
        return;
    }

    info!("All tasks spawned");
}

fn any<T: embassy_rp::gpio::Pin>(pin: Peri<'static, T>) -> Peri<'static, embassy_rp::gpio::AnyPin> {
    pin.into()
}

/// Park the core after an unrecoverable setup error
async fn halt() -> ! {
    loop {
        Timer::after_secs(60).await;
    }
}
