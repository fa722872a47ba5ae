//! UART console task
//!
//! Reads expressions line by line from UART0 and hands them to the
//! calculator session. Ctrl-C drops every output line immediately.

use defmt::{debug, info, warn};
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::{Delay, Timer};
use embedded_io_async::{Read, Write};
use heapless::{String, Vec};

use heptad_core::session::{LineOutcome, Session, MAX_REPLY_LEN};
use heptad_drivers::DelayClock;

use crate::pins::BoardPort;

/// Session type for this board
pub type BoardSession = Session<BoardPort, DelayClock<Delay>>;

/// Longest accepted input line (bytes)
const LINE_LEN: usize = 64;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Ctrl-C
const INTERRUPT: u8 = 0x03;
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;

const BANNER: &str = "\r\n\
==================================================\r\n\
Heptad seven-segment calculator\r\n\
==================================================\r\n\
Operators: + - * / and parentheses\r\n\
Examples:  3 + 5   10 - 3   6 * 7   15 / 3   (2 + 3) * 4\r\n\
Type q or quit to exit, Ctrl-C to stop immediately\r\n\
==================================================\r\n";

const PROMPT: &str = "\r\n> ";

/// How the console loop ended
enum Exit {
    Quit,
    Interrupted,
}

/// Console task - owns the session until quit or interrupt
#[embassy_executor::task]
pub async fn console_task(
    mut session: BoardSession,
    mut tx: BufferedUartTx,
    mut rx: BufferedUartRx,
) {
    info!("Console task started");

    send(&mut tx, BANNER).await;
    session.start();
    send(&mut tx, "Ready.\r\n").await;

    match run(&mut session, &mut tx, &mut rx).await {
        Exit::Quit => {
            info!("Session finished");
            session.finish();
            send(&mut tx, "Bye.\r\n").await;
        }
        Exit::Interrupted => {
            warn!("Interrupted, all lines low");
            session.abort();
            send(&mut tx, "^C\r\nInterrupted.\r\n").await;
        }
    }

    // Port is released; nothing left to do
    loop {
        Timer::after_secs(60).await;
    }
}

async fn run(session: &mut BoardSession, tx: &mut BufferedUartTx, rx: &mut BufferedUartRx) -> Exit {
    let mut line: Vec<u8, LINE_LEN> = Vec::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    send(tx, PROMPT).await;

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };

        for &byte in &buf[..n] {
            match byte {
                INTERRUPT => return Exit::Interrupted,
                b'\r' | b'\n' => {
                    if byte == b'\n' && line.is_empty() {
                        // Second half of CRLF
                        continue;
                    }
                    send(tx, "\r\n").await;
                    let quit = handle_line(session, tx, &line).await;
                    line.clear();
                    if quit {
                        return Exit::Quit;
                    }
                    send(tx, PROMPT).await;
                }
                BACKSPACE | DELETE => {
                    if pop_char(&mut line) {
                        send(tx, "\x08 \x08").await;
                    }
                }
                _ => {
                    if line.push(byte).is_ok() {
                        echo(tx, byte).await;
                    }
                }
            }
        }
    }
}

/// Remove the last UTF-8 character, returning true if one was removed
fn pop_char(line: &mut Vec<u8, LINE_LEN>) -> bool {
    while let Some(byte) = line.pop() {
        // Stop after the lead byte of a multi-byte sequence
        if byte & 0xC0 != 0x80 {
            return true;
        }
    }
    false
}

/// Evaluate one line; returns true when the session was closed
async fn handle_line(session: &mut BoardSession, tx: &mut BufferedUartTx, line: &[u8]) -> bool {
    let Ok(text) = core::str::from_utf8(line) else {
        warn!("Input is not valid UTF-8");
        send(tx, "error: input is not valid text\r\n").await;
        return false;
    };

    debug!("Line: {}", text);
    let outcome = session.process(text);

    match &outcome {
        LineOutcome::Ignored | LineOutcome::Quit => {}
        LineOutcome::Shown { text, report } => {
            info!(
                "Shown {} ({} glyphs, {} blanks)",
                text.as_str(),
                report.glyphs,
                report.blanks
            );
            if !report.skipped.is_empty() {
                warn!("Skipped {} unrenderable characters", report.skipped.len());
            }
        }
        LineOutcome::TooLong { value } => info!("Too long for display: {}", value),
        LineOutcome::Failed(e) => warn!("Evaluation failed: {}", e),
    }

    let mut out: String<MAX_REPLY_LEN> = String::new();
    if outcome.write_reply(&mut out).is_err() {
        warn!("Console reply truncated");
    }
    send(tx, &out).await;
    send(tx, "\r\n").await;

    matches!(outcome, LineOutcome::Quit)
}

async fn send(tx: &mut BufferedUartTx, text: &str) {
    if let Err(e) = tx.write_all(text.as_bytes()).await {
        warn!("UART write error: {:?}", e);
    }
}

async fn echo(tx: &mut BufferedUartTx, byte: u8) {
    if let Err(e) = tx.write_all(&[byte]).await {
        warn!("UART write error: {:?}", e);
    }
}
