//! Build script for heptad-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// RP2040 GPIO count
const MAX_GPIO: i64 = 30;

/// Pins owned by the UART0 console
const CONSOLE_PINS: [i64; 2] = [0, 1];

const SEGMENT_KEYS: [&str; 7] = ["a", "b", "c", "d", "e", "f", "g"];
const INDICATOR_KEYS: [&str; 4] = ["positive", "negative", "green", "red"];
const TIMING_KEYS: [&str; 5] = [
    "glyph_hold_ms",
    "blank_ms",
    "dot_hold_ms",
    "result_hold_ms",
    "error_hold_ms",
    "lamp_test_ms",
];

fn main() {
    setup_linker();
    validate_board();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml at compile time
fn validate_board() {
    println!("cargo:rerun-if-changed=board.toml");

    let board_path = Path::new("board.toml");

    if !board_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a board.toml with the pin assignment.       ║\n\
            ║  Please create one in the heptad-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(board_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let board: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&board, &mut errors);
    validate_pins(&board, &mut errors);
    validate_timing(&board, &mut errors);
    validate_display(&board, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn validate_sections(board: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = board.as_table() else {
        errors.push("board.toml must be a table".to_string());
        return;
    };

    for (name, value) in root {
        if !matches!(name.as_str(), "segments" | "indicator" | "timing" | "display") {
            errors.push(format!("Unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Parse "gpioN" / "!gpioN", returning the pin number
fn parse_pin(value: &str) -> Option<i64> {
    value.strip_prefix('!').unwrap_or(value).strip_prefix("gpio")?.parse().ok()
}

fn validate_pins(board: &toml::Value, errors: &mut Vec<String>) {
    // pin number -> first line that claimed it
    let mut used: BTreeMap<i64, String> = BTreeMap::new();

    for (section, keys) in [("segments", &SEGMENT_KEYS[..]), ("indicator", &INDICATOR_KEYS[..])] {
        let Some(table) = board.get(section).and_then(|s| s.as_table()) else {
            continue;
        };

        for (key, value) in table {
            let line = format!("{}.{}", section, key);

            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            }

            let Some(pin) = value.as_str().and_then(parse_pin) else {
                errors.push(format!("{} must be \"gpioN\" or \"!gpioN\"", line));
                continue;
            };

            if !(0..MAX_GPIO).contains(&pin) {
                errors.push(format!("{} pin {} out of range (0-29)", line, pin));
            } else if CONSOLE_PINS.contains(&pin) {
                errors.push(format!("{} uses gpio{} (UART0 console)", line, pin));
            } else if let Some(first) = used.get(&pin) {
                errors.push(format!("{} reuses gpio{} (already {})", line, pin, first));
            } else {
                used.insert(pin, line);
            }
        }
    }
}

fn validate_timing(board: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = board.get("timing").and_then(|s| s.as_table()) else {
        return;
    };

    for (key, value) in table {
        if !TIMING_KEYS.contains(&key.as_str()) {
            errors.push(format!("[timing] unknown key '{}'", key));
            continue;
        }
        match value.as_integer() {
            Some(ms) if (0..=u32::MAX as i64).contains(&ms) => {}
            _ => errors.push(format!("timing.{} must be a non-negative integer (ms)", key)),
        }
    }
}

fn validate_display(board: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = board.get("display").and_then(|s| s.as_table()) else {
        return;
    };

    for (key, value) in table {
        match key.as_str() {
            "max_digits" => match value.as_integer() {
                Some(n) if (1..=16).contains(&n) => {}
                _ => errors.push("display.max_digits must be 1-16".to_string()),
            },
            "self_test" => {
                if !value.is_bool() {
                    errors.push("display.self_test must be true or false".to_string());
                }
            }
            _ => errors.push(format!("[display] unknown key '{}'", key)),
        }
    }
}
