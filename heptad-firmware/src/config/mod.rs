//! Board configuration loading
//!
//! The board file is compiled into the firmware (validated by build.rs)
//! and parsed at boot with the heptad-core parser.

use defmt::{error, info};

use heptad_core::config::{parse_board, BoardConfig};

/// Embedded board configuration
/// Edit board.toml and rebuild to customize
const EMBEDDED_BOARD: &str = include_str!("../../board.toml");

/// Parse and validate the embedded board file
///
/// Falls back to the built-in default wiring if the file does not parse
/// or fails validation.
pub fn load_board() -> BoardConfig {
    let board = match parse_board(EMBEDDED_BOARD) {
        Ok(board) => board,
        Err(e) => {
            error!("board.toml parse error: {:?}, using defaults", e);
            return BoardConfig::default();
        }
    };

    if let Err(e) = board.validate() {
        error!("board.toml invalid: {:?}, using defaults", e);
        return BoardConfig::default();
    }

    info!(
        "Board: hold={}ms blank={}ms error={}ms max_digits={} self_test={}",
        board.timing.glyph_hold_ms,
        board.timing.blank_ms,
        board.timing.error_hold_ms,
        board.max_digits,
        board.self_test
    );
    board
}
