//! Single-line terminal progress messages

use std::io::{self, Write};

const CLEAR_LINE: &str = "\x1b[K";
const CURSOR_UP: &str = "\x1b[F";

/// Overwrite the current status line with `message`
pub fn progress(message: &str) {
    let mut out = io::stdout().lock();
    // Progress output is best-effort
    let _ = write!(out, "{}", progress_line(message));
    let _ = out.flush();
}

/// Replace the status line with a final message
pub fn progress_done(message: &str) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{}{}", CLEAR_LINE, message);
}

/// Status line text, exposed for callers writing elsewhere
pub fn progress_line(message: &str) -> String {
    format!("{}{}\n{}", CLEAR_LINE, message, CURSOR_UP)
}
