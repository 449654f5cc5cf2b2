use std::io::{self, Write};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bridge_core::clipboard::Clipboard;
use color_eyre::eyre::{self, Context as _};

/// Writes to the terminal's clipboard through the OSC 52 escape sequence.
pub(crate) struct Osc52Clipboard<W> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    pub(crate) fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> eyre::Result<()> {
        let encoded = STANDARD.encode(text);
        write!(self.out, "\x1b]52;c;{encoded}\x07").wrap_err("failed to write to terminal")?;
        self.out.flush().wrap_err("failed to flush terminal")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_osc52_sequence() {
        let mut clipboard = Osc52Clipboard { out: Vec::new() };
        clipboard.write_text("hi").unwrap();

        assert_eq!(clipboard.out, b"\x1b]52;c;aGk=\x07");
    }
}
