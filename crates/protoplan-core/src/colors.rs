//! ANSI color codes for dump output.
//!
//! Three semantic colors plus reset:
//! - Blue: section headers, message and enum names
//! - Green: names and string payloads
//! - Dim: raw bytes, offsets, decoded annotations

/// ANSI color palette for layout and name-table dumps.
///
/// Uses only standard 16-color ANSI codes so listings read the same in
/// light and dark terminals.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    /// Colors enabled (ANSI escape codes).
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    /// Colors disabled (empty strings).
    pub const OFF: Self = Self {
        blue: "",
        green: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.blue.is_empty()
    }

    /// Wrap `text` in the dim palette entry.
    pub fn dimmed(&self, text: &str) -> String {
        format!("{}{}{}", self.dim, text, self.reset)
    }
}
