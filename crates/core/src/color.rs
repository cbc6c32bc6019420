//! ANSI color decoration for console output.

/// Foreground SGR color codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 30,
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
    Magenta = 35,
    Cyan = 36,
    White = 37,
}

impl Color {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Wrap `s` in this color and a reset sequence.
    pub fn paint(self, s: &str) -> String {
        format!("\x1b[{}m{}\x1b[0m", self.code(), s)
    }

    /// Color for an HTTP-style status code, by class.
    pub fn for_status(code: u16) -> Self {
        match code / 100 {
            2 => Color::Green,
            3 => Color::Yellow,
            4 | 5 => Color::Red,
            _ => Color::White,
        }
    }
}

/// Render a status code painted by its class.
pub fn status(code: u16) -> String {
    Color::for_status(code).paint(&code.to_string())
}

/// Remove SGR escape sequences from `s`.
pub fn strip(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Consume parameters up to and including the final byte.
            for p in chars.by_ref() {
                if p.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}
