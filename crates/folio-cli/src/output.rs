//! Terminal output helpers.

use owo_colors::OwoColorize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static PLAIN: AtomicBool = AtomicBool::new(false);

/// Disable colors and Unicode icons for the rest of the process.
pub fn set_plain(plain: bool) {
    PLAIN.store(plain, Ordering::Relaxed);
}

/// Whether ANSI colors should be emitted.
pub fn colors_enabled() -> bool {
    !PLAIN.load(Ordering::Relaxed) && console::colors_enabled()
}

/// Whether Unicode icons should be emitted.
pub fn unicode_enabled() -> bool {
    !PLAIN.load(Ordering::Relaxed) && console::Term::stdout().features().wants_emoji()
}

/// Status icons.
#[derive(Debug, Clone, Copy)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Info,
    Star,
    Bullet,
}

impl Icon {
    /// Unicode representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "\u{2714}", // ✔
            Self::Error => "\u{2718}",   // ✘
            Self::Warning => "\u{26A0}", // ⚠
            Self::Info => "\u{2139}",    // ℹ
            Self::Star => "\u{2605}",    // ★
            Self::Bullet => "\u{2022}",  // •
        }
    }

    /// ASCII fallback.
    pub const fn ascii(self) -> &'static str {
        match self {
            Self::Success => "[OK]",
            Self::Error => "[ERR]",
            Self::Warning => "[WARN]",
            Self::Info => "[INFO]",
            Self::Star => "[*]",
            Self::Bullet => "-",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if unicode_enabled() {
            self.as_str()
        } else {
            self.ascii()
        })
    }
}

pub fn bold(text: &str) -> String {
    if colors_enabled() {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

pub fn dim(text: &str) -> String {
    if colors_enabled() {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

pub fn accent(text: &str) -> String {
    if colors_enabled() {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) {
    if colors_enabled() {
        println!("\n{}\n", text.cyan().bold());
    } else {
        println!("\n{text}\n");
    }
}

pub fn info(text: &str) {
    let icon = Icon::Info;
    if colors_enabled() {
        println!("{} {text}", icon.blue());
    } else {
        println!("{icon} {text}");
    }
}

pub fn success(text: &str) {
    let icon = Icon::Success;
    if colors_enabled() {
        println!("{} {text}", icon.green());
    } else {
        println!("{icon} {text}");
    }
}

pub fn warning(text: &str) {
    let icon = Icon::Warning;
    if colors_enabled() {
        eprintln!("{} {}", icon.yellow(), text.yellow());
    } else {
        eprintln!("{icon} {text}");
    }
}

pub fn error(text: &str) {
    let icon = Icon::Error;
    if colors_enabled() {
        eprintln!("{} {}", icon.red().bold(), text.red());
    } else {
        eprintln!("{icon} {text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_disables_styling() {
        set_plain(true);
        assert!(!colors_enabled());
        assert!(!unicode_enabled());
        assert_eq!(bold("title"), "title");
        assert_eq!(Icon::Star.to_string(), "[*]");
    }
}
