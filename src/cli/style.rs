//! Terminal styling for auto-pr output
//!
//! Semantic styles go through [`Stylize`]; whether color is emitted is left
//! to `owo-colors` (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`, TTY checks).
//!
//! | Method        | Look   | Stream | Used for                          |
//! |---------------|--------|--------|-----------------------------------|
//! | `.accent()`   | Cyan   | stdout | Branches, PR numbers, logins      |
//! | `.success()`  | Green  | stdout | Completed steps                   |
//! | `.error()`    | Red    | stderr | Failures                          |
//! | `.warn()`     | Yellow | stderr | Tolerated conflicts               |
//! | `.muted()`    | Dim    | stdout | Hints, secondary detail           |
//! | `.emphasis()` | Bold   | stdout | Phase headers                     |

use std::fmt::{self, Display};

pub use owo_colors::Stream;
use owo_colors::{OwoColorize, Style};

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// Success checkmark
pub const CHECK: &str = "✓";

/// Arrow for created resources
pub const ARROW: &str = "→";

/// A value with a semantic style attached
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, style: Style, stream: Stream) -> Self {
        Self {
            value,
            style,
            stream,
        }
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

/// Semantic styling for anything printable
pub trait Stylize: Display {
    /// Cyan, for the things a line is about
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, ACCENT, Stream::Stdout)
    }

    /// Green, for completed steps
    fn success(&self) -> Styled<&Self> {
        Styled::new(self, SUCCESS, Stream::Stdout)
    }

    /// Red, for failures (stderr)
    fn error(&self) -> Styled<&Self> {
        Styled::new(self, ERROR, Stream::Stderr)
    }

    /// Yellow, for tolerated problems (stderr)
    fn warn(&self) -> Styled<&Self> {
        Styled::new(self, WARN, Stream::Stderr)
    }

    /// Dim, for secondary detail
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, MUTED, Stream::Stdout)
    }

    /// Bold, for headers
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green checkmark
pub const fn check() -> Styled<&'static str> {
    Styled::new(CHECK, SUCCESS, Stream::Stdout)
}

/// Cyan arrow
pub const fn arrow() -> Styled<&'static str> {
    Styled::new(ARROW, ACCENT, Stream::Stdout)
}

const fn to_hyperlink_stream(stream: Stream) -> supports_hyperlinks::Stream {
    match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    }
}

/// The URL as an OSC 8 hyperlink when the terminal supports it, else plain
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    if supports_hyperlinks::on(to_hyperlink_stream(stream)) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}
