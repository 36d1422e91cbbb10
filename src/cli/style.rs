//! CLI styling utilities
//!
//! Semantic styling via the [`Stylize`] trait with automatic terminal color
//! support detection (delegated to `owo-colors`).
//!
//! | Method       | Color  | Stream | Semantic Use                      |
//! |--------------|--------|--------|-----------------------------------|
//! | `.accent()`  | Cyan   | stdout | Primary info: branches, paths     |
//! | `.success()` | Green  | stdout | Completion: checkmarks, done      |
//! | `.error()`   | Red    | stderr | Failures, error messages          |
//! | `.muted()`   | Dim    | stdout | Secondary: hints, response bodies |
//! | `.emphasis()`| Bold   | stdout | Headers, current action           |

use std::fmt::{self, Display};

pub use owo_colors::Stream;
use owo_colors::{OwoColorize, Style};

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// A value with semantic styling applied.
///
/// Color support detection is handled by `owo-colors` (respects `NO_COLOR`,
/// `CLICOLOR`, `CLICOLOR_FORCE`, and TTY detection).
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

    /// Override to render for stderr stream detection.
    #[must_use]
    pub const fn for_stderr(mut self) -> Self {
        self.stream = Stream::Stderr;
        self
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

/// Extension trait for semantic terminal styling.
pub trait Stylize: Display {
    /// Cyan, for branches, paths, counts
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, ACCENT, Stream::Stdout)
    }

    /// Green, for completion states
    fn success(&self) -> Styled<&Self> {
        Styled::new(self, SUCCESS, Stream::Stdout)
    }

    /// Red, for failures (stderr)
    fn error(&self) -> Styled<&Self> {
        Styled::new(self, ERROR, Stream::Stderr)
    }

    /// Dim, for secondary information
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, MUTED, Stream::Stdout)
    }

    /// Bold, for headers
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Success checkmark
pub const CHECK: &str = "✓";

/// Error/failure cross
pub const CROSS: &str = "✗";

/// Arrow for steps/actions
pub const ARROW: &str = "→";

/// Green checkmark for success states.
#[inline]
pub const fn check() -> Styled<&'static str> {
    Styled::new(CHECK, SUCCESS, Stream::Stdout)
}

/// Red cross for error/failure states (renders to stderr by default).
#[inline]
pub const fn cross() -> Styled<&'static str> {
    Styled::new(CROSS, ERROR, Stream::Stderr)
}

/// Cyan arrow for action steps.
#[inline]
pub const fn arrow() -> Styled<&'static str> {
    Styled::new(ARROW, ACCENT, Stream::Stdout)
}

const fn to_hyperlink_stream(stream: Stream) -> supports_hyperlinks::Stream {
    match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    }
}

/// Clickable hyperlink showing the URL itself, plain text where OSC 8 is unsupported.
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    if supports_hyperlinks::on(to_hyperlink_stream(stream)) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

use indicatif::ProgressStyle;
use std::sync::OnceLock;

/// Cyan dots spinner; template validated once.
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}
