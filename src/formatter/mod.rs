//! Pretty printer for `Debug`-style text
//!
//! The formatter turns the one-line output of `{:?}` (or any text shaped like it)
//! into an indented, width-aware rendering. It works on text rather than on values,
//! so it can re-indent strings that were produced elsewhere, such as log lines or
//! the output of another program.
//!
//! # Pipeline
//!
//! - **lexer**: splits text into brackets, commas, string/char literals and plain text
//! - **expr**: builds a tree of bracketed groups holding comma-separated items
//! - **layout**: writes a group on one line when it fits the page width and breaks
//!   it one item per line otherwise
//!
//! Rendering is total: unbalanced brackets and unterminated literals are laid out
//! as far as they go and never rejected.
//!
//! ```rust
//! use pretty_trace::formatter::{OutputOptions, PrettyFormatter, Formatter};
//!
//! let formatter = PrettyFormatter::new(OutputOptions {
//!     page_width: 12,
//!     ..OutputOptions::default()
//! });
//! assert_eq!(formatter.render("[1, 2, 3, 4, 5]"), "[\n    1,\n    2,\n    3,\n    4,\n    5,\n]");
//! ```

mod expr;
mod layout;
mod lexer;

use crate::error::{PrettyTraceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Renders text into its pretty, multi-line form
///
/// Implementations must be pure and total on finite input. Any
/// `Fn(&str) -> String` closure is a formatter.
pub trait Formatter: Send + Sync {
    fn render(&self, text: &str) -> String;
}

impl<F> Formatter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render(&self, text: &str) -> String {
        self(text)
    }
}

/// How string literals found in the input are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringStyle {
    /// Write literals exactly as they appear, escapes included
    #[default]
    Escaped,
    /// Resolve escapes, so `\n` inside a literal becomes a real line break
    Literal,
}

/// Layout settings for [`PrettyFormatter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Columns added per nesting level
    pub indent: usize,
    /// Maximum line width a group may occupy before it is broken
    pub page_width: usize,
    pub string_style: StringStyle,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            page_width: 80,
            string_style: StringStyle::Escaped,
        }
    }
}

impl OutputOptions {
    /// Load options from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_width == 0 {
            return Err(PrettyTraceError::ConfigError(
                "page_width must be greater than zero".to_string(),
            ));
        }
        if self.indent > self.page_width {
            return Err(PrettyTraceError::ConfigError(format!(
                "indent ({}) must not exceed page_width ({})",
                self.indent, self.page_width
            )));
        }
        Ok(())
    }
}

/// The default [`Formatter`]
#[derive(Debug, Clone, Default)]
pub struct PrettyFormatter {
    options: OutputOptions,
}

impl PrettyFormatter {
    pub fn new(options: OutputOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OutputOptions {
        &self.options
    }
}

impl Formatter for PrettyFormatter {
    fn render(&self, text: &str) -> String {
        let items = expr::parse(lexer::tokenize(text));
        layout::layout(&items, &self.options)
    }
}

/// Pretty-print text with the default options.
pub fn pretty_string(text: &str) -> String {
    PrettyFormatter::default().render(text)
}

/// Pretty-print the `Debug` form of a value with the default options.
pub fn pretty_show<T: Debug + ?Sized>(value: &T) -> String {
    pretty_string(&format!("{:?}", value))
}

/// Pretty-print text to standard output.
pub fn pretty_print_string(text: &str) {
    println!("{}", pretty_string(text));
}

/// Pretty-print the `Debug` form of a value to standard output.
pub fn pretty_print<T: Debug + ?Sized>(value: &T) {
    println!("{}", pretty_show(value));
}
