//! Bang expression parsing
//!
//! Turns the text that followed the trigger prefix into a closed set of
//! expression kinds. All four shapes are recognised by a single anchored
//! regex; alternation order makes a digit-only body an index, never a prefix.
//! Prefix tokens are ASCII word characters. Substring tokens accept any
//! non-whitespace run so that `?a.txt` can name a file.

use regex::Regex;
use tracing::debug;

/// Suffix selecting print-only mode
pub const PRINT_SUFFIX: &str = ":p";

const EXPRESSION_PATTERN: &str = r"^(?:(?P<last>!)|(?P<index>-?[0-9]+)|(?P<prefix>[A-Za-z0-9_]+)|\?(?P<substring>\S+))$";

/// What a bang expression refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// `!!` - the most recent command
    LastCommand,
    /// `!n` / `!-n` - by position from the start (1-based) or from the end
    IndexedCommand(i64),
    /// `!token` - first command starting with the token
    PrefixMatch(String),
    /// `!?token` - first command containing the token (any non-whitespace run)
    SubstringMatch(String),
    /// Not an expansion; the message is left alone
    NoExpansion,
}

impl Expression {
    #[must_use]
    pub const fn is_expansion(&self) -> bool {
        !matches!(self, Self::NoExpansion)
    }
}

/// A classified expression plus its modifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BangExpression {
    pub expression: Expression,
    /// Set by the `:p` suffix: return the command instead of running it
    pub print_only: bool,
}

/// Classifies trigger-stripped input
pub struct ExpansionParser {
    pattern: Regex,
}

impl ExpansionParser {
    /// Create a parser with the compiled expression grammar
    ///
    /// # Panics
    ///
    /// Never in practice: the grammar is a fixed, tested pattern.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(EXPRESSION_PATTERN).expect("expression grammar must compile"),
        }
    }

    /// Parse the body of a bang expression (the text after the trigger)
    #[must_use]
    pub fn parse(&self, body: &str) -> BangExpression {
        let (rest, print_only) = match body.strip_suffix(PRINT_SUFFIX) {
            Some(rest) => (rest, true),
            None => (body, false),
        };

        let expression = self.classify(rest);
        debug!(body = %body, ?expression, print_only, "Classified bang expression");

        BangExpression {
            expression,
            print_only,
        }
    }

    /// Classify text without suffix handling
    #[must_use]
    pub fn classify(&self, text: &str) -> Expression {
        let Some(caps) = self.pattern.captures(text) else {
            return Expression::NoExpansion;
        };

        if caps.name("last").is_some() {
            Expression::LastCommand
        } else if let Some(index) = caps.name("index") {
            Expression::IndexedCommand(parse_index(index.as_str()))
        } else if let Some(token) = caps.name("prefix") {
            Expression::PrefixMatch(token.as_str().to_string())
        } else if let Some(token) = caps.name("substring") {
            Expression::SubstringMatch(token.as_str().to_string())
        } else {
            Expression::NoExpansion
        }
    }
}

impl Default for ExpansionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a signed index, saturating on overflow
///
/// Saturated values are always out of range, so they still resolve to
/// an invalid index rather than silently wrapping.
fn parse_index(digits: &str) -> i64 {
    digits.parse::<i64>().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}
