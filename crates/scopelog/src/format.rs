//! crates/scopelog/src/format.rs
//! Renders one log line: indentation, severity prefix, message, terminator.

use std::fmt::{self, Write as _};

use crate::levels::{Level, LevelFilter};
use crate::line_ending::LineEnding;
use crate::nesting;

/// Levels added to ordinary messages inside a scope, so they sit one level
/// deeper than that scope's entry and exit markers.
pub(crate) const SCOPE_MARGIN: i32 = 1;

/// Where a line sits relative to the calling thread's active scopes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Indent {
    /// Ordinary message, indented inside every active scope.
    Nested,
    /// Entry or exit marker of the scope at the given depth.
    Marker(i32),
}

impl Indent {
    fn levels(self) -> usize {
        let depth = match self {
            Self::Nested => match nesting::current_depth() {
                depth if depth < 0 => return 0,
                depth => depth.saturating_add(SCOPE_MARGIN),
            },
            Self::Marker(depth) => depth,
        };
        usize::try_from(depth).unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Layout {
    pub(crate) indent_width: usize,
    pub(crate) line_ending: LineEnding,
}

impl Layout {
    /// Number of spaces in front of the line. Indentation is a debugging aid:
    /// it only appears while the logger's default threshold is Debug, and
    /// never on passthru text.
    pub(crate) fn indentation(self, level: Level, default: LevelFilter, indent: Indent) -> usize {
        if level == Level::Passthru || !default.indents() {
            return 0;
        }
        indent.levels().saturating_mul(self.indent_width)
    }

    pub(crate) fn render(
        self,
        level: Level,
        default: LevelFilter,
        indent: Indent,
        message: &dyn fmt::Display,
    ) -> String {
        let width = self.indentation(level, default, indent);
        let mut line = String::with_capacity(width + 64);
        if write!(line, "{:width$}{}{message}", "", level.prefix()).is_err() {
            line.push_str(" <message formatting failed>");
        }
        line.push_str(self.line_ending.as_str());
        line
    }
}
