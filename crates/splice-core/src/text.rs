//! Text helpers shared by the selector and injection engines.

/// Line ending style inferred from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineEnding {
    /// Line feed (`\n`).
    Lf,
    /// Carriage return + line feed (`\r\n`).
    CrLf,
}

impl LineEnding {
    /// Infers the dominant line ending, preferring `\n` on a tie with none.
    pub(crate) fn dominant(content: &str) -> Self {
        let total = content.matches('\n').count();
        let crlf = content.matches("\r\n").count();
        let lf = total.saturating_sub(crlf);
        if crlf > 0 && crlf >= lf {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Lays out `statements` so each non-blank line follows a copy of `gap`.
///
/// The gap is the whitespace found between an anchor statement and the token
/// that follows it, so inserted lines inherit that token's indentation.
pub(crate) fn interleave_with_gap(statements: &str, gap: &str) -> String {
    let mut out = String::with_capacity(statements.len() + gap.len());
    for line in statement_lines(statements) {
        out.push_str(line);
        out.push_str(gap);
    }
    out
}

/// Returns the non-blank, trimmed lines of `statements`.
pub(crate) fn statement_lines(statements: &str) -> impl Iterator<Item = &str> {
    statements.lines().map(str::trim).filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", LineEnding::Lf)]
    #[case::unix("a\nb\n", LineEnding::Lf)]
    #[case::windows("a\r\nb\r\n", LineEnding::CrLf)]
    #[case::mostly_unix("a\r\nb\nc\n", LineEnding::Lf)]
    fn detects_dominant_line_ending(#[case] content: &str, #[case] expected: LineEnding) {
        assert_eq!(LineEnding::dominant(content), expected);
    }

    #[test]
    fn interleave_trims_and_skips_blank_lines() {
        let laid_out = interleave_with_gap("  let a = 1;\n\n let b = 2;  \n", "\n    ");
        assert_eq!(laid_out, "let a = 1;\n    let b = 2;\n    ");
    }
}
