//! Line splitter for declaration text.
//!
//! The parser never looks across line boundaries, so lexing is just: number
//! each line, drop any `--` comment, trim, and split on whitespace.

/// One line of declaration text with its comment removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclLine<'a> {
    /// The 1-based line number in the file.
    pub number: u32,
    /// The trimmed code portion of the line.
    pub text: &'a str,
    /// `text` split on whitespace.
    pub tokens: Vec<&'a str>,
}

impl<'a> DeclLine<'a> {
    /// Builds a line from raw text, stripping a trailing `--` comment.
    pub fn new(number: u32, raw: &'a str) -> Self {
        let code = match raw.find("--") {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let text = code.trim();
        Self {
            number,
            text,
            tokens: text.split_whitespace().collect(),
        }
    }

    /// Returns the first word lowercased, without any `(` or `;` glued to it.
    ///
    /// `port(` and `port (` both yield `"port"`.
    pub fn first_word(&self) -> Option<String> {
        let first = self.tokens.first()?;
        let word = first.split(['(', ';']).next().unwrap_or("");
        Some(word.to_ascii_lowercase())
    }

    /// Returns `true` if any token equals `keyword`, ignoring case and a
    /// trailing `;`.
    pub fn has_word(&self, keyword: &str) -> bool {
        self.tokens
            .iter()
            .any(|t| t.trim_end_matches(';').eq_ignore_ascii_case(keyword))
    }

    /// Returns the text following the first `(`, as its own line, when that
    /// text is non-empty.
    ///
    /// Used for openers such as `port (clk : in std_logic;` that carry the
    /// first list entry on the same line.
    pub fn after_open_paren(&self) -> Option<DeclLine<'a>> {
        let pos = self.text.find('(')?;
        let rest = self.text[pos + 1..].trim();
        if rest.is_empty() {
            return None;
        }
        Some(DeclLine {
            number: self.number,
            text: rest,
            tokens: rest.split_whitespace().collect(),
        })
    }

    /// Returns `true` if the line has no code.
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Splits declaration text into numbered lines.
pub fn lex_lines(content: &str) -> impl Iterator<Item = DeclLine<'_>> {
    content
        .lines()
        .enumerate()
        .map(|(idx, raw)| DeclLine::new(idx as u32 + 1, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_splits() {
        let line = DeclLine::new(3, "    clk : in std_logic; -- main clock");
        assert_eq!(line.text, "clk : in std_logic;");
        assert_eq!(line.tokens, vec!["clk", ":", "in", "std_logic;"]);
        assert_eq!(line.number, 3);
    }

    #[test]
    fn comment_only_line_is_blank() {
        assert!(DeclLine::new(1, "  -- nothing here").is_blank());
        assert!(DeclLine::new(1, "").is_blank());
    }

    #[test]
    fn first_word_ignores_glued_paren() {
        assert_eq!(DeclLine::new(1, "PORT(").first_word().as_deref(), Some("port"));
        assert_eq!(DeclLine::new(1, "port (").first_word().as_deref(), Some("port"));
        assert_eq!(DeclLine::new(1, "end;").first_word().as_deref(), Some("end"));
        assert_eq!(DeclLine::new(1, "   ").first_word(), None);
    }

    #[test]
    fn has_word_is_case_insensitive() {
        let line = DeclLine::new(1, "END ENTITY fifo;");
        assert!(line.has_word("entity"));
        assert!(line.has_word("fifo"));
        assert!(!line.has_word("port"));
    }

    #[test]
    fn after_open_paren() {
        let line = DeclLine::new(7, "port (clk : in std_logic;");
        let tail = line.after_open_paren().unwrap();
        assert_eq!(tail.text, "clk : in std_logic;");
        assert_eq!(tail.number, 7);
        assert!(DeclLine::new(7, "port (").after_open_paren().is_none());
    }

    #[test]
    fn lex_numbers_from_one() {
        let lines: Vec<_> = lex_lines("a\n\nb").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].number, 3);
        assert!(lines[1].is_blank());
    }
}
