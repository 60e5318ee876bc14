//! Block boundary rules for the heuristic chunker, one per language family.

use crate::strip::CodeStripper;
use regex::Regex;

/// Decides where top-level blocks open and close, one line at a time.
///
/// For every line the chunker calls `opens_block` first and `consume` after.
pub(crate) trait BoundaryRule {
    /// Whether `line` starts a new top-level block
    fn opens_block(&mut self, line: &str) -> bool;

    /// Feed `line`; returns true when the current block closed on it
    fn consume(&mut self, line: &str) -> bool;

    /// Comment/attribute/decorator lines that belong to the next block
    fn is_trivia(&self, line: &str) -> bool;
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// `def ... end` style languages (ruby, lua, elixir)
pub(crate) struct KeywordRule<'r> {
    open: &'r Regex,
    close: &'r Regex,
    one_liner: &'r Regex,
    trivia: &'r Regex,
    block_indent: Option<usize>,
    just_opened: bool,
}

impl<'r> KeywordRule<'r> {
    pub fn new(open: &'r Regex, close: &'r Regex, one_liner: &'r Regex, trivia: &'r Regex) -> Self {
        Self {
            open,
            close,
            one_liner,
            trivia,
            block_indent: None,
            just_opened: false,
        }
    }
}

impl BoundaryRule for KeywordRule<'_> {
    fn opens_block(&mut self, line: &str) -> bool {
        // Nested definitions stay inside the enclosing block.
        if self.block_indent.is_some() || !self.open.is_match(line) {
            return false;
        }
        self.block_indent = Some(indent_of(line));
        self.just_opened = true;
        true
    }

    fn consume(&mut self, line: &str) -> bool {
        let just_opened = std::mem::take(&mut self.just_opened);
        let Some(indent) = self.block_indent else {
            return false;
        };

        let closed = if just_opened {
            self.one_liner.is_match(line)
        } else {
            self.close.is_match(line) && indent_of(line) <= indent
        };
        if closed {
            self.block_indent = None;
        }
        closed
    }

    fn is_trivia(&self, line: &str) -> bool {
        self.trivia.is_match(line)
    }
}

/// Brace-delimited languages
pub(crate) struct BraceRule<'r> {
    open: &'r Regex,
    trivia: &'r Regex,
    stripper: CodeStripper,
    depth: usize,
    active: bool,
    opened: bool,
}

impl<'r> BraceRule<'r> {
    pub fn new(open: &'r Regex, trivia: &'r Regex, stripper: CodeStripper) -> Self {
        Self {
            open,
            trivia,
            stripper,
            depth: 0,
            active: false,
            opened: false,
        }
    }
}

impl BoundaryRule for BraceRule<'_> {
    fn opens_block(&mut self, line: &str) -> bool {
        if self.depth != 0 || !self.open.is_match(line) {
            return false;
        }
        self.active = true;
        self.opened = false;
        true
    }

    fn consume(&mut self, line: &str) -> bool {
        let code = self.stripper.strip(line);
        for c in code.chars() {
            match c {
                '{' => {
                    self.depth += 1;
                    self.opened = true;
                }
                '}' => self.depth = self.depth.saturating_sub(1),
                _ => {}
            }
        }

        if !self.active || self.depth != 0 {
            return false;
        }

        // A declaration without a body ends at its semicolon.
        let closed = self.opened || code.trim_end().ends_with(';');
        if closed {
            self.active = false;
            self.opened = false;
        }
        closed
    }

    fn is_trivia(&self, line: &str) -> bool {
        self.trivia.is_match(line)
    }
}

/// Indentation languages (python): only column-0 definitions matter.
pub(crate) struct IndentRule<'r> {
    open: &'r Regex,
    trivia: &'r Regex,
}

impl<'r> IndentRule<'r> {
    pub fn new(open: &'r Regex, trivia: &'r Regex) -> Self {
        Self { open, trivia }
    }
}

impl BoundaryRule for IndentRule<'_> {
    fn opens_block(&mut self, line: &str) -> bool {
        self.open.is_match(line)
    }

    fn consume(&mut self, _line: &str) -> bool {
        false
    }

    fn is_trivia(&self, line: &str) -> bool {
        self.trivia.is_match(line)
    }
}
