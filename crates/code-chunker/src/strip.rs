/// Removes string literals and comments from lines of C-family code so that
/// brace counting only sees structural braces.
///
/// This is a per-line approximation. Block comments are tracked across lines;
/// strings are not, so a multi-line string or a nested template-literal
/// expression can still leak braces.
#[derive(Debug, Clone, Default)]
pub(crate) struct CodeStripper {
    in_block_comment: bool,
    /// `#` starts a line comment (php, hcl)
    hash_comments: bool,
    /// `'` only opens a char literal when it closes right after (rust lifetimes)
    char_literals_only: bool,
}

impl CodeStripper {
    pub fn new(hash_comments: bool, char_literals_only: bool) -> Self {
        Self {
            in_block_comment: false,
            hash_comments,
            char_literals_only,
        }
    }

    /// Code portion of `line` with literal contents and comments dropped
    pub fn strip(&mut self, line: &str) -> String {
        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(line.len());
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if self.in_block_comment {
                if c == '*' && next == Some('/') {
                    self.in_block_comment = false;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }

            match c {
                '/' if next == Some('/') => break,
                '/' if next == Some('*') => {
                    self.in_block_comment = true;
                    i += 2;
                }
                '#' if self.hash_comments && next != Some('[') => break,
                '\'' if self.char_literals_only => {
                    i = skip_char_literal(&chars, i).unwrap_or(i + 1);
                }
                '"' | '\'' | '`' => {
                    i = skip_string(&chars, i, c);
                    out.push(c);
                    out.push(c);
                }
                _ => {
                    out.push(c);
                    i += 1;
                }
            }
        }

        out
    }
}

/// Index just past the closing quote, or the end of the line when unterminated
fn skip_string(chars: &[char], open: usize, quote: char) -> usize {
    let mut i = open + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

/// `'x'`, `'\n'`, `'\u{1F600}'`; anything else is a lifetime or label.
fn skip_char_literal(chars: &[char], open: usize) -> Option<usize> {
    match chars.get(open + 1)? {
        '\\' => {
            let close = chars[open + 2..].iter().take(10).position(|&c| c == '\'')?;
            Some(open + 2 + close + 1)
        }
        _ if chars.get(open + 2) == Some(&'\'') => Some(open + 3),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_strings_and_line_comments() {
        let mut s = CodeStripper::default();
        assert_eq!(s.strip(r#"let s = "{ not a brace }"; // {"#), r#"let s = ""; "#);
        assert_eq!(s.strip("const t = `${a}`; {"), "const t = ``; {");
        assert_eq!(s.strip(r#"x = "esc \" {" + '}'"#), r#"x = "" + ''"#);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let mut s = CodeStripper::default();
        assert_eq!(s.strip("a /* {"), "a ");
        assert_eq!(s.strip("still { comment"), "");
        assert_eq!(s.strip("end */ {"), " {");
    }

    #[test]
    fn test_hash_comments() {
        let mut s = CodeStripper::new(true, false);
        assert_eq!(s.strip("resource \"x\" \"y\" { # }"), "resource \"\" \"\" { ");
        assert_eq!(s.strip("#[Attribute] {"), "#[Attribute] {");
    }

    #[test]
    fn test_rust_lifetimes_are_not_strings() {
        let mut s = CodeStripper::new(false, true);
        assert_eq!(s.strip("fn f(x: &'a str) {"), "fn f(x: &a str) {");
        assert_eq!(s.strip("let c = '{';"), "let c = ;");
        assert_eq!(s.strip(r"let c = '\u{7b}'; {"), "let c = ; {");
    }
}
