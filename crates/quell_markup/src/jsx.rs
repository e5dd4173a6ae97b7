//! JSX line-range scanning for `.tsx` sources.
//!
//! The engine only needs to know which lines of a `.tsx` file sit inside a
//! JSX element, to pick the `{/* ... */}` marker form over the `// ...`
//! form. This scanner computes the line ranges of top-level JSX elements
//! with a single pass: strings, comments, and template literals are
//! skipped; a `<` in expression position opens an element; tag nesting is
//! tracked until the element closes.
//!
//! The scan is a heuristic, not a TSX parser: it classifies lines, it does
//! not build a tree. Expressions embedded in JSX (`{...}`) are skipped as
//! balanced brace groups, which keeps nested elements inside them within
//! the enclosing range.

use quell_source::{Region, RegionKind};

/// Returns the line ranges of top-level JSX elements in `source`, as
/// `Markup` regions (1-indexed, inclusive).
pub fn jsx_line_ranges(source: &str) -> Vec<Region> {
    Scanner::new(source).scan()
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum TagKind {
    Open,
    Close,
    SelfClose,
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    /// Last significant character seen in code context.
    last_sig: Option<char>,
    /// The significant character before `last_sig`.
    prev_sig: Option<char>,
    /// Last identifier word seen in code context.
    last_word: String,
    word: String,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            last_sig: None,
            prev_sig: None,
            last_word: String::new(),
            word: String::new(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek_at(&self, offset: usize) -> char {
        self.chars.get(self.pos + offset).copied().unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.pos];
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        c
    }

    fn scan(mut self) -> Vec<Region> {
        let mut ranges = Vec::new();
        while !self.at_end() {
            match self.peek() {
                '/' if self.peek_at(1) == '/' => self.skip_line_comment(),
                '/' if self.peek_at(1) == '*' => self.skip_block_comment(),
                '"' | '\'' => self.skip_string(),
                '`' => self.skip_template_literal(),
                '<' if self.in_expression_position() => {
                    if let Some(region) = self.scan_element() {
                        ranges.push(region);
                    } else {
                        let c = self.advance();
                        self.note_sig(c);
                    }
                }
                c if c.is_alphanumeric() || c == '_' || c == '$' => {
                    self.word.push(c);
                    self.note_sig(c);
                    self.advance();
                }
                c => {
                    if !c.is_whitespace() {
                        self.note_sig(c);
                    }
                    self.flush_word();
                    self.advance();
                }
            }
        }
        ranges
    }

    fn note_sig(&mut self, c: char) {
        self.prev_sig = self.last_sig;
        self.last_sig = Some(c);
    }

    fn flush_word(&mut self) {
        if !self.word.is_empty() {
            self.last_word = std::mem::take(&mut self.word);
        }
    }

    /// Returns `true` if a `<` at the current position would start a JSX
    /// element rather than a comparison or a generic argument list.
    fn in_expression_position(&self) -> bool {
        let next = self.peek_at(1);
        if !(next.is_ascii_alphabetic() || next == '>' || next == '_') {
            return false;
        }
        match self.last_sig {
            None => true,
            Some('>') => self.prev_sig == Some('='), // arrow body: `=> <div>`
            Some(c) if "(,=?:[{&|;!".contains(c) => true,
            _ => {
                let word = if self.word.is_empty() {
                    self.last_word.as_str()
                } else {
                    self.word.as_str()
                };
                word == "return" || word == "default"
            }
        }
    }

    /// Scans one top-level JSX element starting at the current `<`.
    ///
    /// Returns `None` (consuming nothing) if the lookahead says this is not
    /// a JSX tag after all (e.g. a `<T,>` generic parameter list).
    fn scan_element(&mut self) -> Option<Region> {
        classify_tag(&self.chars, self.pos)?;
        let start_line = self.line;
        let mut depth = 0u32;

        loop {
            if self.at_end() {
                // Unterminated element: classify the rest of the file.
                return Some(Region::new(RegionKind::Markup, start_line, self.line));
            }
            match self.peek() {
                '<' => match classify_tag(&self.chars, self.pos) {
                    Some(kind) => {
                        self.consume_tag();
                        match kind {
                            TagKind::Open => depth += 1,
                            TagKind::Close => depth = depth.saturating_sub(1),
                            TagKind::SelfClose => {
                                if depth == 0 {
                                    // A lone self-closing element.
                                    return Some(Region::new(
                                        RegionKind::Markup,
                                        start_line,
                                        self.line,
                                    ));
                                }
                            }
                        }
                        if depth == 0 {
                            return Some(Region::new(RegionKind::Markup, start_line, self.line));
                        }
                    }
                    None => {
                        self.advance();
                    }
                },
                '{' => self.skip_braced_expression(),
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Consumes one tag (`<name ...>`, `</name>`, `<>`), skipping quoted
    /// attribute values and braced attribute expressions.
    fn consume_tag(&mut self) {
        self.advance(); // <
        while !self.at_end() {
            match self.peek() {
                '>' => {
                    self.advance();
                    return;
                }
                '"' | '\'' => self.skip_string(),
                '{' => self.skip_braced_expression(),
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skips a balanced `{ ... }` group, honoring strings, template
    /// literals, and comments inside it.
    fn skip_braced_expression(&mut self) {
        self.advance(); // {
        let mut depth = 1u32;
        while !self.at_end() && depth > 0 {
            match self.peek() {
                '{' => {
                    depth += 1;
                    self.advance();
                }
                '}' => {
                    depth -= 1;
                    self.advance();
                }
                '"' | '\'' => self.skip_string(),
                '`' => self.skip_template_literal(),
                '/' if self.peek_at(1) == '/' => self.skip_line_comment(),
                '/' if self.peek_at(1) == '*' => self.skip_block_comment(),
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        self.advance();
        self.advance();
        while !self.at_end() {
            if self.peek() == '*' && self.peek_at(1) == '/' {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }
    }

    fn skip_string(&mut self) {
        let quote = self.advance();
        while !self.at_end() {
            let c = self.advance();
            if c == '\\' && !self.at_end() {
                self.advance();
            } else if c == quote || c == '\n' {
                break;
            }
        }
        self.note_sig(quote);
    }

    fn skip_template_literal(&mut self) {
        self.advance(); // `
        while !self.at_end() {
            match self.peek() {
                '`' => {
                    self.advance();
                    break;
                }
                '\\' => {
                    self.advance();
                    if !self.at_end() {
                        self.advance();
                    }
                }
                '$' if self.peek_at(1) == '{' => {
                    self.advance();
                    self.skip_braced_expression();
                }
                _ => {
                    self.advance();
                }
            }
        }
        self.note_sig('`');
    }
}

/// Looks ahead from a `<` to classify the tag without consuming input.
///
/// Returns `None` when the lookahead is not a JSX tag: a comma at tag level
/// marks a generic parameter list, and an operand-looking character right
/// after `<` marks a comparison.
fn classify_tag(chars: &[char], start: usize) -> Option<TagKind> {
    let peek = |i: usize| chars.get(start + i).copied().unwrap_or('\0');
    debug_assert_eq!(peek(0), '<');

    if peek(1) == '/' {
        return Some(TagKind::Close);
    }
    if peek(1) == '>' {
        return Some(TagKind::Open); // fragment
    }
    if !(peek(1).is_ascii_alphabetic() || peek(1) == '_') {
        return None;
    }

    let mut i = 1;
    let mut in_quote: Option<char> = None;
    let mut brace_depth = 0u32;
    let mut last = '\0';
    while start + i < chars.len() {
        let c = peek(i);
        if let Some(q) = in_quote {
            if c == q {
                in_quote = None;
            }
        } else if brace_depth > 0 {
            match c {
                '{' => brace_depth += 1,
                '}' => brace_depth -= 1,
                _ => {}
            }
        } else {
            match c {
                '"' | '\'' => in_quote = Some(c),
                '{' => brace_depth = 1,
                ',' => return None,
                '>' => {
                    return Some(if last == '/' {
                        TagKind::SelfClose
                    } else {
                        TagKind::Open
                    });
                }
                _ => {}
            }
        }
        if !c.is_whitespace() {
            last = c;
        }
        i += 1;
    }
    None
}
