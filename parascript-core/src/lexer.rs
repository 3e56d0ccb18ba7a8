use std::iter::Peekable;
use std::str::CharIndices;
use unicode_xid::UnicodeXID;

/// Source location of a token: 1-based line plus byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokKind {
    /// `@Name` at the start of a line.
    Speaker(String),
    /// Literal text with escapes already resolved.
    Text(String),
    /// Raw content between `{` and `}`, trimmed.
    Tag(String),
    Newline,
    /// One or more blank lines: a paragraph break.
    Blank,
    Comment(String),
    Error(String),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tok {
    pub tok: TokKind,
    pub span: Span,
}

pub struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    tokens: Vec<Tok>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src, chars: src.char_indices().peekable(), line: 1, tokens: Vec::new() }
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map(|&(i, _)| i).unwrap_or(self.src.len())
    }

    // Remainder of the current line, without the line break.
    fn rest_of_line(&self, from: usize) -> &'a str {
        let src: &'a str = self.src;
        let rest = &src[from..];
        let end = rest.find('\n').unwrap_or(rest.len());
        rest[..end].trim_end_matches('\r')
    }

    fn push(&mut self, tok: TokKind, start: usize, end: usize) {
        self.tokens.push(Tok { tok, span: Span { line: self.line, start, end } });
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.advance() {
            if c == '\n' {
                break;
            }
        }
        self.line += 1;
    }

    fn blank_line(&mut self, start: usize) {
        let collapse = matches!(self.tokens.last().map(|t| &t.tok), None | Some(TokKind::Blank));
        if !collapse {
            self.push(TokKind::Blank, start, start);
        }
        self.skip_line();
    }

    fn speaker_line(&mut self, start: usize) {
        let name = self.rest_of_line(start)[1..].trim().to_string();
        let end = start + self.rest_of_line(start).len();
        self.push(TokKind::Speaker(name), start, end);
        self.skip_line();
    }

    fn comment_line(&mut self, start: usize) {
        let body = self.rest_of_line(start)[1..].trim().to_string();
        let end = start + self.rest_of_line(start).len();
        self.push(TokKind::Comment(body), start, end);
        self.skip_line();
    }

    fn flush_text(&mut self, buf: &mut String, start: usize, end: usize) {
        if !buf.is_empty() {
            self.push(TokKind::Text(std::mem::take(buf)), start, end);
        }
    }

    fn text_line(&mut self) {
        let mut buf = String::new();
        let mut run_start = self.offset();
        loop {
            let at = self.offset();
            match self.peek() {
                None => {
                    self.flush_text(&mut buf, run_start, at);
                    self.push(TokKind::Newline, at, at);
                    return;
                }
                Some('\n') => {
                    self.flush_text(&mut buf, run_start, at);
                    self.advance();
                    self.push(TokKind::Newline, at, at + 1);
                    self.line += 1;
                    return;
                }
                Some('\r') => {
                    self.advance();
                }
                Some('{') => {
                    self.advance();
                    if self.peek() == Some('{') {
                        self.advance();
                        buf.push('{');
                    } else {
                        self.flush_text(&mut buf, run_start, at);
                        self.tag_after_brace(at);
                        run_start = self.offset();
                    }
                }
                Some('}') => {
                    self.advance();
                    if self.peek() == Some('}') {
                        self.advance();
                        buf.push('}');
                    } else {
                        self.flush_text(&mut buf, run_start, at);
                        self.push(TokKind::Error("unmatched '}'".to_string()), at, at + 1);
                        run_start = self.offset();
                    }
                }
                Some(c) => {
                    self.advance();
                    buf.push(c);
                }
            }
        }
    }

    // The opening brace has already been consumed.
    fn tag_after_brace(&mut self, open: usize) {
        let mut content = String::new();
        loop {
            match self.peek() {
                Some('}') => {
                    self.advance();
                    let end = self.offset();
                    self.push(TokKind::Tag(content.trim().to_string()), open, end);
                    return;
                }
                Some('\n') | None => {
                    let end = self.offset();
                    self.push(TokKind::Error("unterminated tag".to_string()), open, end);
                    return;
                }
                Some(c) => {
                    self.advance();
                    content.push(c);
                }
            }
        }
    }

    pub fn run(mut self) -> Vec<Tok> {
        while self.peek().is_some() {
            let start = self.offset();
            let line = self.rest_of_line(start);
            if line.trim().is_empty() {
                self.blank_line(start);
            } else if line.starts_with('#') {
                self.comment_line(start);
            } else if line.starts_with('@') {
                self.speaker_line(start);
            } else {
                self.text_line();
            }
        }

        let end = self.src.len();
        self.push(TokKind::Eof, end, end);
        self.tokens
    }
}

/// Expression and style names: an identifier that may also contain `-`.
pub fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_xid_start() || c == '_' => chars.all(|c| c.is_xid_continue() || c == '-'),
        _ => false,
    }
}
