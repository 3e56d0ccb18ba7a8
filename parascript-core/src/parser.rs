use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Command, Paragraph, Script, TextStyle};
use crate::lexer::{is_ident, Span, Tok, TokKind};

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<cmd>/?[^\s/]+)(?:\s+(?P<arg>.+))?$").expect("tag pattern"));

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub line: usize,
    pub msg: String,
}

pub struct Parser<'a> {
    toks: &'a [Tok],
    cursor: usize,
    errors: Vec<ParseError>,
}

#[derive(Default)]
struct ParagraphBuilder {
    reveal: f32,
    style: TextStyle,
    commands: Vec<Command>,
}

impl ParagraphBuilder {
    fn text(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let units = s.chars().count() as f32;
        if let Some(Command::Text { text, style, .. }) = self.commands.last_mut() {
            if *style == self.style {
                text.push_str(s);
                self.reveal += units;
                return;
            }
        }
        self.commands.push(Command::Text { start: self.reveal, text: s.to_string(), style: self.style });
        self.reveal += units;
    }

    fn expression(&mut self, name: &str) {
        self.commands.push(Command::Expression { start: self.reveal, name: name.to_string() });
    }

    fn pause(&mut self, units: f32) {
        self.commands.push(Command::Pause { start: self.reveal, units });
        self.reveal += units;
    }

    fn finish(self, span: Span, speaker: Option<String>) -> Paragraph {
        Paragraph { span, speaker, duration: self.reveal, commands: self.commands }
    }
}

impl<'a> Parser<'a> {
    pub fn new(toks: &'a [Tok]) -> Self {
        Self { toks, cursor: 0, errors: Vec::new() }
    }

    fn peek(&self) -> Option<&'a TokKind> {
        self.toks.get(self.cursor).map(|t| &t.tok)
    }

    fn bump(&mut self) -> Option<&'a Tok> {
        let tok = self.toks.get(self.cursor);
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn span(&self) -> Span {
        self.toks.get(self.cursor).map(|t| t.span).unwrap_or_default()
    }

    fn error(&mut self, line: usize, msg: impl Into<String>) {
        self.errors.push(ParseError { line, msg: msg.into() });
    }

    fn skip_trivia(&mut self) {
        while let Some(TokKind::Newline | TokKind::Blank | TokKind::Comment(_)) = self.peek() {
            self.bump();
        }
    }

    pub fn parse(mut self) -> Result<Script, Vec<ParseError>> {
        let mut paragraphs = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None | Some(TokKind::Eof) => break,
                _ => {
                    if let Some(p) = self.paragraph() {
                        paragraphs.push(p);
                    }
                }
            }
        }

        if self.errors.is_empty() {
            log::debug!("Parsed script with {} paragraphs", paragraphs.len());
            Ok(Script { paragraphs })
        } else {
            Err(self.errors)
        }
    }

    fn paragraph(&mut self) -> Option<Paragraph> {
        let span = self.span();
        let mut speaker = None;
        if let Some(TokKind::Speaker(name)) = self.peek() {
            self.bump();
            if !name.is_empty() {
                speaker = Some(name.clone());
            }
        }

        let mut builder = ParagraphBuilder::default();
        loop {
            let line = self.span().line;
            match self.peek() {
                Some(TokKind::Text(s)) => {
                    self.bump();
                    builder.text(s);
                }
                Some(TokKind::Tag(content)) => {
                    self.bump();
                    self.tag(content, line, &mut builder);
                }
                Some(TokKind::Newline) => {
                    self.bump();
                    let has_text = builder.commands.iter().any(|c| matches!(c, Command::Text { .. }));
                    if has_text && matches!(self.peek(), Some(TokKind::Text(_) | TokKind::Tag(_))) {
                        builder.text("\n");
                    }
                }
                Some(TokKind::Comment(_)) => {
                    self.bump();
                }
                Some(TokKind::Error(msg)) => {
                    self.bump();
                    self.error(line, msg.clone());
                }
                Some(TokKind::Speaker(name)) => {
                    self.bump();
                    self.error(line, format!("speaker '{}' must open a paragraph", name));
                }
                Some(TokKind::Blank) | Some(TokKind::Eof) | None => break,
            }
        }

        if builder.commands.is_empty() {
            if let Some(name) = speaker {
                self.error(span.line, format!("paragraph for '{}' has no text", name));
            }
            return None;
        }
        Some(builder.finish(span, speaker))
    }

    fn tag(&mut self, content: &str, line: usize, builder: &mut ParagraphBuilder) {
        let Some(caps) = TAG.captures(content) else {
            if content.is_empty() {
                self.error(line, "empty tag");
            } else {
                self.error(line, format!("malformed tag '{}'", content));
            }
            return;
        };
        let cmd = caps.name("cmd").map_or("", |m| m.as_str());
        let arg = caps.name("arg").map(|m| m.as_str().trim());

        match (cmd, arg) {
            ("b", None) => builder.style.bold = true,
            ("/b", None) => builder.style.bold = false,
            ("i", None) => builder.style.italic = true,
            ("/i", None) => builder.style.italic = false,
            ("pause", Some(n)) => match n.parse::<f32>() {
                Ok(units) if units.is_finite() && units >= 0.0 => builder.pause(units),
                _ => self.error(line, format!("pause expects a non-negative number, got '{}'", n)),
            },
            ("pause", None) => self.error(line, "pause expects a length"),
            ("face", Some(name)) if is_ident(name) => builder.expression(name),
            ("face", _) => self.error(line, "face expects an expression name"),
            (name, None) if is_ident(name) => builder.expression(name),
            (other, _) => self.error(line, format!("unknown tag '{}'", other)),
        }
    }
}
