//! Abstract syntax tree for dialogue scripts.
//!
//! A [`Script`] is an ordered list of [`Paragraph`]s. Each paragraph lays its
//! [`Command`]s out on a timeline measured in *reveal units*: every visible
//! character costs one unit and `{pause N}` costs `N`. A renderer reveals a
//! paragraph by sampling it at a growing reveal position.

use crate::lexer::Span;

/// The root node of every parsed script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub paragraphs: Vec<Paragraph>,
}

impl Script {
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }
}

/// One speech bubble worth of dialogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub span: Span,
    /// `None` means "whoever owns the script".
    pub speaker: Option<String>,
    /// Total reveal units; the paragraph is fully shown once the reveal position reaches it.
    pub duration: f32,
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
}

/// A single timed entry of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Text revealed one character per unit, starting at `start`.
    Text { start: f32, text: String, style: TextStyle },
    /// Switches the speaker's portrait from `start` onward.
    Expression { start: f32, name: String },
    /// Silence: nothing is revealed for `units`.
    Pause { start: f32, units: f32 },
}

impl Command {
    pub fn start(&self) -> f32 {
        match self {
            Command::Text { start, .. } | Command::Expression { start, .. } | Command::Pause { start, .. } => *start,
        }
    }

    /// Reveal units this command occupies.
    pub fn units(&self) -> f32 {
        match self {
            Command::Text { text, .. } => text.chars().count() as f32,
            Command::Expression { .. } => 0.0,
            Command::Pause { units, .. } => *units,
        }
    }

    pub fn end(&self) -> f32 {
        self.start() + self.units()
    }
}

/// A visible slice of a text command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub style: TextStyle,
    /// Whether every character of the command is visible.
    pub complete: bool,
}

impl Paragraph {
    pub fn is_revealed(&self, reveal: f32) -> bool {
        reveal >= self.duration
    }

    /// Name of the last expression that started at or before `reveal`.
    pub fn expression_at(&self, reveal: f32) -> Option<&str> {
        self.commands
            .iter()
            .take_while(|c| c.start() <= reveal)
            .filter_map(|c| match c {
                Command::Expression { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .last()
    }

    /// Text visible at `reveal`, cut at character boundaries.
    pub fn visible_runs(&self, reveal: f32) -> Vec<TextRun<'_>> {
        let mut runs = Vec::new();
        for command in &self.commands {
            let Command::Text { start, text, style } = command else {
                continue;
            };
            if *start >= reveal {
                break;
            }
            let total = text.chars().count();
            let shown = ((reveal - start).floor().max(0.0) as usize).min(total);
            if shown == 0 {
                continue;
            }
            let cut = text.char_indices().nth(shown).map(|(i, _)| i).unwrap_or(text.len());
            runs.push(TextRun { text: &text[..cut], style: *style, complete: shown == total });
        }
        runs
    }

    /// The full text with styling dropped.
    pub fn plain_text(&self) -> String {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
