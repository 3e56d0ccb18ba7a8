use parascript_core::{Command, Paragraph, Script, ScriptCursor, TextStyle};

use crate::assets::{Handle, Texture};
use crate::scene::Scene;
use crate::FRAME_TIME;

/// Reveal units per second.
pub const REVEAL_RATE: f32 = 20.0;
/// World-space distance within which the player can start a conversation.
pub const INTERACTION_RADIUS: f32 = 50.0;

pub fn reveal_at(frames: u32) -> f32 {
    REVEAL_RATE * frames as f32 * FRAME_TIME
}

/// An active conversation with one scripted object.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub object: usize,
    /// Name of the scripted object, the speaker for paragraphs without one.
    pub owner: String,
    pub script: Handle<Script>,
    pub paragraph: usize,
    pub cursor: ScriptCursor,
}

impl Conversation {
    /// `None` when the object has no script.
    pub fn with(scene: &Scene, object: usize) -> Option<Self> {
        let target = scene.get(object)?;
        let script = target.script.clone()?;
        Some(Self {
            object,
            owner: target.name().to_string(),
            script,
            paragraph: 0,
            cursor: ScriptCursor::default(),
        })
    }

    pub fn restart(&mut self) {
        self.paragraph = 0;
        self.cursor.reset();
    }

    pub fn paragraph_count(&self) -> usize {
        self.script.len()
    }

    pub fn is_last(&self) -> bool {
        self.paragraph + 1 >= self.paragraph_count()
    }

    pub fn current(&self) -> Option<&Paragraph> {
        self.script.paragraph(self.paragraph)
    }

    pub fn speaker(&self) -> &str {
        self.current()
            .and_then(|p| p.speaker.as_deref())
            .unwrap_or(&self.owner)
    }

    /// Runs commands that start at or before `reveal` and haven't run yet.
    pub fn advance_cursor(&mut self, reveal: f32) {
        let script = self.script.clone();
        let Some(paragraph) = script.paragraph(self.paragraph) else {
            return;
        };
        for command in self.cursor.advance(paragraph, reveal) {
            if let Command::Expression { name, .. } = command {
                log::debug!("{} looks {}", self.speaker(), name);
            }
        }
    }

    /// Everything a text box needs to draw the current paragraph.
    pub fn view(&self, scene: &Scene, reveal: f32) -> Option<DialogueView> {
        let paragraph = self.current()?;
        let speaker = self.speaker().to_string();
        let expression = paragraph.expression_at(reveal).map(str::to_string);
        let portrait = scene
            .find_by_name(&speaker)
            .and_then(|i| scene.get(i))
            .and_then(|o| o.portrait(expression.as_deref()))
            .cloned();
        let runs = paragraph
            .visible_runs(reveal)
            .into_iter()
            .map(|run| (run.text.to_string(), run.style))
            .collect();

        Some(DialogueView {
            speaker,
            expression,
            portrait,
            paragraph: self.paragraph,
            paragraph_count: self.paragraph_count(),
            runs,
            revealed: paragraph.is_revealed(reveal),
        })
    }
}

#[derive(Debug, Clone)]
pub struct DialogueView {
    pub speaker: String,
    pub expression: Option<String>,
    pub portrait: Option<Handle<Texture>>,
    pub paragraph: usize,
    pub paragraph_count: usize,
    pub runs: Vec<(String, TextStyle)>,
    pub revealed: bool,
}

impl DialogueView {
    pub fn text(&self) -> String {
        self.runs.iter().map(|(text, _)| text.as_str()).collect()
    }
}
