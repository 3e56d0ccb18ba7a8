use crate::ast::{Command, Paragraph};

/// Tracks which commands of the current paragraph have started.
///
/// The cursor only moves forward; callers reset it whenever the paragraph
/// changes or a conversation restarts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptCursor {
    command_index: usize,
}

impl ScriptCursor {
    pub fn reset(&mut self) {
        self.command_index = 0;
    }

    pub fn command_index(&self) -> usize {
        self.command_index
    }

    /// Moves past every command that has started at `reveal` and returns the ones newly passed.
    pub fn advance<'p>(&mut self, paragraph: &'p Paragraph, reveal: f32) -> &'p [Command] {
        let from = self.command_index.min(paragraph.commands.len());
        let passed = paragraph.commands[from..]
            .iter()
            .take_while(|c| c.start() <= reveal)
            .count();
        self.command_index = from + passed;
        &paragraph.commands[from..self.command_index]
    }
}
