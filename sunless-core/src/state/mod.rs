mod editor;
mod paused;
mod playing;
mod talking;

use std::fmt;

use crate::dialogue::Conversation;
use crate::editor::EditorSession;
use crate::event::Input;
use crate::game::World;
use crate::renderer::Renderer;
use crate::FRAME_TIME;

pub use talking::SKIP_FRAMES;

/// The game states, each carrying its own payload.
#[derive(Debug, Clone)]
pub enum GameState {
    Playing,
    Talking(Conversation),
    Paused,
    Editor(EditorSession),
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::Playing => "Playing",
            GameState::Talking(_) => "Talking",
            GameState::Paused => "Paused",
            GameState::Editor(_) => "Editor",
        }
    }

    fn enter(&mut self, world: &mut World) {
        match self {
            GameState::Talking(conversation) => talking::enter(conversation, world),
            GameState::Editor(_) => editor::enter(world),
            GameState::Playing | GameState::Paused => {}
        }
    }

    fn exit(&mut self, world: &mut World) {
        match self {
            GameState::Talking(conversation) => talking::exit(conversation),
            GameState::Editor(session) => editor::exit(session, world),
            GameState::Playing | GameState::Paused => {}
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the top state asks the stack to do after its update.
#[derive(Debug)]
pub enum Transition {
    None,
    Push(GameState),
    Pop,
}

#[derive(Debug, Clone)]
pub struct StateEntry {
    pub state: GameState,
    frames: u32,
}

impl StateEntry {
    fn new(state: GameState) -> Self {
        Self { state, frames: 0 }
    }

    /// Frames spent as the top of the stack.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn seconds(&self) -> f32 {
        self.frames as f32 * FRAME_TIME
    }

    pub fn set_frames(&mut self, frames: u32) {
        self.frames = frames;
    }

    fn update(&mut self, world: &mut World, input: &Input) -> Transition {
        match &mut self.state {
            GameState::Playing => playing::update(world, input),
            GameState::Talking(conversation) => talking::update(conversation, &mut self.frames, world, input),
            GameState::Paused => paused::update(input),
            GameState::Editor(session) => editor::update(session, world, input),
        }
    }
}

/// Pushdown automaton over [`GameState`]. Never empty.
#[derive(Debug, Clone)]
pub struct StateStack {
    entries: Vec<StateEntry>,
}

impl StateStack {
    pub fn new(initial: GameState) -> Self {
        Self { entries: vec![StateEntry::new(initial)] }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StateEntry] {
        &self.entries
    }

    pub fn top(&self) -> &StateEntry {
        &self.entries[self.entries.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut StateEntry {
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    /// Suspends the current top and enters `state`.
    pub fn push(&mut self, mut state: GameState, world: &mut World) {
        log::info!("State push: {} -> {}", self.top().state, state);
        state.enter(world);
        self.entries.push(StateEntry::new(state));
    }

    /// Exits the top state and resumes the one beneath. The last state
    /// can't be popped.
    pub fn pop(&mut self, world: &mut World) -> bool {
        if self.entries.len() <= 1 {
            log::warn!("Refusing to pop the last state ({})", self.top().state);
            return false;
        }
        if let Some(mut entry) = self.entries.pop() {
            entry.state.exit(world);
            log::info!("State pop: {} -> {}", entry.state, self.top().state);
        }
        true
    }

    /// Runs one frame of the top state and applies its transition.
    pub fn update(&mut self, world: &mut World, input: &Input) {
        match self.top_mut().update(world, input) {
            Transition::None => {
                let top = self.top_mut();
                top.frames = top.frames.saturating_add(1);
            }
            Transition::Push(state) => self.push(state, world),
            Transition::Pop => {
                self.pop(world);
            }
        }
    }

    pub fn render(&self, world: &World, renderer: &mut dyn Renderer) {
        self.render_entry(self.entries.len() - 1, world, renderer);
    }

    /// Overlays draw the state beneath them first.
    fn render_entry(&self, index: usize, world: &World, renderer: &mut dyn Renderer) {
        let entry = &self.entries[index];
        let previous = |renderer: &mut dyn Renderer| {
            if index > 0 {
                self.render_entry(index - 1, world, renderer);
            } else {
                renderer.clear(crate::types::Color::BLACK);
            }
        };

        match &entry.state {
            GameState::Playing => playing::render(world, renderer),
            GameState::Talking(conversation) => {
                previous(renderer);
                talking::render(conversation, entry.frames, world, renderer);
            }
            GameState::Paused => {
                previous(renderer);
                paused::render(world, renderer);
            }
            GameState::Editor(session) => {
                previous(renderer);
                editor::render(session, world, renderer);
            }
        }
    }
}
