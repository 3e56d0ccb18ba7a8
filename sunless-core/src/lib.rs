pub mod assets;
pub mod audio;
pub mod camera;
pub mod collision;
pub mod config;
pub mod console;
pub mod depth;
pub mod dialogue;
pub mod direction;
pub mod editor;
pub mod event;
pub mod game;
pub mod motion;
pub mod object;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod storager;
pub mod types;

/// Fixed simulation step.
pub const FRAME_TIME: f32 = 1.0 / 60.0;
/// Vertical world-to-screen compression of the isometric view.
pub const Y_SQUISH: f32 = 0.5;

pub use assets::{AssetLoader, Assets, FsLoader, MemoryLoader};
pub use config::CoreConfig;
pub use event::Input;
pub use game::{Game, World};
pub use object::Object;
pub use renderer::terminal::TerminalRenderer;
pub use scene::Scene;
pub use state::GameState;
pub use storager::SceneError;
