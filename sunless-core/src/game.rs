use std::path::Path;

use glam::Vec2;

use crate::assets::{AssetLoader, Assets};
use crate::audio::{AudioSink, NullAudio};
use crate::camera::CameraRig;
use crate::config::CoreConfig;
use crate::console::{CommandError, Console};
use crate::event::Input;
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::state::{GameState, StateStack};
use crate::storager::{self, SceneError};

/// Everything the states and console commands mutate.
pub struct World {
    pub scene: Scene,
    pub assets: Assets,
    pub camera: CameraRig,
    pub config: CoreConfig,
    pub dev_mode: bool,
    /// Default path for `save` and `load` without an argument.
    pub last_scene_path: Option<String>,
    pub audio: Box<dyn AudioSink>,
}

impl World {
    pub fn new(config: CoreConfig, loader: Box<dyn AssetLoader>) -> Self {
        let screen = Vec2::new(config.window.width as f32, config.window.height as f32);
        Self {
            scene: Scene::new(),
            assets: Assets::new(loader),
            camera: CameraRig::new(config.camera.clone(), screen),
            dev_mode: config.gameplay.developer_mode,
            config,
            last_scene_path: None,
            audio: Box::new(NullAudio),
        }
    }

    pub fn save_scene(&mut self, path: &str) -> Result<(), SceneError> {
        match storager::save(&self.scene, path) {
            Ok(()) => {
                log::info!("Successfully saved current scene to '{}'.", path);
                self.last_scene_path = Some(path.to_string());
                Ok(())
            }
            Err(e) => {
                log::error!("Couldn't save current scene to '{}': {}", path, e);
                Err(e)
            }
        }
    }

    /// Replaces the scene with the file's contents. On any error the
    /// current scene is left as it was.
    pub fn load_scene(&mut self, path: &str) -> Result<(), SceneError> {
        let records = match storager::load(path) {
            Ok(records) => records,
            Err(e) => {
                if !Path::new(path).exists() {
                    log::error!("Couldn't load scene from '{}' because that file doesn't exist.", path);
                } else {
                    log::error!("Couldn't load scene from '{}': {}", path, e);
                }
                return Err(e);
            }
        };

        self.scene.clear();
        self.assets.gc();
        let objects = records
            .iter()
            .map(|record| record.instantiate(&mut self.assets))
            .collect();
        self.scene.replace(objects);

        log::info!("Successfully loaded scene '{}' ({} objects).", path, self.scene.len());
        self.last_scene_path = Some(path.to_string());
        Ok(())
    }
}

/// The whole game: world, state stack and developer console.
pub struct Game {
    pub world: World,
    stack: StateStack,
    console: Console,
}

impl Game {
    pub fn new(config: CoreConfig, loader: Box<dyn AssetLoader>) -> Self {
        Self {
            world: World::new(config, loader),
            stack: StateStack::new(GameState::Playing),
            console: Console::new(),
        }
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.world.audio = audio;
        self
    }

    pub fn stack(&self) -> &StateStack {
        &self.stack
    }

    pub fn state(&self) -> &GameState {
        &self.stack.top().state
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn scene(&self) -> &Scene {
        &self.world.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.world.scene
    }

    /// Advances one frame.
    pub fn step(&mut self, input: &Input) {
        self.world.camera.tick();
        self.stack.update(&mut self.world, input);
    }

    /// Advances `frames` frames with no input.
    pub fn wait(&mut self, frames: u32) {
        let idle = Input::idle();
        for _ in 0..frames {
            self.step(&idle);
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        self.stack.render(&self.world, renderer);
    }

    pub fn run_command(&mut self, line: &str) -> Result<(), CommandError> {
        self.console.execute(&mut self.world, line)
    }

    pub fn push_state(&mut self, state: GameState) {
        self.stack.push(state, &mut self.world);
    }

    pub fn pop_state(&mut self) -> bool {
        self.stack.pop(&mut self.world)
    }
}
