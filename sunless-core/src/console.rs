use glam::Vec2;
use thiserror::Error;

use crate::game::World;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("usage: {usage}")]
    BadArguments { usage: &'static str },
    #[error("{0}")]
    Failed(String),
}

pub type CommandHandler = fn(&mut World, &[&str]) -> Result<(), CommandError>;

pub struct CommandEntry {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    handler: CommandHandler,
}

/// Named developer commands taking whitespace-separated arguments.
pub struct Console {
    commands: Vec<CommandEntry>,
    history: Vec<String>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// A console with the built-in commands registered.
    pub fn new() -> Self {
        let mut console = Self::empty();
        console.register("tp", "tp x:float y:float", "Teleport the player.", teleport);
        console.register("dev", "dev [on:bool]", "Toggle developer mode.", toggle_dev_mode);
        console.register("shake", "shake [trauma:float] [falloff:float]", "Trigger camera shake.", shake);
        console.register("sound", "sound path:string [volume:float] [pitch:float]", "Play a one-shot sound.", sound);
        console.register("move", "move dx:float dy:float", "Walk the player by an offset.", move_player);
        console.register("save", "save [path:string]", "Save the scene.", save);
        console.register("load", "load [path:string]", "Load a scene.", load);
        console
    }

    pub fn empty() -> Self {
        Self { commands: Vec::new(), history: Vec::new() }
    }

    pub fn register(
        &mut self,
        name: &'static str,
        usage: &'static str,
        description: &'static str,
        handler: CommandHandler,
    ) {
        self.commands.retain(|c| c.name != name);
        self.commands.push(CommandEntry { name, usage, description, handler });
    }

    pub fn commands(&self) -> &[CommandEntry] {
        &self.commands
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn execute(&mut self, world: &mut World, line: &str) -> Result<(), CommandError> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(());
        };
        let args: Vec<&str> = parts.collect();
        self.history.push(line.trim().to_string());

        let Some(entry) = self.commands.iter().find(|c| c.name.eq_ignore_ascii_case(name)) else {
            log::warn!("Unknown command '{}'", name);
            return Err(CommandError::UnknownCommand(name.to_string()));
        };

        let result = (entry.handler)(world, &args);
        if let Err(e) = &result {
            log::warn!("Command '{}' failed: {}", entry.name, e);
        }
        result
    }
}

// -- argument parsing --

fn float_arg(arg: &str, usage: &'static str) -> Result<f32, CommandError> {
    arg.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(CommandError::BadArguments { usage })
}

fn bool_arg(arg: &str, usage: &'static str) -> Result<bool, CommandError> {
    match arg.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(CommandError::BadArguments { usage }),
    }
}

fn check_count(args: &[&str], min: usize, max: usize, usage: &'static str) -> Result<(), CommandError> {
    if args.len() < min || args.len() > max {
        return Err(CommandError::BadArguments { usage });
    }
    Ok(())
}

// -- built-in commands --

fn teleport(world: &mut World, args: &[&str]) -> Result<(), CommandError> {
    const USAGE: &str = "tp x:float y:float";
    check_count(args, 2, 2, USAGE)?;
    let x = float_arg(args[0], USAGE)?;
    let y = float_arg(args[1], USAGE)?;

    let player = world.scene.player_mut().ok_or_else(|| CommandError::Failed("no player in the scene".into()))?;
    player.position = Vec2::new(x, y);
    Ok(())
}

fn toggle_dev_mode(world: &mut World, args: &[&str]) -> Result<(), CommandError> {
    const USAGE: &str = "dev [on:bool]";
    check_count(args, 0, 1, USAGE)?;
    world.dev_mode = match args.first() {
        Some(arg) => bool_arg(arg, USAGE)?,
        None => !world.dev_mode,
    };
    log::info!("Developer mode {}", if world.dev_mode { "on" } else { "off" });
    Ok(())
}

fn shake(world: &mut World, args: &[&str]) -> Result<(), CommandError> {
    const USAGE: &str = "shake [trauma:float] [falloff:float]";
    check_count(args, 0, 2, USAGE)?;
    let trauma = match args.first() {
        Some(arg) => float_arg(arg, USAGE)?,
        None => world.camera.config.shake_trauma,
    };
    let falloff = match args.get(1) {
        Some(arg) => float_arg(arg, USAGE)?,
        None => world.camera.config.shake_falloff,
    };
    world.camera.add_trauma(trauma, falloff);
    Ok(())
}

fn sound(world: &mut World, args: &[&str]) -> Result<(), CommandError> {
    const USAGE: &str = "sound path:string [volume:float] [pitch:float]";
    check_count(args, 1, 3, USAGE)?;
    let volume = args.get(1).map_or(Ok(1.0), |a| float_arg(a, USAGE))?;
    let pitch = args.get(2).map_or(Ok(1.0), |a| float_arg(a, USAGE))?;

    if !world.audio.play_sound(args[0], volume, pitch) {
        return Err(CommandError::Failed(format!("couldn't play '{}'", args[0])));
    }
    Ok(())
}

fn move_player(world: &mut World, args: &[&str]) -> Result<(), CommandError> {
    const USAGE: &str = "move dx:float dy:float";
    check_count(args, 2, 2, USAGE)?;
    let offset = Vec2::new(float_arg(args[0], USAGE)?, float_arg(args[1], USAGE)?);

    let player = world.scene.player_mut().ok_or_else(|| CommandError::Failed("no player in the scene".into()))?;
    player.move_by(offset);
    Ok(())
}

fn scene_path(world: &World, args: &[&str], usage: &'static str) -> Result<String, CommandError> {
    check_count(args, 0, 1, usage)?;
    match args.first() {
        Some(path) => Ok(path.to_string()),
        None => world
            .last_scene_path
            .clone()
            .ok_or(CommandError::BadArguments { usage }),
    }
}

fn save(world: &mut World, args: &[&str]) -> Result<(), CommandError> {
    let path = scene_path(world, args, "save [path:string]")?;
    world.save_scene(&path).map_err(|e| CommandError::Failed(e.to_string()))
}

fn load(world: &mut World, args: &[&str]) -> Result<(), CommandError> {
    let path = scene_path(world, args, "load [path:string]")?;
    world.load_scene(&path).map_err(|e| CommandError::Failed(e.to_string()))
}
