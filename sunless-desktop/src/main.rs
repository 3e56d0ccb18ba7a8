mod config_gen;
mod setup;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;
use sunless_core::config::CoreConfig;
use sunless_core::{FsLoader, Game, Input, Object, TerminalRenderer};

const HELP: &str = "\
driver commands:
  .walk dx dy [frames]    walk with the stick held at (dx, dy)
  .sprint dx dy [frames]  same, sprinting
  .interact .pause .console .left .right
                          press a button for one frame
  .wait [frames]          advance with no input
  .state                  print the state stack
  .render                 print the current frame
  .help .quit
anything else runs as a console command";

/// What one driver line asks for.
enum Action {
    Steps(Input, u32),
    State,
    Render,
    Help,
    Quit,
}

fn parse_action(line: &str) -> Result<Action> {
    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();
    let frames = |at: usize| -> Result<u32> {
        args.get(at)
            .map_or(Ok(1), |a| a.parse::<u32>())
            .with_context(|| format!("bad frame count in '{}'", line))
    };
    let stick = || -> Result<Vec2> {
        let x = args.first().context("missing dx")?.parse::<f32>()?;
        let y = args.get(1).context("missing dy")?.parse::<f32>()?;
        Ok(Vec2::new(x, y))
    };

    Ok(match name {
        ".walk" => Action::Steps(Input::walk(stick()?), frames(2)?),
        ".sprint" => Action::Steps(Input::sprint(stick()?), frames(2)?),
        ".interact" => Action::Steps(Input::interact(), 1),
        ".pause" => Action::Steps(Input::pause(), 1),
        ".console" => Action::Steps(Input::console(), 1),
        ".left" => Action::Steps(Input::dev_left(), 1),
        ".right" => Action::Steps(Input::dev_right(), 1),
        ".wait" => Action::Steps(Input::idle(), frames(0)?),
        ".state" => Action::State,
        ".render" => Action::Render,
        ".help" => Action::Help,
        ".quit" => Action::Quit,
        other => anyhow::bail!("unknown driver command '{}'", other),
    })
}

fn print_state(game: &Game) {
    let names: Vec<String> = game
        .stack()
        .entries()
        .iter()
        .map(|e| format!("{}({})", e.state, e.frames()))
        .collect();
    println!("states: {}", names.join(" > "));
    if let Some(player) = game.scene().player() {
        println!(
            "player: ({:.1}, {:.1}) facing {}",
            player.position.x, player.position.y, player.direction
        );
    }
}

fn main() -> Result<()> {
    setup::init("config.toml");
    log::info!(">>> Sunless Desktop Launcher Started <<<");

    let config = CoreConfig::from_global();
    let scene_path = config.system.scene_path.clone();
    let loader = FsLoader::new(&config.system.assets_path);
    let mut game = Game::new(config, Box::new(loader));

    if Path::new(&scene_path).exists() {
        if let Err(e) = game.world.load_scene(&scene_path) {
            log::error!("Starting with an empty scene: {}", e);
        }
    } else {
        log::warn!("Scene '{}' not found, starting with a lone player", scene_path);
    }
    if game.scene().is_empty() {
        game.scene_mut().push(Object::new("Player"));
    }
    game.world.last_scene_path = Some(scene_path);

    let mut renderer = TerminalRenderer::stdout();
    println!("{}", HELP);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !line.starts_with('.') {
            if let Err(e) = game.run_command(line) {
                println!("error: {}", e);
            }
            continue;
        }

        match parse_action(line) {
            Ok(Action::Steps(input, frames)) => {
                for _ in 0..frames {
                    game.step(&input);
                }
                print_state(&game);
            }
            Ok(Action::State) => print_state(&game),
            Ok(Action::Render) => {
                game.render(&mut renderer);
                renderer.present().context("writing frame")?;
            }
            Ok(Action::Help) => println!("{}", HELP),
            Ok(Action::Quit) => break,
            Err(e) => println!("error: {:#}", e),
        }
        io::stdout().flush()?;
    }

    log::info!("Bye.");
    Ok(())
}
