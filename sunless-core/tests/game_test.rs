use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use parascript_core::parse;
use sunless_core::audio::AudioSink;
use sunless_core::console::CommandError;
use sunless_core::renderer::Renderer;
use sunless_core::state::SKIP_FRAMES;
use sunless_core::{CoreConfig, Game, GameState, Input, MemoryLoader, Object, TerminalRenderer};

const PINKGUY_SCRIPT: &str = r#"
# Pinkguy's greeting
{happy}Hi! I'm the pink guy.

@Player
Hello there.

{sad}Well, {pause 10}bye.
"#;

fn pinkguy_game() -> Game {
    let script = parse(PINKGUY_SCRIPT).unwrap_or_else(|errs| panic!("Parse failed: {:#?}", errs));
    let loader = MemoryLoader::new()
        .with_script("scripts/pinkguy.txt", script)
        .with_texture("portraits/pinkguy_happy.png", 300, 320);
    let mut game = Game::new(CoreConfig::default(), Box::new(loader));

    let mut pinkguy = Object::at("Pinkguy", Vec2::new(700.0, 250.0));
    pinkguy.set_script(&mut game.world.assets, "scripts/pinkguy.txt");
    game.scene_mut().push(Object::at("Player", Vec2::new(640.0, 360.0)));
    game.scene_mut().push(pinkguy);
    game
}

fn paragraph(game: &Game) -> Option<usize> {
    match game.state() {
        GameState::Talking(conversation) => Some(conversation.paragraph),
        _ => None,
    }
}

#[test]
fn test_talk_to_pinkguy() {
    let mut game = pinkguy_game();

    // Too far away to talk.
    game.step(&Input::interact());
    assert!(matches!(game.state(), GameState::Playing));

    game.run_command("tp 690 260").expect("teleport");
    game.step(&Input::interact());
    assert_eq!(game.state().name(), "Talking");
    assert_eq!(paragraph(&game), Some(0));
    assert_eq!(game.stack().len(), 2);

    for expected in [1, 2] {
        game.wait(300);
        game.step(&Input::interact());
        assert_eq!(paragraph(&game), Some(expected));
        assert_eq!(game.stack().top().frames(), 1);
    }

    game.wait(300);
    game.step(&Input::interact());
    assert!(matches!(game.state(), GameState::Playing));
    assert_eq!(game.stack().len(), 1);
}

#[test]
fn test_interact_finishes_reveal_before_advancing() {
    let mut game = pinkguy_game();
    game.run_command("tp 700 260").expect("teleport");
    game.step(&Input::interact());
    game.wait(2);

    game.step(&Input::interact());
    assert_eq!(paragraph(&game), Some(0));
    assert!(game.stack().top().frames() >= SKIP_FRAMES);

    game.step(&Input::interact());
    assert_eq!(paragraph(&game), Some(1));
}

#[test]
fn test_developer_paragraph_skipping() {
    let mut game = pinkguy_game();
    game.run_command("tp 700 260").expect("teleport");
    game.step(&Input::interact());

    game.step(&Input::dev_right());
    game.step(&Input::dev_right());
    assert_eq!(paragraph(&game), Some(2));
    // On the last paragraph it only completes the reveal.
    game.step(&Input::dev_right());
    assert_eq!(paragraph(&game), Some(2));
    game.step(&Input::dev_left());
    assert_eq!(paragraph(&game), Some(1));

    game.run_command("dev off").expect("dev");
    game.step(&Input::dev_left());
    assert_eq!(paragraph(&game), Some(1));
}

#[test]
fn test_dialogue_view_reveals_text() {
    let mut game = pinkguy_game();
    game.run_command("tp 700 260").expect("teleport");
    game.step(&Input::interact());

    let GameState::Talking(conversation) = game.state() else {
        panic!("not talking");
    };
    let view = conversation.view(game.scene(), 0.0).expect("view");
    assert_eq!(view.speaker, "Pinkguy");
    assert_eq!(view.expression.as_deref(), Some("happy"));
    assert_eq!(view.text(), "");
    assert!(!view.revealed);

    let view = conversation.view(game.scene(), 3.0).expect("view");
    assert_eq!(view.text(), "Hi!");
    let view = conversation.view(game.scene(), 1000.0).expect("view");
    assert_eq!(view.text(), "Hi! I'm the pink guy.");
    assert!(view.revealed);
    assert_eq!(view.paragraph_count, 3);
}

#[test]
fn test_pause_overlays_and_resumes() {
    let mut game = pinkguy_game();
    game.run_command("tp 700 260").expect("teleport");
    game.step(&Input::interact());
    game.wait(5);
    let frames = game.stack().top().frames();

    game.step(&Input::pause());
    assert_eq!(game.state().name(), "Paused");
    assert_eq!(game.stack().len(), 3);
    game.wait(10);

    let mut renderer = TerminalRenderer::new(Box::new(std::io::sink()));
    game.render(&mut renderer);
    assert_eq!(renderer.lines().first().map(String::as_str), Some("---- frame ----"));
    assert!(renderer.lines().iter().any(|l| l.contains("Paused")));
    assert!(renderer.lines().iter().any(|l| l.contains("[Pinkguy] [happy]")));

    game.step(&Input::pause());
    assert_eq!(game.state().name(), "Talking");
    assert_eq!(game.stack().top().frames(), frames);
}

#[test]
fn test_last_state_is_never_popped() {
    let mut game = pinkguy_game();
    assert!(!game.pop_state());
    assert_eq!(game.stack().len(), 1);

    game.step(&Input::console());
    assert_eq!(game.state().name(), "Editor");
    game.step(&Input::console());
    assert_eq!(game.state().name(), "Playing");
    assert!(!game.pop_state());
}

#[test]
fn test_editor_ignores_captured_keyboard() {
    let mut game = pinkguy_game();
    game.step(&Input::console());

    let mut captured = Input::console();
    captured.keyboard_captured = true;
    game.step(&captured);
    assert_eq!(game.state().name(), "Editor");
    assert_eq!(game.stack().top().frames(), 1);
}

#[test]
fn test_playing_render_lists_visible_objects() {
    let loader = MemoryLoader::new().with_sprite("sprites/player_right", &[(32, 64)]);
    let mut game = Game::new(CoreConfig::default(), Box::new(loader));
    let mut player = Object::at("Player", Vec2::new(100.0, 100.0));
    player.set_sprite(&mut game.world.assets, sunless_core::direction::Direction::Right, "sprites/player_right");
    player.direction = sunless_core::direction::Direction::Left;
    game.scene_mut().push(player);

    let mut renderer = TerminalRenderer::new(Box::new(std::io::sink()));
    game.render(&mut renderer);
    let lines = renderer.lines().join("\n");
    assert!(lines.contains("[world] sprites/player_right 32x64"), "{}", lines);
    assert!(lines.contains("flipped"), "{}", lines);
    assert!(renderer.line_height(32.0) > 0.0);
}

#[derive(Clone, Default)]
struct RecordingAudio {
    played: Rc<RefCell<Vec<(String, f32, f32)>>>,
}

impl AudioSink for RecordingAudio {
    fn play_sound(&mut self, path: &str, volume: f32, pitch: f32) -> bool {
        self.played.borrow_mut().push((path.to_string(), volume, pitch));
        true
    }
}

#[test]
fn test_console_commands() {
    let audio = RecordingAudio::default();
    let mut game = pinkguy_game().with_audio(Box::new(audio.clone()));

    assert_eq!(game.run_command(""), Ok(()));
    game.run_command("TP 1 2").expect("tp");
    assert_eq!(game.scene().player().map(|p| p.position), Some(Vec2::new(1.0, 2.0)));

    assert_eq!(game.run_command("tp 1"), Err(CommandError::BadArguments { usage: "tp x:float y:float" }));
    assert!(matches!(game.run_command("tp one 2"), Err(CommandError::BadArguments { .. })));
    assert_eq!(game.run_command("fly"), Err(CommandError::UnknownCommand("fly".into())));

    assert!(game.world.dev_mode);
    game.run_command("dev").expect("dev");
    assert!(!game.world.dev_mode);
    game.run_command("dev on").expect("dev");
    assert!(game.world.dev_mode);

    game.run_command("shake 0.8 0.1").expect("shake");
    assert_eq!(game.world.camera.trauma, 0.8);
    game.wait(1);
    assert!(game.world.camera.trauma < 0.8);

    game.run_command("sound sfx/door.wav 0.5").expect("sound");
    assert_eq!(*audio.played.borrow(), vec![("sfx/door.wav".to_string(), 0.5, 1.0)]);

    assert!(matches!(game.run_command("save"), Err(CommandError::BadArguments { .. })));
    assert_eq!(game.console().history().len(), 9);
}

#[test]
fn test_console_save_and_reload() {
    let mut game = pinkguy_game();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("quick.scene");
    let path = path.to_str().expect("utf-8 path");

    game.run_command(&format!("save {}", path)).expect("save");
    assert_eq!(game.world.last_scene_path.as_deref(), Some(path));

    game.run_command("tp 5 5").expect("tp");
    game.scene_mut().add();
    assert_eq!(game.scene().len(), 3);

    game.run_command("load").expect("load");
    assert_eq!(game.scene().len(), 2);
    assert_eq!(game.scene().player().map(|p| p.position), Some(Vec2::new(640.0, 360.0)));
    assert!(game.scene().get(1).is_some_and(Object::is_interactable));

    let missing = dir.path().join("nope.scene");
    let result = game.run_command(&format!("load {}", missing.display()));
    assert!(matches!(result, Err(CommandError::Failed(_))));
    assert_eq!(game.scene().len(), 2);
}
