use glam::Vec2;

use crate::collision;
use crate::dialogue::{Conversation, INTERACTION_RADIUS};
use crate::direction::Direction;
use crate::editor::EditorSession;
use crate::event::Input;
use crate::game::World;
use crate::object::Object;
use crate::renderer::Renderer;
use crate::state::{GameState, Transition};
use crate::types::Color;
use crate::Y_SQUISH;

/// Stick magnitudes below this are ignored.
pub const DEAD_ZONE: f32 = 0.2;
/// Magnitude at which the stick reaches full speed.
pub const FULL_TILT: f32 = 0.8;

pub(super) fn update(world: &mut World, input: &Input) -> Transition {
    if input.console.was_pressed {
        return Transition::Push(GameState::Editor(EditorSession::default()));
    }
    if input.pause.was_pressed {
        return Transition::Push(GameState::Paused);
    }
    if input.interact.was_pressed {
        let nearby = world.scene.interactable_near_player(INTERACTION_RADIUS);
        if let Some(conversation) = nearby.and_then(|i| Conversation::with(&world.scene, i)) {
            return Transition::Push(GameState::Talking(conversation));
        }
    }

    let velocity = move_player(world, input);

    world.scene.update();

    if let Some(player) = world.scene.player() {
        let position = player.position;
        world.camera.follow(position, velocity);
    }
    world.camera.update_shake();
    Transition::None
}

/// Applies stick input to the player and returns the attempted velocity.
fn move_player(world: &mut World, input: &Input) -> Vec2 {
    let magnitude = input.movement.length();
    if magnitude <= DEAD_ZONE || world.scene.is_empty() {
        return Vec2::ZERO;
    }

    let speed = if input.sprint.is_down {
        world.config.gameplay.sprint_speed
    } else {
        world.config.gameplay.walk_speed
    };
    let tilt = ((magnitude - DEAD_ZONE) / (FULL_TILT - DEAD_ZONE)).clamp(0.0, 1.0);
    let heading = input.movement / magnitude * tilt;
    let step = Vec2::new(heading.x, heading.y * Y_SQUISH);
    let delta = step * speed;

    let Some(player) = world.scene.player_mut() else {
        return Vec2::ZERO;
    };
    if let Some(direction) = Direction::from_vector(Vec2::new(step.x, -step.y)) {
        player.direction = direction;
    }
    let foot = player.screen_foot();

    let new_foot = collision::resolve(world.scene.objects(), foot, delta);
    if let Some(player) = world.scene.player_mut() {
        player.position += new_foot - foot;
    }
    delta
}

pub(super) fn render(world: &World, renderer: &mut dyn Renderer) {
    renderer.clear(Color::BLACK);
    renderer.begin_camera(&world.camera.shaken());
    for index in world.scene.render_order() {
        if let Some(object) = world.scene.get(index) {
            draw_object(object, renderer);
        }
    }
    renderer.end_camera();
}

fn draw_object(object: &Object, renderer: &mut dyn Renderer) {
    let Some((sprite, flipped)) = object.sprite_handle_for(object.direction) else {
        return;
    };
    if let Some(frame) = sprite.frame(object.animation_frame) {
        renderer.draw_texture(&sprite.path, frame, object.position, flipped);
    }
}
