use glam::Vec2;

use crate::event::Input;
use crate::game::World;
use crate::renderer::{Renderer, TextStyle};
use crate::state::Transition;
use crate::types::{Color, Rect};

pub(super) fn update(input: &Input) -> Transition {
    if input.pause.was_pressed {
        return Transition::Pop;
    }
    Transition::None
}

pub(super) fn render(world: &World, renderer: &mut dyn Renderer) {
    let size = Vec2::new(world.config.window.width as f32, world.config.window.height as f32);
    renderer.draw_rect(Rect::new(0.0, 0.0, size.x, size.y), Color::gray(0.0, 0.4));
    renderer.draw_text("Paused", 0.5 * size, TextStyle::new(64.0, Color::BLACK).centered());
}
