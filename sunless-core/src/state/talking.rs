use glam::Vec2;

use crate::dialogue::{reveal_at, Conversation};
use crate::event::Input;
use crate::game::World;
use crate::renderer::{Renderer, TextStyle};
use crate::state::{GameState, Transition};
use crate::types::{Color, Rect};

/// Frame count far past the end of any paragraph, used to finish a reveal.
pub const SKIP_FRAMES: u32 = 99_999;

const TEXT_SIZE: f32 = 32.0;

pub(super) fn enter(conversation: &mut Conversation, world: &mut World) {
    conversation.restart();
    log::info!(
        "Talking to '{}' ({} paragraphs, dev mode {})",
        conversation.owner,
        conversation.paragraph_count(),
        world.dev_mode
    );
}

pub(super) fn exit(conversation: &Conversation) {
    log::info!("Conversation with '{}' ended", conversation.owner);
}

pub(super) fn update(conversation: &mut Conversation, frames: &mut u32, world: &mut World, input: &Input) -> Transition {
    if input.pause.was_pressed {
        return Transition::Push(GameState::Paused);
    }

    let count = conversation.paragraph_count();
    if count == 0 {
        log::warn!("Script of '{}' has no paragraphs", conversation.owner);
        return Transition::Pop;
    }
    let previous = conversation.paragraph;
    conversation.paragraph = conversation.paragraph.min(count - 1);

    if world.dev_mode && input.dev_left.was_pressed {
        conversation.paragraph = conversation.paragraph.saturating_sub(1);
        *frames = 0;
    }
    if world.dev_mode && input.dev_right.was_pressed {
        if conversation.is_last() {
            *frames = SKIP_FRAMES;
        } else {
            conversation.paragraph += 1;
            *frames = 0;
        }
    }

    if input.interact.was_pressed {
        let duration = conversation.current().map_or(0.0, |p| p.duration);
        if reveal_at(*frames) < duration {
            *frames = SKIP_FRAMES;
        } else {
            conversation.paragraph += 1;
            if conversation.paragraph >= count {
                return Transition::Pop;
            }
            *frames = 0;
        }
    }

    if conversation.paragraph != previous {
        conversation.cursor.reset();
    }
    conversation.advance_cursor(reveal_at(*frames));

    world.camera.update_shake();
    Transition::None
}

fn draw_panel(renderer: &mut dyn Renderer, rect: Rect) {
    renderer.draw_rect(rect.translate(Vec2::new(10.0, 10.0)), Color::BLACK);
    renderer.draw_rect(rect, Color::WHITE);
    renderer.draw_rect(rect.shrink(5.0), Color::WHITE.darken(0.1));
}

pub(super) fn render(conversation: &Conversation, frames: u32, world: &World, renderer: &mut dyn Renderer) {
    let Some(view) = conversation.view(&world.scene, reveal_at(frames)) else {
        return;
    };

    let width = world.config.window.width as f32;
    let height = world.config.window.height as f32;
    let text_box = Rect::new(0.5 * width - 300.0, height - 340.0, 600.0, 320.0);
    let portrait_box = Rect::new(30.0, text_box.y, 300.0, text_box.h);

    draw_panel(renderer, portrait_box);
    if let Some(portrait) = &view.portrait {
        renderer.draw_texture(&portrait.path, &portrait.data, portrait_box.center(), false);
    }

    draw_panel(renderer, text_box);
    let text_area = text_box.shrink(15.0);
    let header = format!("[{}] [{}]", view.speaker, view.expression.as_deref().unwrap_or(""));
    renderer.draw_text(&header, text_area.top_left(), TextStyle::new(TEXT_SIZE, Color::RED));

    let (_, body) = text_area.split_top(2.0 * renderer.line_height(TEXT_SIZE));
    let mut cursor = body.top_left();
    for (text, style) in &view.runs {
        let mut text_style = TextStyle::new(TEXT_SIZE, Color::PINK);
        text_style.bold = style.bold;
        text_style.italic = style.italic;
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                cursor = Vec2::new(body.x, cursor.y + renderer.line_height(TEXT_SIZE));
            }
            if line.is_empty() {
                continue;
            }
            renderer.draw_text(line, cursor, text_style);
            cursor.x += 0.5 * TEXT_SIZE * line.chars().count() as f32;
        }
    }
}
