use glam::Vec2;

use crate::camera::WHEEL_ZOOM_STEP;
use crate::editor::EditorSession;
use crate::event::Input;
use crate::game::World;
use crate::renderer::Renderer;
use crate::state::Transition;
use crate::types::Color;

pub(super) fn enter(world: &mut World) {
    log::info!("Editor opened ({} objects)", world.scene.len());
}

pub(super) fn exit(session: &EditorSession, world: &mut World) {
    log::info!("Editor closed, selection {:?}", session.selected);
    world.assets.gc();
}

pub(super) fn update(session: &mut EditorSession, world: &mut World, input: &Input) -> Transition {
    if input.keyboard_captured {
        return Transition::None;
    }
    if input.console.was_pressed {
        return Transition::Pop;
    }

    let pointer = &input.pointer;
    let hovered = world.scene.object_at(world.camera.camera.screen_to_world(pointer.position));

    if pointer.left.was_pressed {
        session.grab(hovered);
    }
    if pointer.left.was_released {
        session.release();
    }
    session.drag(&mut world.scene, pointer.delta, world.camera.camera.zoom);

    if pointer.right.is_down {
        world.camera.camera.pan(pointer.delta);
    }
    if pointer.wheel > 0.0 {
        world.camera.camera.zoom_to_screen_point(pointer.position, WHEEL_ZOOM_STEP);
    } else if pointer.wheel < 0.0 {
        world.camera.camera.zoom_to_screen_point(pointer.position, 1.0 / WHEEL_ZOOM_STEP);
    }

    if input.editor.deselect {
        session.deselect();
    }
    if input.editor.center {
        if let Some(position) = world.scene.player().map(|p| p.position) {
            world.camera.center_on(position);
        }
    }
    if input.editor.delete {
        session.delete_selected(&mut world.scene);
    }
    Transition::None
}

/// Outlines every object and marks its depth line.
pub(super) fn render(session: &EditorSession, world: &World, renderer: &mut dyn Renderer) {
    renderer.begin_camera(&world.camera.camera);
    for (index, object) in world.scene.objects().iter().enumerate() {
        let (thickness, color) = if session.selected == Some(index) {
            (3.0, Color::GREEN.with_alpha(0.5))
        } else {
            (2.0, Color::gray(0.5, 0.5))
        };
        let outline = object.outline().expand(thickness);
        renderer.draw_rect_lines(outline, thickness, color);

        let z = object.depth_key();
        renderer.draw_line(Vec2::new(outline.x, z), Vec2::new(outline.x + outline.w, z), 2.0, Color::YELLOW);
    }
    renderer.end_camera();
}
