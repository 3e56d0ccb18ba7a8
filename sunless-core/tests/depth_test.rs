use glam::Vec2;
use sunless_core::assets::{Assets, MemoryLoader};
use sunless_core::depth;
use sunless_core::direction::Direction;
use sunless_core::{Object, Scene};

fn boxed(assets: &mut Assets, name: &str, position: Vec2) -> Object {
    let mut object = Object::at(name, position);
    object.set_sprite(assets, Direction::Down, "box");
    object
}

#[test]
fn test_far_objects_draw_first() {
    let mut raised = Object::at("Raised", Vec2::new(0.0, 150.0));
    raised.z_offset = -100.0;
    let objects = vec![
        Object::at("Near", Vec2::new(0.0, 300.0)),
        Object::at("Middle", Vec2::new(0.0, 100.0)),
        raised,
    ];

    assert_eq!(depth::render_order(&objects), vec![2, 1, 0]);
    assert_eq!(depth::hit_test_order(&objects), vec![0, 1, 2]);
    assert_eq!(depth::depth_order(&objects), depth::hit_test_order(&objects));
}

#[test]
fn test_ties_keep_collection_order() {
    let objects = vec![
        Object::at("A", Vec2::new(0.0, 50.0)),
        Object::at("B", Vec2::new(10.0, 50.0)),
        Object::at("C", Vec2::new(20.0, 80.0)),
    ];
    assert_eq!(depth::depth_order(&objects), vec![2, 0, 1]);
}

#[test]
fn test_depth_key_uses_sprite_foot() {
    let mut assets = Assets::new(Box::new(MemoryLoader::new().with_sprite("box", &[(40, 40)])));
    let tall = boxed(&mut assets, "Tall", Vec2::new(0.0, 100.0));
    let flat = Object::at("Flat", Vec2::new(0.0, 110.0));

    assert_eq!(tall.depth_key(), 120.0);
    assert_eq!(flat.depth_key(), 110.0);
    assert_eq!(depth::render_order(&[tall, flat]), vec![1, 0]);
}

#[test]
fn test_pick_nearest_under_point() {
    let mut assets = Assets::new(Box::new(MemoryLoader::new().with_sprite("box", &[(40, 40)])));
    let mut scene = Scene::new();
    scene.push(boxed(&mut assets, "Back", Vec2::new(100.0, 100.0)));
    scene.push(boxed(&mut assets, "Front", Vec2::new(110.0, 110.0)));
    scene.push(Object::at("Invisible", Vec2::new(105.0, 105.0)));

    assert_eq!(scene.object_at(Vec2::new(105.0, 105.0)), Some(1));
    assert_eq!(scene.object_at(Vec2::new(85.0, 85.0)), Some(0));
    assert_eq!(scene.object_at(Vec2::new(500.0, 500.0)), None);
}
