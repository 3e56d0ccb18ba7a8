use glam::Vec2;
use parascript_core::parse;
use sunless_core::assets::{path_of, Assets, CollisionMap, MemoryLoader};
use sunless_core::direction::Direction;
use sunless_core::object::Expression;
use sunless_core::scene::MAX_OBJECTS;
use sunless_core::storager::{self, ObjectRecord, SceneError, SCENE_VERSION};
use sunless_core::{CoreConfig, Game, Object, Scene};

fn loader() -> MemoryLoader {
    MemoryLoader::new()
        .with_sprite("sprites/guy_down", &[(32, 64), (32, 64)])
        .with_sprite("sprites/guy_right", &[(32, 64)])
        .with_texture("portraits/guy_happy.png", 300, 320)
        .with_collision_map("maps/house.png", CollisionMap::filled(8, 8, 0))
        .with_script("scripts/guy.txt", parse("Hello.").unwrap_or_default())
}

fn build_scene(assets: &mut Assets) -> Scene {
    let mut scene = Scene::new();
    for (i, name) in ["Player", "Pinkguy", "House", "Tree", "Lamp"].iter().enumerate() {
        let mut object = Object::at(name, Vec2::new(10.0 * i as f32, 20.0 * i as f32));
        object.z_offset = i as f32;
        scene.push(object);
    }

    let guy = scene.get_mut(1).expect("pinkguy");
    guy.direction = Direction::Right;
    guy.animation_fps = 12.0;
    guy.set_sprite(assets, Direction::Down, "sprites/guy_down");
    guy.set_sprite(assets, Direction::Right, "sprites/guy_right");
    guy.set_script(assets, "scripts/guy.txt");
    let portrait = assets.acquire_texture("portraits/guy_happy.png");
    guy.add_expression(Expression::new("happy", portrait));
    guy.add_expression(Expression::new("sad", None));

    scene.get_mut(2).expect("house").set_collision_map(assets, "maps/house.png");
    scene
}

#[test]
fn test_round_trip_through_file() {
    let mut assets = Assets::new(Box::new(loader()));
    let scene = build_scene(&mut assets);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("main.scene");
    storager::save(&scene, &path).expect("save");

    let records = storager::load(&path).expect("load");
    assert_eq!(records.len(), 5);
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Player", "Pinkguy", "House", "Tree", "Lamp"]);

    let original: Vec<ObjectRecord> = scene.objects().iter().map(ObjectRecord::from).collect();
    assert_eq!(records, original);

    let guy = records[1].instantiate(&mut assets);
    assert_eq!(guy.position, Vec2::new(10.0, 20.0));
    assert_eq!(guy.direction, Direction::Right);
    assert_eq!(guy.animation_fps, 12.0);
    assert_eq!(path_of(&guy.sprites[Direction::Down.index()]), "sprites/guy_down");
    assert_eq!(path_of(&guy.sprites[Direction::Right.index()]), "sprites/guy_right");
    assert_eq!(path_of(&guy.script), "scripts/guy.txt");
    assert_eq!(guy.expressions().len(), 2);
    assert_eq!(guy.expressions()[1].name, "sad");
    assert_eq!(
        guy.portrait(Some("HAPPY")).map(|p| p.path.as_str()),
        Some("portraits/guy_happy.png")
    );

    let house = records[2].instantiate(&mut assets);
    assert_eq!(path_of(&house.collision_map), "maps/house.png");
    assert_eq!(house.z_offset, 2.0);
}

#[test]
fn test_expression_slots_trim_trailing_blanks() {
    let mut record = ObjectRecord::default();
    assert_eq!(record.expression_count(), 0);

    record.expressions[0].name = "happy".into();
    record.expressions[2].portrait = "p.png".into();
    assert_eq!(record.expression_count(), 3);

    let mut assets = Assets::new(Box::new(MemoryLoader::new()));
    let object = record.instantiate(&mut assets);
    assert_eq!(object.expressions().len(), 3);
    assert_eq!(object.expressions()[1].name, "");
}

#[test]
fn test_missing_assets_save_as_empty_paths() {
    let mut assets = Assets::new(Box::new(MemoryLoader::new()));
    let mut object = Object::new("Ghost");
    object.set_sprite(&mut assets, Direction::Up, "sprites/missing");
    assert!(object.sprites[Direction::Up.index()].is_none());

    let record = ObjectRecord::from(&object);
    assert!(record.sprites.iter().all(String::is_empty));
}

#[test]
fn test_rejects_bad_headers() {
    let mut assets = Assets::new(Box::new(loader()));
    let bytes = storager::encode_scene(&build_scene(&mut assets));
    assert_eq!(&bytes[..4], b"KEKW");

    let mut bad_magic = bytes.clone();
    bad_magic[..4].copy_from_slice(b"NOPE");
    assert!(matches!(storager::decode(&bad_magic), Err(SceneError::BadMagic { found }) if &found == b"NOPE"));

    let mut old = bytes.clone();
    old[4..8].copy_from_slice(&1i32.to_le_bytes());
    assert!(matches!(
        storager::decode(&old),
        Err(SceneError::VersionMismatch { found: 1, expected: SCENE_VERSION })
    ));

    assert!(matches!(storager::decode(b"KE"), Err(SceneError::Decode(_))));
}

#[test]
fn test_rejects_bad_counts_and_truncation() {
    let header = |count: i32| {
        let mut bytes = b"KEKW".to_vec();
        bytes.extend_from_slice(&SCENE_VERSION.to_le_bytes());
        bytes.extend_from_slice(&count.to_le_bytes());
        bytes
    };

    assert!(matches!(storager::decode(&header(0)), Err(SceneError::Empty)));
    assert!(matches!(storager::decode(&header(-3)), Err(SceneError::Decode(_))));
    let too_many = MAX_OBJECTS as i32 + 1;
    assert!(matches!(
        storager::decode(&header(too_many)),
        Err(SceneError::Capacity { count, max: MAX_OBJECTS }) if count == MAX_OBJECTS + 1
    ));

    // A string length running past the end of the data.
    let mut huge = header(1);
    huge.extend_from_slice(&1_000_000i32.to_le_bytes());
    assert!(matches!(storager::decode(&huge), Err(SceneError::Decode(_))));

    let mut assets = Assets::new(Box::new(loader()));
    let bytes = storager::encode_scene(&build_scene(&mut assets));
    for cut in [13, bytes.len() / 2, bytes.len() - 1] {
        assert!(
            matches!(storager::decode(&bytes[..cut]), Err(SceneError::Decode(_))),
            "cut at {} decoded",
            cut
        );
    }
}

#[test]
fn test_empty_scene_is_not_saved() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.scene");
    assert!(matches!(storager::save(&Scene::new(), &path), Err(SceneError::Empty)));
    assert!(!path.exists());
}

#[test]
fn test_failed_load_keeps_current_scene() {
    let mut game = Game::new(CoreConfig::default(), Box::new(loader()));
    game.scene_mut().push(Object::new("Player"));
    game.scene_mut().push(Object::new("Keeper"));

    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.scene");
    let err = game.world.load_scene(missing.to_str().expect("utf-8 path"));
    assert!(matches!(err, Err(SceneError::Io { .. })));

    let garbage = dir.path().join("garbage.scene");
    std::fs::write(&garbage, b"KEKW\x02\x00\x00\x00\x01\x00\x00\x00\x05").expect("write");
    assert!(game.world.load_scene(garbage.to_str().expect("utf-8 path")).is_err());

    assert_eq!(game.scene().len(), 2);
    assert_eq!(game.scene().get(1).map(Object::name), Some("Keeper"));
    assert_eq!(game.world.last_scene_path, None);
}

#[test]
fn test_world_load_replaces_scene() {
    let mut assets = Assets::new(Box::new(loader()));
    let saved = build_scene(&mut assets);
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("level.scene");
    let path = path.to_str().expect("utf-8 path");
    storager::save(&saved, path).expect("save");

    let mut game = Game::new(CoreConfig::default(), Box::new(loader()));
    game.scene_mut().push(Object::new("Old"));
    game.world.load_scene(path).expect("load");

    assert_eq!(game.scene().len(), 5);
    assert_eq!(game.scene().player().map(Object::name), Some("Player"));
    assert!(game.scene().get(1).is_some_and(Object::is_interactable));
    assert_eq!(game.world.last_scene_path.as_deref(), Some(path));
}
