//! Binary scene files.
//!
//! Layout, little-endian: magic `KEKW`, i32 version, i32 object count, then
//! per object the name, position x/y, z offset and animation fps as f32, the
//! direction as i32, the script and collision map paths, eight sprite paths
//! in direction order and exactly ten (expression name, portrait path)
//! pairs. Strings are an i32 byte length followed by UTF-8 bytes; an empty
//! path means "no asset".

pub mod types;

pub use types::{ExpressionRecord, ObjectRecord, SceneError};

use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::Vec2;

use crate::direction::Direction;
use crate::scene::{Scene, MAX_OBJECTS};

pub const SCENE_MAGIC: [u8; 4] = *b"KEKW";
/// Bump on every change to the layout; other versions are rejected outright.
pub const SCENE_VERSION: i32 = 2;

// -- encoding --

fn write_string<W: Write>(w: &mut W, s: &str) -> io::Result<()> {
    let len = i32::try_from(s.len()).map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "string too long"))?;
    w.write_i32::<LittleEndian>(len)?;
    w.write_all(s.as_bytes())
}

fn write_record<W: Write>(w: &mut W, record: &ObjectRecord) -> io::Result<()> {
    write_string(w, &record.name)?;
    w.write_f32::<LittleEndian>(record.position.x)?;
    w.write_f32::<LittleEndian>(record.position.y)?;
    w.write_f32::<LittleEndian>(record.z_offset)?;
    w.write_f32::<LittleEndian>(record.animation_fps)?;
    w.write_i32::<LittleEndian>(record.direction as i32)?;
    write_string(w, &record.script)?;
    write_string(w, &record.collision_map)?;
    for path in &record.sprites {
        write_string(w, path)?;
    }
    for expression in &record.expressions {
        write_string(w, &expression.name)?;
        write_string(w, &expression.portrait)?;
    }
    Ok(())
}

pub fn encode<W: Write>(w: &mut W, records: &[ObjectRecord]) -> io::Result<()> {
    w.write_all(&SCENE_MAGIC)?;
    w.write_i32::<LittleEndian>(SCENE_VERSION)?;
    w.write_i32::<LittleEndian>(records.len() as i32)?;
    for record in records {
        write_record(w, record)?;
    }
    Ok(())
}

pub fn encode_scene(scene: &Scene) -> Vec<u8> {
    let records: Vec<ObjectRecord> = scene.objects().iter().map(ObjectRecord::from).collect();
    let mut buf = Vec::with_capacity(records.len() * 256);
    // Writing into a Vec cannot fail.
    let _ = encode(&mut buf, &records);
    buf
}

// -- decoding --

struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

fn truncated(what: &str) -> impl FnOnce(io::Error) -> SceneError + '_ {
    move |_| SceneError::Decode(format!("file ends inside {}", what))
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { cursor: Cursor::new(bytes) }
    }

    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    fn magic(&mut self) -> Result<[u8; 4], SceneError> {
        let mut magic = [0u8; 4];
        self.cursor.read_exact(&mut magic).map_err(truncated("the header"))?;
        Ok(magic)
    }

    fn i32(&mut self, what: &str) -> Result<i32, SceneError> {
        self.cursor.read_i32::<LittleEndian>().map_err(truncated(what))
    }

    fn f32(&mut self, what: &str) -> Result<f32, SceneError> {
        self.cursor.read_f32::<LittleEndian>().map_err(truncated(what))
    }

    fn string(&mut self, what: &str) -> Result<String, SceneError> {
        let len = self.i32(what)?;
        let len = usize::try_from(len)
            .map_err(|_| SceneError::Decode(format!("negative length {} for {}", len, what)))?;
        if len > self.remaining() {
            return Err(SceneError::Decode(format!(
                "length {} for {} runs past the end of the file",
                len, what
            )));
        }
        let mut bytes = vec![0u8; len];
        self.cursor.read_exact(&mut bytes).map_err(truncated(what))?;
        String::from_utf8(bytes).map_err(|_| SceneError::Decode(format!("{} is not valid UTF-8", what)))
    }

    fn record(&mut self) -> Result<ObjectRecord, SceneError> {
        let mut record = ObjectRecord {
            name: self.string("an object name")?,
            ..Default::default()
        };
        let x = self.f32("a position")?;
        let y = self.f32("a position")?;
        record.position = Vec2::new(x, y);
        record.z_offset = self.f32("a z offset")?;
        record.animation_fps = self.f32("an animation fps")?;
        let direction = self.i32("a direction")?;
        record.direction = Direction::from_index(direction)
            .ok_or_else(|| SceneError::Decode(format!("invalid direction {}", direction)))?;
        record.script = self.string("a script path")?;
        record.collision_map = self.string("a collision map path")?;
        for path in record.sprites.iter_mut() {
            *path = self.string("a sprite path")?;
        }
        for expression in record.expressions.iter_mut() {
            expression.name = self.string("an expression name")?;
            expression.portrait = self.string("a portrait path")?;
        }
        Ok(record)
    }
}

/// Decodes a whole scene file. Nothing is returned unless every object decodes.
pub fn decode(bytes: &[u8]) -> Result<Vec<ObjectRecord>, SceneError> {
    let mut reader = Reader::new(bytes);

    let magic = reader.magic()?;
    if magic != SCENE_MAGIC {
        return Err(SceneError::BadMagic { found: magic });
    }
    let version = reader.i32("the header")?;
    if version != SCENE_VERSION {
        return Err(SceneError::VersionMismatch { found: version, expected: SCENE_VERSION });
    }

    let count = reader.i32("the object count")?;
    let count = usize::try_from(count)
        .map_err(|_| SceneError::Decode(format!("negative object count {}", count)))?;
    if count == 0 {
        return Err(SceneError::Empty);
    }
    if count > MAX_OBJECTS {
        return Err(SceneError::Capacity { count, max: MAX_OBJECTS });
    }

    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        records.push(reader.record()?);
    }
    if reader.remaining() > 0 {
        log::debug!("Ignoring {} trailing bytes after scene data", reader.remaining());
    }
    Ok(records)
}

// -- files --

pub fn save(scene: &Scene, path: impl AsRef<Path>) -> Result<(), SceneError> {
    let path = path.as_ref();
    if scene.is_empty() {
        return Err(SceneError::Empty);
    }
    let io_err = |source| SceneError::Io { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&encode_scene(scene)).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<ObjectRecord>, SceneError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SceneError::Io { path: path.to_path_buf(), source })?;
    decode(&bytes)
}
