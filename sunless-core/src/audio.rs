/// One-shot sound playback, provided by the platform layer.
pub trait AudioSink {
    /// Returns false when the sound couldn't be played.
    fn play_sound(&mut self, path: &str, volume: f32, pitch: f32) -> bool;
}

/// Drops every sound, logging what would have played.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound(&mut self, path: &str, volume: f32, pitch: f32) -> bool {
        log::info!("[PlaySound] {} volume:{} pitch:{}", path, volume, pitch);
        true
    }
}
