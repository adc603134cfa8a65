//! Sound effects and ambient music.
//!
//! Audio is entirely best-effort: a missing mixer, device, or sound file is
//! logged and the game plays silently. The ambience track is started through
//! [`Audio::ensure_music`], which is safe to call every time a run starts;
//! it only begins playback when the track is not already playing, so the
//! music persists across runs instead of restarting or stacking.

use sdl2::mixer::{
    Channel, Chunk, InitFlag, Music, Sdl2MixerContext, DEFAULT_CHANNELS, DEFAULT_FORMAT,
    DEFAULT_FREQUENCY, MAX_VOLUME,
};
use tracing::{debug, warn};

use crate::asset::Asset;

pub struct Audio {
    _mixer_context: Option<Sdl2MixerContext>,
    hit: Option<Chunk>,
    miss: Option<Chunk>,
    game_over: Option<Chunk>,
    music: Option<Music<'static>>,
    muted: bool,
}

impl Audio {
    /// Initializes the mixer and loads whatever sound assets exist. Never
    /// fails; every problem downgrades to silence.
    pub fn new() -> Audio {
        let mixer_context = match sdl2::mixer::init(InitFlag::OGG) {
            Ok(context) => Some(context),
            Err(e) => {
                warn!(error = %e, "Mixer init failed, audio disabled");
                None
            }
        };

        if mixer_context.is_some() {
            if let Err(e) =
                sdl2::mixer::open_audio(DEFAULT_FREQUENCY, DEFAULT_FORMAT, DEFAULT_CHANNELS, 256)
            {
                warn!(error = %e, "Audio device failed to open");
            }
            sdl2::mixer::allocate_channels(4);
        }

        Audio {
            _mixer_context: mixer_context,
            hit: load_chunk(Asset::HitSound),
            miss: load_chunk(Asset::MissSound),
            game_over: load_chunk(Asset::GameOverSound),
            music: load_music(),
            muted: false,
        }
    }

    /// Starts the ambience track if it is not already playing. Calling this
    /// on every run start is the intended usage.
    pub fn ensure_music(&self) {
        let Some(music) = &self.music else { return };
        if Music::is_playing() {
            return;
        }
        if let Err(e) = music.play(-1) {
            warn!(error = %e, "Music playback failed");
        }
    }

    pub fn hit(&self) {
        self.play(&self.hit);
    }

    pub fn miss(&self) {
        self.play(&self.miss);
    }

    pub fn game_over(&self) {
        self.play(&self.game_over);
    }

    fn play(&self, chunk: &Option<Chunk>) {
        if self.muted {
            return;
        }
        if let Some(chunk) = chunk {
            if let Err(e) = Channel::all().play(chunk, 0) {
                warn!(error = %e, "Sound playback failed");
            }
        }
    }

    pub fn set_mute(&mut self, muted: bool) {
        self.muted = muted;
        let volume = if muted { 0 } else { MAX_VOLUME };
        Channel::all().set_volume(volume);
        Music::set_volume(volume);
        debug!(muted, "Audio mute toggled");
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

fn load_chunk(asset: Asset) -> Option<Chunk> {
    if !asset.exists() {
        debug!(path = %asset.path().display(), "Sound asset missing");
        return None;
    }
    match Chunk::from_file(asset.path()) {
        Ok(chunk) => Some(chunk),
        Err(e) => {
            warn!(path = %asset.path().display(), error = %e, "Sound asset failed to load");
            None
        }
    }
}

fn load_music() -> Option<Music<'static>> {
    let asset = Asset::Music;
    if !asset.exists() {
        debug!(path = %asset.path().display(), "Music asset missing");
        return None;
    }
    match Music::from_file(asset.path()) {
        Ok(music) => Some(music),
        Err(e) => {
            warn!(path = %asset.path().display(), error = %e, "Music asset failed to load");
            None
        }
    }
}
