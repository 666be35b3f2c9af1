use log::{debug, info, warn};
use macroquad::audio::{self, PlaySoundParams, Sound, load_sound, load_sound_from_bytes};
use std::collections::{HashMap, HashSet};
use std::f32::consts::TAU;
use std::fmt;
use std::path::Path;

const SAMPLE_RATE: u32 = 44_100;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Cue {
    /// One-shot, played when food is eaten.
    Bite,
    /// Looping background music.
    Bgm,
}

impl Cue {
    pub const ALL: [Cue; 2] = [Cue::Bite, Cue::Bgm];

    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Bite => "bite.wav",
            Cue::Bgm => "bgm.wav",
        }
    }

    pub fn looped(self) -> bool {
        matches!(self, Cue::Bgm)
    }

    // relative to the master volume
    fn gain(self) -> f32 {
        match self {
            Cue::Bite => 0.6,
            Cue::Bgm => 0.3,
        }
    }

    /// Tone used when the sound file cannot be loaded.
    fn fallback(self) -> Vec<u8> {
        match self {
            Cue::Bite => synth_wav(&[(880.0, 0.06), (1320.0, 0.05)], 0.6),
            Cue::Bgm => synth_wav(
                &[(220.0, 0.4), (277.2, 0.4), (329.6, 0.4), (277.2, 0.4)],
                0.25,
            ),
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Bite => write!(f, "bite"),
            Cue::Bgm => write!(f, "bgm"),
        }
    }
}

/// Where the session sends its sound commands.
pub trait AudioSink {
    /// One-shots restart from the beginning; loops start if not already playing.
    fn play(&mut self, cue: Cue);
    fn pause(&mut self, cue: Cue);
    fn stop(&mut self, cue: Cue);
    /// Return to the start; a following `play` begins from there.
    fn rewind(&mut self, cue: Cue);
}

/// Loaded sounds played through macroquad.
///
/// macroquad cannot seek or suspend a playing sound, so pausing a loop stops
/// it and resuming starts it over.
pub struct SoundBank {
    sounds: HashMap<Cue, Sound>,
    playing: HashSet<Cue>,
    volume: f32,
}

impl SoundBank {
    /// Load every cue from `dir`. Missing or broken files are replaced by a
    /// synthesized tone; if even that fails the cue stays silent.
    pub async fn load(dir: &Path, volume: f32) -> Self {
        let mut sounds = HashMap::new();
        for cue in Cue::ALL {
            let path = dir.join(cue.file_name());
            let loaded = match load_sound(&path.to_string_lossy()).await {
                Ok(sound) => Some(sound),
                Err(err) => {
                    warn!("could not load {}: {err}; using a generated tone", path.display());
                    load_sound_from_bytes(&cue.fallback()).await.ok()
                }
            };
            match loaded {
                Some(sound) => {
                    sounds.insert(cue, sound);
                }
                None => warn!("{cue} will be silent"),
            }
        }
        info!("loaded {} of {} sounds", sounds.len(), Cue::ALL.len());

        Self { sounds, playing: HashSet::new(), volume: volume.clamp(0.0, 1.0) }
    }

    fn sound(&self, cue: Cue) -> Option<&Sound> {
        let sound = self.sounds.get(&cue);
        if sound.is_none() {
            debug!("{cue} not loaded");
        }
        sound
    }
}

impl AudioSink for SoundBank {
    fn play(&mut self, cue: Cue) {
        let Some(sound) = self.sound(cue) else { return };
        let params = PlaySoundParams { looped: cue.looped(), volume: cue.gain() * self.volume };
        if cue.looped() {
            if self.playing.contains(&cue) {
                return;
            }
            audio::play_sound(sound, params);
            self.playing.insert(cue);
        } else {
            audio::stop_sound(sound);
            audio::play_sound(sound, params);
        }
    }

    fn pause(&mut self, cue: Cue) {
        if let Some(sound) = self.sound(cue) {
            audio::stop_sound(sound);
        }
        self.playing.remove(&cue);
    }

    fn stop(&mut self, cue: Cue) {
        self.pause(cue);
    }

    fn rewind(&mut self, cue: Cue) {
        self.stop(cue);
    }
}

/// Encode a sequence of `(frequency_hz, seconds)` sine notes as a mono PCM16 WAV.
pub fn synth_wav(notes: &[(f32, f32)], volume: f32) -> Vec<u8> {
    let samples: Vec<i16> = notes
        .iter()
        .flat_map(|&(freq, secs)| sine_note(freq, secs, volume))
        .collect();

    let data_len = (samples.len() * 2) as u32;
    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}

fn sine_note(freq: f32, secs: f32, volume: f32) -> impl Iterator<Item = i16> {
    let count = (secs.max(0.0) * SAMPLE_RATE as f32) as u32;
    let amplitude = volume.clamp(0.0, 1.0) * 0.7 * i16::MAX as f32;
    // short linear fade at both ends keeps note boundaries from clicking
    let fade = (SAMPLE_RATE / 200).min(count / 2).max(1) as f32;
    (0..count).map(move |n| {
        let t = n as f32 / SAMPLE_RATE as f32;
        let edge = (n as f32 / fade).min((count - n) as f32 / fade).min(1.0);
        (amplitude * edge * (TAU * freq * t).sin()) as i16
    })
}
