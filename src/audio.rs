use std::f32::consts::PI;
use std::fs;
use std::path::Path;

use macroquad::audio::{load_sound, play_sound, stop_sound, PlaySoundParams, Sound};

use crate::config::GameRules;
use crate::error::AudioError;

const SAMPLE_RATE: u32 = 44_100;
const FADE_SECONDS: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Collect,
    Stomp,
    Hit,
    GameOver,
    Victory,
    Summon,
}

impl SoundCue {
    pub const ALL: [SoundCue; 7] = [
        SoundCue::Jump,
        SoundCue::Collect,
        SoundCue::Stomp,
        SoundCue::Hit,
        SoundCue::GameOver,
        SoundCue::Victory,
        SoundCue::Summon,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump.wav",
            SoundCue::Collect => "collect.wav",
            SoundCue::Stomp => "stomp.wav",
            SoundCue::Hit => "hit.wav",
            SoundCue::GameOver => "game_over.wav",
            SoundCue::Victory => "victory.wav",
            SoundCue::Summon => "summon.wav",
        }
    }
}

pub const MUSIC_FILE: &str = "music.wav";

pub fn generate_cues(dir: &Path, rules: &GameRules) -> Result<(), AudioError> {
    fs::create_dir_all(dir).map_err(|e| AudioError::Directory {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    for cue in SoundCue::ALL {
        let samples = cue_samples(cue, rules);
        write_wav(&dir.join(cue.file_name()), &samples)?;
    }

    let music = melody(&rules.music_notes, rules.music_note_duration, 0.15);
    write_wav(&dir.join(MUSIC_FILE), &music)?;

    log::info!("Synthesised {} sound cues in {}", SoundCue::ALL.len(), dir.display());
    Ok(())
}

fn cue_samples(cue: SoundCue, rules: &GameRules) -> Vec<f32> {
    match cue {
        SoundCue::Jump => glissando(
            rules.jump_sound_start_freq,
            rules.jump_sound_end_freq,
            rules.jump_sound_duration,
            0.5,
        ),
        SoundCue::Collect => glissando(
            rules.collect_sound_start_freq,
            rules.collect_sound_end_freq,
            rules.collect_sound_duration,
            0.5,
        ),
        SoundCue::Stomp => tone(rules.stomp_sound_freq, rules.stomp_sound_duration, 0.6),
        SoundCue::Hit => glissando(
            rules.hit_sound_start_freq,
            rules.hit_sound_end_freq,
            rules.hit_sound_duration,
            0.6,
        ),
        SoundCue::GameOver => glissando(
            rules.game_over_sound_start_freq,
            rules.game_over_sound_end_freq,
            rules.game_over_sound_duration,
            0.6,
        ),
        SoundCue::Victory => melody(&rules.fanfare_notes, rules.fanfare_note_duration, 0.5),
        SoundCue::Summon => melody(&rules.fanfare_notes, rules.summon_note_duration, 0.4),
    }
}

fn sample_count(duration_s: f32) -> usize {
    (duration_s.max(0.0) * SAMPLE_RATE as f32) as usize
}

fn envelope(n: usize, total: usize) -> f32 {
    let fade = sample_count(FADE_SECONDS).max(1) as f32;
    let from_start = n as f32 / fade;
    let from_end = (total - n) as f32 / fade;
    from_start.min(from_end).min(1.0)
}

pub fn tone(freq_hz: f32, duration_s: f32, volume: f32) -> Vec<f32> {
    glissando(freq_hz, freq_hz, duration_s, volume)
}

pub fn glissando(start_freq: f32, end_freq: f32, duration_s: f32, volume: f32) -> Vec<f32> {
    let total = sample_count(duration_s);
    let mut phase = 0.0f32;
    (0..total)
        .map(|n| {
            let t = n as f32 / total.max(1) as f32;
            let freq = start_freq + (end_freq - start_freq) * t;
            phase += 2.0 * PI * freq / SAMPLE_RATE as f32;
            volume * phase.sin() * envelope(n, total)
        })
        .collect()
}

pub fn melody(notes: &[f32], note_s: f32, volume: f32) -> Vec<f32> {
    notes
        .iter()
        .flat_map(|&freq| tone(freq, note_s, volume))
        .collect()
}

fn write_wav(path: &Path, samples: &[f32]) -> Result<(), AudioError> {
    let wav_error = |source| AudioError::Wav {
        path: path.display().to_string(),
        source,
    };

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(wav_error)?;
    for &s in samples {
        let value = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(value).map_err(wav_error)?;
    }
    writer.finalize().map_err(wav_error)?;
    Ok(())
}

#[derive(Default)]
pub struct Sounds {
    cues: Vec<(SoundCue, Sound)>,
    music: Option<Sound>,
    music_playing: bool,
}

impl Sounds {
    pub async fn load(dir: &Path) -> Self {
        async fn load_optional(path: &Path) -> Option<Sound> {
            let path = path.display().to_string();
            match load_sound(&path).await {
                Ok(s) => Some(s),
                Err(e) => {
                    log::warn!("Failed to load sound {path}: {e}");
                    None
                }
            }
        }

        let mut cues = Vec::new();
        for cue in SoundCue::ALL {
            if let Some(sound) = load_optional(&dir.join(cue.file_name())).await {
                cues.push((cue, sound));
            }
        }
        let music = load_optional(&dir.join(MUSIC_FILE)).await;

        Self {
            cues,
            music,
            music_playing: false,
        }
    }

    pub fn play(&self, cue: SoundCue, rules: &GameRules) {
        if !rules.sfx_enabled {
            return;
        }
        if let Some((_, sound)) = self.cues.iter().find(|(c, _)| *c == cue) {
            play_sound(
                sound,
                PlaySoundParams {
                    looped: false,
                    volume: rules.sfx_volume,
                },
            );
        }
    }

    pub fn set_music(&mut self, playing: bool, rules: &GameRules) {
        let playing = playing && rules.music_enabled;
        if playing == self.music_playing {
            return;
        }
        if let Some(music) = self.music.as_ref() {
            if playing {
                play_sound(
                    music,
                    PlaySoundParams {
                        looped: true,
                        volume: rules.music_volume,
                    },
                );
            } else {
                stop_sound(music);
            }
        }
        self.music_playing = playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glissando_has_expected_length_and_fades() {
        let samples = glissando(400.0, 600.0, 0.1, 0.5);
        assert_eq!(samples.len(), 4410);
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|s| s.abs() <= 0.5));
    }

    #[test]
    fn melody_concatenates_notes() {
        let samples = melody(&[440.0, 880.0], 0.05, 0.3);
        assert_eq!(samples.len(), 2 * sample_count(0.05));
    }

    #[test]
    fn cues_are_written_as_mono_wavs() {
        let dir = std::env::temp_dir().join(format!("heart_quest_sounds_{}", std::process::id()));
        generate_cues(&dir, &GameRules::default()).unwrap();

        for cue in SoundCue::ALL {
            let reader = hound::WavReader::open(dir.join(cue.file_name())).unwrap();
            assert_eq!(reader.spec().channels, 1);
            assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
            assert!(reader.len() > 0);
        }
        assert!(dir.join(MUSIC_FILE).exists());
    }
}
