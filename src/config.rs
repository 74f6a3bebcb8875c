use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::entities::LevelLayout;
use crate::error::ConfigError;
use crate::particles::DEFAULT_CAPACITY;

pub const RULES_PATH: &str = "assets/config/rules.json";
pub const LEVEL_PATH: &str = "assets/config/level.json";
pub const STORY_PATH: &str = "assets/config/story.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub seed: Option<u64>,
    pub window_width: f32,
    pub window_height: f32,
    pub vsync_enabled: bool,
    pub show_fps: bool,
    pub log_level: String,

    pub sfx_enabled: bool,
    pub music_enabled: bool,
    pub sfx_volume: f32,
    pub music_volume: f32,

    pub particle_capacity: usize,

    pub codename: String,
    pub greeting_name: String,
    pub confession_title: String,
    pub confession_text: String,
    pub signature: String,

    pub story_path: String,
    pub level_path: String,
    pub sound_folder: String,

    pub jump_sound_start_freq: f32,
    pub jump_sound_end_freq: f32,
    pub jump_sound_duration: f32,
    pub collect_sound_start_freq: f32,
    pub collect_sound_end_freq: f32,
    pub collect_sound_duration: f32,
    pub stomp_sound_freq: f32,
    pub stomp_sound_duration: f32,
    pub hit_sound_start_freq: f32,
    pub hit_sound_end_freq: f32,
    pub hit_sound_duration: f32,
    pub game_over_sound_start_freq: f32,
    pub game_over_sound_end_freq: f32,
    pub game_over_sound_duration: f32,
    pub fanfare_notes: Vec<f32>,
    pub fanfare_note_duration: f32,
    pub summon_note_duration: f32,
    pub music_notes: Vec<f32>,
    pub music_note_duration: f32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            seed: None,
            window_width: 800.0,
            window_height: 600.0,
            vsync_enabled: true,
            show_fps: false,
            log_level: "info".to_string(),
            sfx_enabled: true,
            music_enabled: true,
            sfx_volume: 0.4,
            music_volume: 0.15,
            particle_capacity: DEFAULT_CAPACITY,
            codename: "valentine".to_string(),
            greeting_name: "SWEETHEART".to_string(),
            confession_title: "My Dearest,".to_string(),
            confession_text: "Happy Valentine's Day! On this special day, I wanted to tell you \
                something that has been on my heart for so long. You mean the world to me, \
                and being able to share this day with you makes me incredibly happy."
                .to_string(),
            signature: "With all my love".to_string(),
            story_path: STORY_PATH.to_string(),
            level_path: LEVEL_PATH.to_string(),
            sound_folder: "assets/sounds".to_string(),
            jump_sound_start_freq: 400.0,
            jump_sound_end_freq: 600.0,
            jump_sound_duration: 0.15,
            collect_sound_start_freq: 800.0,
            collect_sound_end_freq: 1600.0,
            collect_sound_duration: 0.25,
            stomp_sound_freq: 300.0,
            stomp_sound_duration: 0.1,
            hit_sound_start_freq: 200.0,
            hit_sound_end_freq: 150.0,
            hit_sound_duration: 0.3,
            game_over_sound_start_freq: 400.0,
            game_over_sound_end_freq: 200.0,
            game_over_sound_duration: 0.8,
            fanfare_notes: vec![523.25, 659.25, 783.99, 1046.5],
            fanfare_note_duration: 0.15,
            summon_note_duration: 0.08,
            music_notes: vec![523.25, 587.33, 659.25, 783.99, 659.25, 587.33],
            music_note_duration: 0.4,
        }
    }
}

// never fails: a missing or broken file falls back to the defaults
pub fn load_rules(path: &str) -> GameRules {
    let mut rules = read_json::<GameRules>(path).unwrap_or_else(|e| {
        log::warn!("{e}. Using default rules.");
        GameRules::default()
    });

    if rules.particle_capacity == 0 {
        log::warn!("particle_capacity must be positive; using {DEFAULT_CAPACITY}");
        rules.particle_capacity = DEFAULT_CAPACITY;
    }
    rules.codename = rules.codename.trim().to_lowercase();
    rules.sfx_volume = rules.sfx_volume.clamp(0.0, 1.0);
    rules.music_volume = rules.music_volume.clamp(0.0, 1.0);

    rules
}

pub fn save_rules(path: &str, rules: &GameRules) -> Result<(), ConfigError> {
    write_json(path, rules, "rules")
}

pub fn load_level(path: &str) -> LevelLayout {
    match read_json::<LevelLayout>(path) {
        Ok(layout) => {
            log::info!(
                "Loaded level from {path}: {} platforms, {} guards, {} hearts",
                layout.platforms.len(),
                layout.enemies.len(),
                layout.hearts.len()
            );
            layout
        }
        Err(e) => {
            log::warn!("{e}. Using the built-in level.");
            LevelLayout::default()
        }
    }
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_string(),
        details: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_string(),
        details: e.to_string(),
    })
}

pub fn write_json<T: Serialize>(path: &str, value: &T, what: &str) -> Result<(), ConfigError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| ConfigError::Serialize {
        what: what.to_string(),
        details: e.to_string(),
    })?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                details: e.to_string(),
            })?;
        }
    }

    fs::write(path, text).map_err(|e| ConfigError::Write {
        path: path.to_string(),
        details: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("heart_quest_config_{}_{name}", std::process::id()));
        dir.join("nested").join(format!("{name}.json")).display().to_string()
    }

    #[test]
    fn missing_rules_file_gives_defaults() {
        let rules = load_rules("definitely/not/here/rules.json");
        assert_eq!(rules, GameRules::default());
    }

    #[test]
    fn partial_rules_fill_in_defaults() {
        let rules: GameRules = serde_json::from_str(r#"{ "codename": "Rose", "show_fps": true }"#).unwrap();
        assert_eq!(rules.codename, "Rose");
        assert!(rules.show_fps);
        assert_eq!(rules.particle_capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn saved_rules_load_back_normalised() {
        let path = scratch("rules");
        let rules = GameRules {
            codename: "  Rose ".to_string(),
            particle_capacity: 0,
            music_volume: 3.0,
            ..GameRules::default()
        };
        save_rules(&path, &rules).unwrap();

        let loaded = load_rules(&path);
        assert_eq!(loaded.codename, "rose");
        assert_eq!(loaded.particle_capacity, DEFAULT_CAPACITY);
        assert_eq!(loaded.music_volume, 1.0);
    }

    #[test]
    fn broken_level_file_falls_back() {
        let path = scratch("level");
        fs::create_dir_all(Path::new(&path).parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_level(&path), LevelLayout::default());
    }

    #[test]
    fn read_errors_name_the_file() {
        let err = read_json::<GameRules>("nope/rules.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope/rules.json"));
    }
}
