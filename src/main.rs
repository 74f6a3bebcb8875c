use std::path::Path;

use ::rand::rngs::StdRng;
use ::rand::SeedableRng;
use macroquad::prelude::*;

use heart_quest::audio::{generate_cues, Sounds};
use heart_quest::canvas::MacroquadCanvas;
use heart_quest::config::{load_level, load_rules, write_json, RULES_PATH};
use heart_quest::input::FrameInput;
use heart_quest::session::GameSession;
use heart_quest::story::{ScriptedStory, StoryClient, StoryScript};

#[macroquad::main("Heart Quest")]
async fn main() {
    let rules = load_rules(RULES_PATH);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(rules.log_level.as_str()))
        .init();

    let seed = rules.seed.unwrap_or_else(random_seed_from_time);
    log::info!("Using rules: {:?}, seed: {}", rules, seed);

    request_new_screen_size(rules.window_width, rules.window_height);

    if !Path::new(&rules.story_path).exists() {
        match write_json(&rules.story_path, &StoryScript::default(), "story") {
            Ok(()) => log::info!("Wrote default story script to {}", rules.story_path),
            Err(e) => log::warn!("{e}. The built-in story will be used."),
        }
    }

    let sound_dir = Path::new(&rules.sound_folder);
    if let Err(e) = generate_cues(sound_dir, &rules) {
        log::error!("Failed to generate sound cues: {e}");
    }
    let mut sounds = Sounds::load(sound_dir).await;

    let layout = load_level(&rules.level_path);
    let story = StoryClient::spawn(Box::new(ScriptedStory::new(rules.story_path.clone())));
    let mut session = GameSession::new(rules.clone(), layout, story, StdRng::seed_from_u64(seed));
    let mut canvas = MacroquadCanvas::new(rules.window_width, rules.window_height);

    loop {
        let frame_start = std::time::Instant::now();

        let input = FrameInput::capture();
        session.update(&input);

        clear_background(BLACK);
        session.draw(&mut canvas);

        for cue in session.drain_cues() {
            sounds.play(cue, &rules);
        }
        sounds.set_music(session.state().is_gameplay(), &rules);

        if rules.show_fps {
            let fps_text = format!("FPS: {}", get_fps());
            draw_text(&fps_text, screen_width() - 140.0, 24.0, 20.0, GREEN);
        }

        if rules.vsync_enabled {
            let target = std::time::Duration::from_micros(16_666);
            let elapsed = frame_start.elapsed();
            if elapsed < target {
                std::thread::sleep(target - elapsed);
            }
        }

        next_frame().await;
    }
}

fn random_seed_from_time() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    // mix seconds and nanos a bit
    now.as_secs() ^ (now.subsec_nanos() as u64).rotate_left(32)
}
