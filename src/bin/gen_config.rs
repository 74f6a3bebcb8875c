use heart_quest::config::{save_rules, write_json, GameRules, LEVEL_PATH, RULES_PATH, STORY_PATH};
use heart_quest::entities::LevelLayout;
use heart_quest::error::ConfigError;
use heart_quest::story::StoryScript;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = write_all() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn write_all() -> Result<(), ConfigError> {
    save_rules(RULES_PATH, &GameRules::default())?;
    log::info!("Wrote {RULES_PATH}");

    write_json(LEVEL_PATH, &LevelLayout::default(), "level")?;
    log::info!("Wrote {LEVEL_PATH}");

    write_json(STORY_PATH, &StoryScript::default(), "story")?;
    log::info!("Wrote {STORY_PATH}");
    Ok(())
}
