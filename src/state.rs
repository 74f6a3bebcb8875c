use crate::error::CodenameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Start,
    Playing,
    GameOver,
    Victory,
    Dialogue,
    VictoryScreen,
    FlowerBouquet,
}

impl GameState {
    pub fn name(self) -> &'static str {
        match self {
            GameState::Start => "start",
            GameState::Playing => "playing",
            GameState::GameOver => "game over",
            GameState::Victory => "victory",
            GameState::Dialogue => "dialogue",
            GameState::VictoryScreen => "victory screen",
            GameState::FlowerBouquet => "flower bouquet",
        }
    }

    pub fn is_gameplay(self) -> bool {
        matches!(self, GameState::Playing)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub const CODENAME_MAX_LEN: usize = 16;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartScreen {
    pub input: String,
    pub error: Option<CodenameError>,
    pub unlocked: bool,
}

impl StartScreen {
    pub fn type_char(&mut self, c: char) {
        if self.unlocked || c.is_control() || self.input.chars().count() >= CODENAME_MAX_LEN {
            return;
        }
        self.input.push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if !self.unlocked {
            self.input.pop();
        }
    }

    pub fn submit(&mut self, expected: &str) -> Result<(), CodenameError> {
        let guess = self.input.trim().to_lowercase();
        let result = if guess.is_empty() {
            Err(CodenameError::Empty)
        } else if guess == expected.trim().to_lowercase() {
            Ok(())
        } else {
            Err(CodenameError::Invalid)
        };

        match &result {
            Ok(()) => {
                self.unlocked = true;
                self.error = None;
            }
            Err(e) => self.error = Some(e.clone()),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> StartScreen {
        let mut screen = StartScreen::default();
        for c in text.chars() {
            screen.type_char(c);
        }
        screen
    }

    #[test]
    fn codename_ignores_case_and_padding() {
        let mut screen = typed("  VaLeNtInE ");
        assert_eq!(screen.submit("valentine"), Ok(()));
        assert!(screen.unlocked);
        assert_eq!(screen.error, None);
    }

    #[test]
    fn wrong_codename_stays_locked() {
        let mut screen = typed("rose");
        assert_eq!(screen.submit("valentine"), Err(CodenameError::Invalid));
        assert!(!screen.unlocked);
        assert_eq!(screen.error, Some(CodenameError::Invalid));

        screen.backspace();
        screen.type_char('x');
        assert_eq!(screen.input, "rosx");
        assert_eq!(screen.error, None);
    }

    #[test]
    fn empty_codename_is_rejected() {
        let mut screen = typed("   ");
        assert_eq!(screen.submit("valentine"), Err(CodenameError::Empty));
    }

    #[test]
    fn input_is_capped() {
        let screen = typed(&"a".repeat(40));
        assert_eq!(screen.input.len(), CODENAME_MAX_LEN);
    }

    #[test]
    fn only_playing_runs_gameplay() {
        assert!(GameState::Playing.is_gameplay());
        assert!(!GameState::Dialogue.is_gameplay());
        assert_eq!(GameState::default(), GameState::Start);
    }
}
