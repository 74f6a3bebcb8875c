use macroquad::input::{get_char_pressed, is_key_down, is_key_pressed, is_mouse_button_pressed, KeyCode, MouseButton};

// directions are held, everything else is edge-triggered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub confirm: bool,
    pub accept: bool,
    pub decline: bool,
    pub backspace: bool,
    pub click: bool,
    pub typed: Vec<char>,
}

impl FrameInput {
    pub fn capture() -> Self {
        let mut typed = Vec::new();
        while let Some(c) = get_char_pressed() {
            if !c.is_control() {
                typed.push(c);
            }
        }

        Self {
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            jump: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Up),
            confirm: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
            accept: is_key_pressed(KeyCode::Y),
            decline: is_key_pressed(KeyCode::N),
            backspace: is_key_pressed(KeyCode::Backspace),
            click: is_mouse_button_pressed(MouseButton::Left),
            typed,
        }
    }

    pub fn advance(&self) -> bool {
        self.confirm || self.jump || self.click
    }
}
