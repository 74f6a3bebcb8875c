use macroquad::color::Color;

pub const SKY_TOP: Color = Color::new(0.361, 0.580, 0.988, 1.0);
pub const SKY_BOTTOM: Color = Color::new(0.529, 0.808, 0.922, 1.0);
pub const BRICK_WALL_TOP: Color = Color::new(0.831, 0.337, 0.122, 1.0);
pub const BRICK_WALL_BOTTOM: Color = Color::new(0.659, 0.271, 0.071, 1.0);

pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const GOLD: Color = Color::new(1.0, 0.843, 0.0, 1.0);
pub const ORANGE: Color = Color::new(1.0, 0.647, 0.0, 1.0);
pub const SADDLE_BROWN: Color = Color::new(0.545, 0.271, 0.075, 1.0);
pub const DARK_BROWN: Color = Color::new(0.396, 0.263, 0.129, 1.0);
pub const DEEP_BROWN: Color = Color::new(0.353, 0.176, 0.047, 1.0);
pub const HAIR_DARK: Color = Color::new(0.231, 0.122, 0.043, 1.0);
pub const CHOCOLATE: Color = Color::new(0.824, 0.412, 0.118, 1.0);

pub const HOT_PINK: Color = Color::new(1.0, 0.412, 0.706, 1.0);
pub const DEEP_PINK: Color = Color::new(1.0, 0.078, 0.576, 1.0);
pub const LIGHT_PINK: Color = Color::new(1.0, 0.714, 0.757, 1.0);
pub const MISTY_ROSE: Color = Color::new(1.0, 0.894, 0.882, 1.0);
pub const VIOLET_RED: Color = Color::new(0.780, 0.082, 0.522, 1.0);
pub const CHEEK: Color = Color::new(1.0, 0.714, 0.757, 0.8);

pub const SKIN: Color = Color::new(1.0, 0.839, 0.690, 1.0);
pub const SKIN_SHADE: Color = Color::new(0.992, 0.737, 0.706, 1.0);
pub const TAN: Color = Color::new(0.871, 0.722, 0.529, 1.0);

pub const ROYAL_BLUE: Color = Color::new(0.255, 0.412, 0.882, 1.0);
pub const NAVY_TRIM: Color = Color::new(0.153, 0.251, 0.545, 1.0);
pub const FLAG_BLUE: Color = Color::new(0.0, 0.322, 0.8, 1.0);
pub const CRIMSON: Color = Color::new(0.863, 0.078, 0.235, 1.0);
pub const FIREBRICK: Color = Color::new(0.698, 0.133, 0.133, 1.0);
pub const DARK_RED: Color = Color::new(0.545, 0.0, 0.0, 1.0);

pub const GRASS_LIGHT: Color = Color::new(0.196, 0.804, 0.196, 1.0);
pub const GRASS: Color = Color::new(0.133, 0.545, 0.133, 1.0);
pub const GRASS_DARK: Color = Color::new(0.0, 0.392, 0.0, 1.0);

pub const STONE: Color = Color::new(0.420, 0.447, 0.502, 1.0);
pub const STONE_DARK: Color = Color::new(0.294, 0.333, 0.388, 1.0);
pub const BATTLEMENT: Color = Color::new(0.502, 0.502, 0.502, 1.0);
pub const BATTLEMENT_SHADOW: Color = Color::new(0.314, 0.314, 0.314, 1.0);
pub const WINDOW_GLASS: Color = Color::new(0.529, 0.808, 0.922, 1.0);

pub const ARMOR: Color = Color::new(0.663, 0.663, 0.663, 1.0);
pub const ARMOR_DARK: Color = Color::new(0.412, 0.412, 0.412, 1.0);
pub const ARMOR_SHINE: Color = Color::new(0.910, 0.910, 0.910, 1.0);
pub const SILVER: Color = Color::new(0.753, 0.753, 0.753, 1.0);

pub const NIGHT_TOP: Color = Color::new(0.102, 0.0, 0.2, 1.0);
pub const NIGHT_BOTTOM: Color = Color::new(0.176, 0.031, 0.271, 1.0);
pub const FOCUS_DIM: Color = Color::new(0.235, 0.235, 0.235, 0.85);
pub const PANEL: Color = Color::new(0.0, 0.0, 0.0, 0.95);
pub const SHADOW: Color = Color::new(0.0, 0.0, 0.0, 0.35);

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color {
        a: alpha.clamp(0.0, 1.0),
        ..color
    }
}

pub fn lerp(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}
