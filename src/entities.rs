use macroquad::math::Rect;
use serde::{Deserialize, Serialize};

use crate::geometry::Bounded;

pub const PLAYER_WIDTH: f32 = 16.0;
pub const PLAYER_HEIGHT: f32 = 38.0;
pub const ENEMY_WIDTH: f32 = 32.0;
pub const ENEMY_HEIGHT: f32 = 40.0;
pub const HEART_SIZE: f32 = 28.0;

pub const WALK_ANIM_SPEED: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blink {
    pub interval: u32,
    pub timer: u32,
    pub closed_for: u32,
    pub eyes_open: bool,
}

impl Blink {
    const CLOSED_FRAMES: u32 = 10;

    pub fn every(interval: u32) -> Self {
        Self {
            interval,
            timer: 0,
            closed_for: 0,
            eyes_open: true,
        }
    }

    pub fn tick(&mut self) {
        self.timer += 1;
        if self.timer > self.interval && self.closed_for == 0 {
            self.closed_for = Self::CLOSED_FRAMES;
            self.eyes_open = false;
            self.timer = 0;
        }
        if self.closed_for > 0 {
            self.closed_for -= 1;
            if self.closed_for == 0 {
                self.eyes_open = true;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
    pub facing: Facing,
    pub grounded: bool,
    pub jumping: bool,
    pub invincible_frames: u32,
    pub anim_frame: u8,
    pub anim_timer: u32,
    pub blink: Blink,
    pub dress_offset: f32,
}

impl Player {
    pub fn spawn(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            vx: 0.0,
            vy: 0.0,
            facing: Facing::Right,
            grounded: false,
            jumping: false,
            invincible_frames: 0,
            anim_frame: 0,
            anim_timer: 0,
            blink: Blink::every(180),
            dress_offset: 0.0,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_frames > 0
    }

    pub fn respawn_at(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.jumping = false;
        self.grounded = false;
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prince {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub anim_frame: u8,
    pub anim_timer: u32,
    pub blink: Blink,
}

impl Prince {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            anim_frame: 0,
            anim_timer: 0,
            blink: Blink::every(200),
        }
    }

    pub fn tick_idle(&mut self) {
        self.anim_timer += 1;
        if self.anim_timer > 60 {
            self.anim_frame = (self.anim_frame + 1) % 2;
            self.anim_timer = 0;
        }
    }
}

impl Bounded for Prince {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Ground,
    Brick,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: PlatformKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

impl Bounded for Platform {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    #[default]
    Guard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub kind: EnemyKind,
    pub alive: bool,
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub collected: bool,
    // cosmetic only, never moves the hitbox
    pub float_phase: f32,
}

impl Heart {
    pub fn bob_offset(&self) -> f32 {
        self.float_phase.sin() * 5.0
    }
}

impl Bounded for Heart {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Castle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Castle {
    pub fn door(&self) -> Rect {
        Rect::new(self.x + 45.0, self.y + 110.0, 30.0, 60.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlagPole {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub flag_y: f32,
    pub reached: bool,
}

impl FlagPole {
    pub const LOWER_SPEED: f32 = 2.0;

    pub fn flag_floor(&self) -> f32 {
        self.y + self.height - 60.0
    }

    pub fn lower_flag(&mut self) {
        self.flag_y = (self.flag_y + Self::LOWER_SPEED).min(self.flag_floor());
    }
}

impl Bounded for FlagPole {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

impl Cloud {
    pub fn drift(&mut self, canvas_width: f32) {
        self.x += self.speed;
        if self.x > canvas_width {
            self.x = -self.size;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    #[serde(default)]
    pub kind: EnemyKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoleSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// every reset rebuilds the live World from this
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub player_spawn: Point,
    pub prince: Point,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<EnemySpawn>,
    pub hearts: Vec<Point>,
    pub castle: Castle,
    pub flag_pole: PoleSpec,
    pub clouds: Vec<Cloud>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        use PlatformKind::{Brick, Ground};

        let enemy = |x: f32, y: f32, vx: f32| EnemySpawn {
            x,
            y,
            vx,
            kind: EnemyKind::Guard,
        };
        let cloud = |x: f32, y: f32, size: f32, speed: f32| Cloud { x, y, size, speed };

        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            player_spawn: Point { x: 50.0, y: 450.0 },
            prince: Point { x: 710.0, y: 510.0 },
            platforms: vec![
                Platform::new(0.0, 550.0, 200.0, 50.0, Ground),
                Platform::new(250.0, 550.0, 120.0, 50.0, Ground),
                Platform::new(420.0, 550.0, 100.0, 50.0, Ground),
                Platform::new(570.0, 550.0, 230.0, 50.0, Ground),
                Platform::new(90.0, 480.0, 80.0, 20.0, Brick),
                Platform::new(180.0, 420.0, 60.0, 20.0, Brick),
                Platform::new(270.0, 360.0, 40.0, 20.0, Brick),
                Platform::new(360.0, 300.0, 60.0, 20.0, Brick),
                Platform::new(460.0, 360.0, 60.0, 20.0, Brick),
                Platform::new(550.0, 420.0, 60.0, 20.0, Brick),
                Platform::new(450.0, 240.0, 80.0, 20.0, Brick),
                Platform::new(300.0, 200.0, 100.0, 20.0, Brick),
            ],
            enemies: vec![
                enemy(120.0, 510.0, 1.2),
                enemy(280.0, 510.0, -1.0),
                enemy(450.0, 510.0, 1.3),
                enemy(650.0, 510.0, -1.2),
                enemy(730.0, 510.0, -1.2),
                enemy(180.0, 380.0, 0.8),
                enemy(460.0, 320.0, -0.8),
            ],
            hearts: vec![
                Point { x: 190.0, y: 380.0 },
                Point { x: 370.0, y: 260.0 },
                Point { x: 460.0, y: 320.0 },
            ],
            castle: Castle {
                x: 630.0,
                y: 270.0,
                width: 160.0,
                height: 280.0,
            },
            flag_pole: PoleSpec {
                x: 620.0,
                y: 200.0,
                width: 10.0,
                height: 350.0,
            },
            clouds: vec![
                cloud(80.0, 60.0, 50.0, 0.2),
                cloud(280.0, 40.0, 70.0, 0.15),
                cloud(520.0, 80.0, 60.0, 0.25),
                cloud(180.0, 130.0, 45.0, 0.18),
                cloud(700.0, 70.0, 80.0, 0.22),
                cloud(400.0, 100.0, 55.0, 0.2),
                cloud(600.0, 50.0, 65.0, 0.16),
                cloud(750.0, 120.0, 40.0, 0.19),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub player: Player,
    pub prince: Prince,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub hearts: Vec<Heart>,
    pub castle: Castle,
    pub flag_pole: FlagPole,
    pub clouds: Vec<Cloud>,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub spawn: Point,
}

impl World {
    pub fn from_layout(layout: &LevelLayout) -> Self {
        Self {
            player: Player::spawn(layout.player_spawn.x, layout.player_spawn.y),
            prince: Prince::at(layout.prince.x, layout.prince.y),
            platforms: layout.platforms.clone(),
            enemies: layout
                .enemies
                .iter()
                .map(|e| Enemy {
                    x: e.x,
                    y: e.y,
                    width: ENEMY_WIDTH,
                    height: ENEMY_HEIGHT,
                    vx: e.vx,
                    kind: e.kind,
                    alive: true,
                })
                .collect(),
            hearts: layout
                .hearts
                .iter()
                .map(|h| Heart {
                    x: h.x,
                    y: h.y,
                    width: HEART_SIZE,
                    height: HEART_SIZE,
                    collected: false,
                    float_phase: 0.0,
                })
                .collect(),
            castle: layout.castle.clone(),
            flag_pole: FlagPole {
                x: layout.flag_pole.x,
                y: layout.flag_pole.y,
                width: layout.flag_pole.width,
                height: layout.flag_pole.height,
                flag_y: layout.flag_pole.y,
                reached: false,
            },
            clouds: layout.clouds.clone(),
            canvas_width: layout.canvas_width,
            canvas_height: layout.canvas_height,
            spawn: layout.player_spawn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_level_literal() {
        let layout = LevelLayout::default();
        assert_eq!(layout.platforms.len(), 12);
        assert_eq!(layout.enemies.len(), 7);
        assert_eq!(layout.hearts.len(), 3);
        assert_eq!(layout.player_spawn, Point { x: 50.0, y: 450.0 });
    }

    #[test]
    fn door_sits_inside_castle() {
        let castle = LevelLayout::default().castle;
        let door = castle.door();
        assert_eq!((door.x, door.y, door.w, door.h), (675.0, 380.0, 30.0, 60.0));
    }

    #[test]
    fn flag_lowers_until_floor() {
        let mut world = World::from_layout(&LevelLayout::default());
        for _ in 0..1000 {
            world.flag_pole.lower_flag();
        }
        assert_eq!(world.flag_pole.flag_y, 200.0 + 350.0 - 60.0);
    }

    #[test]
    fn blink_closes_eyes_briefly() {
        let mut blink = Blink::every(3);
        let mut closed = 0;
        for _ in 0..20 {
            blink.tick();
            if !blink.eyes_open {
                closed += 1;
            }
        }
        assert!(closed > 0);
        assert!(closed < 20);
    }

    #[test]
    fn layout_survives_json() {
        let layout = LevelLayout::default();
        let text = serde_json::to_string(&layout).unwrap();
        let back: LevelLayout = serde_json::from_str(&text).unwrap();
        assert_eq!(back, layout);
    }
}
