use crate::entities::{Player, World};
use crate::geometry::{aabb_overlap, touches, Bounded};

pub const STARTING_LIVES: u32 = 3;
pub const HEARTS_TO_WIN: u32 = 3;

pub const HEART_SCORE: u32 = 500;
pub const STOMP_SCORE: u32 = 200;
pub const VICTORY_SCORE: u32 = 1000;

// two seconds at 60 fps
pub const INVINCIBILITY_FRAMES: u32 = 120;
pub const FLICKER_INTERVAL: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub lives: u32,
    pub score: u32,
    pub hearts_collected: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            lives: STARTING_LIVES,
            score: 0,
            hearts_collected: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLoss {
    Respawned,
    GameOver,
}

impl Progress {
    pub fn can_win(&self) -> bool {
        self.hearts_collected >= HEARTS_TO_WIN
    }

    pub fn lose_life(&mut self, world: &mut World) -> LifeLoss {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            return LifeLoss::GameOver;
        }
        let spawn = world.spawn;
        world.player.respawn_at(spawn.x, spawn.y);
        world.player.invincible_frames = INVINCIBILITY_FRAMES;
        LifeLoss::Respawned
    }
}

pub fn collect_hearts(world: &mut World, progress: &mut Progress) -> Vec<usize> {
    let player = world.player.bounds();
    let mut picked = Vec::new();
    for (index, heart) in world.hearts.iter_mut().enumerate() {
        if heart.collected || !aabb_overlap(&player, &heart.bounds()) {
            continue;
        }
        heart.collected = true;
        progress.hearts_collected += 1;
        progress.score += HEART_SCORE;
        picked.push(index);
    }
    picked
}

// the pole only reacts once every heart is in; the door wins after that
pub fn check_goal(world: &mut World, progress: &Progress) -> bool {
    if !progress.can_win() {
        return false;
    }

    if !world.flag_pole.reached && touches(&world.player, &world.flag_pole) {
        world.flag_pole.reached = true;
        log::debug!("flag pole reached");
    }
    if !world.flag_pole.reached {
        return false;
    }

    world.flag_pole.lower_flag();
    aabb_overlap(&world.player.bounds(), &world.castle.door())
}

pub fn tick_invincibility(player: &mut Player) {
    player.invincible_frames = player.invincible_frames.saturating_sub(1);
}

pub fn player_visible(player: &Player) -> bool {
    !player.is_invincible() || (player.invincible_frames / FLICKER_INTERVAL) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::LevelLayout;

    fn world() -> World {
        World::from_layout(&LevelLayout::default())
    }

    fn stand_on_heart(world: &mut World, index: usize) {
        let heart = &world.hearts[index];
        world.player.x = heart.x + 4.0;
        world.player.y = heart.y;
    }

    #[test]
    fn heart_pickup_is_idempotent() {
        let mut world = world();
        let mut progress = Progress::default();
        stand_on_heart(&mut world, 0);

        assert_eq!(collect_hearts(&mut world, &mut progress), vec![0]);
        assert!(collect_hearts(&mut world, &mut progress).is_empty());
        assert_eq!(progress.hearts_collected, 1);
        assert_eq!(progress.score, HEART_SCORE);
    }

    #[test]
    fn goal_needs_every_heart() {
        let mut world = world();
        let progress = Progress {
            hearts_collected: 2,
            ..Progress::default()
        };
        let door = world.castle.door();
        world.player.x = world.flag_pole.x;
        world.player.y = door.y + 10.0;
        for _ in 0..100 {
            assert!(!check_goal(&mut world, &progress));
        }
        assert!(!world.flag_pole.reached);
        assert_eq!(world.flag_pole.flag_y, world.flag_pole.y);
    }

    #[test]
    fn door_wins_after_pole_is_reached() {
        let mut world = world();
        let progress = Progress {
            hearts_collected: 3,
            ..Progress::default()
        };

        let door = world.castle.door();
        world.player.x = door.x + 5.0;
        world.player.y = door.y + 10.0;
        assert!(!check_goal(&mut world, &progress));

        world.player.x = world.flag_pole.x;
        assert!(!check_goal(&mut world, &progress));
        assert!(world.flag_pole.reached);
        assert_eq!(world.flag_pole.flag_y, world.flag_pole.y + 2.0);

        world.player.x = door.x + 5.0;
        assert!(check_goal(&mut world, &progress));
    }

    #[test]
    fn last_life_ends_the_game() {
        let mut world = world();
        let mut progress = Progress {
            lives: 1,
            ..Progress::default()
        };
        assert_eq!(progress.lose_life(&mut world), LifeLoss::GameOver);
        assert_eq!(progress.lives, 0);
    }

    #[test]
    fn losing_a_life_respawns_at_rest() {
        let mut world = world();
        let mut progress = Progress::default();
        world.player.x = 400.0;
        world.player.y = 620.0;
        world.player.vx = 2.0;
        world.player.vy = 10.0;
        world.player.jumping = true;

        assert_eq!(progress.lose_life(&mut world), LifeLoss::Respawned);
        assert_eq!(progress.lives, 2);
        assert_eq!((world.player.x, world.player.y), (50.0, 450.0));
        assert_eq!((world.player.vx, world.player.vy), (0.0, 0.0));
        assert!(!world.player.jumping);
        assert_eq!(world.player.invincible_frames, INVINCIBILITY_FRAMES);
    }

    #[test]
    fn invincibility_flickers_then_ends() {
        let mut player = Player::spawn(0.0, 0.0);
        player.invincible_frames = INVINCIBILITY_FRAMES;
        let mut toggles = 0;
        let mut visible = player_visible(&player);
        for _ in 0..INVINCIBILITY_FRAMES {
            tick_invincibility(&mut player);
            if player_visible(&player) != visible {
                toggles += 1;
                visible = !visible;
            }
        }
        assert!(!player.is_invincible());
        assert!(player_visible(&player));
        assert_eq!(toggles, 10);
    }
}
