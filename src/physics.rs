// per-frame constants; nothing here is scaled by elapsed time

use crate::entities::{Facing, Platform, Player, WALK_ANIM_SPEED};
use crate::geometry::{aabb_overlap, Bounded};

pub const GRAVITY: f32 = 0.6;
pub const JUMP_POWER: f32 = -12.0;
pub const MOVE_SPEED: f32 = 2.0;
pub const MAX_FALL_SPEED: f32 = 10.0;
pub const FRICTION: f32 = 0.85;
pub const ACCELERATION: f32 = 0.3;
pub const STOP_THRESHOLD: f32 = 0.1;

// slack for the reconstructed previous edge; a fall faster than platform
// height plus this can tunnel
pub const LANDING_TOLERANCE: f32 = 5.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub fell_off: bool,
}

pub fn try_jump(player: &mut Player) -> bool {
    if !player.grounded || player.jumping {
        return false;
    }
    player.vy = JUMP_POWER;
    player.jumping = true;
    player.grounded = false;
    true
}

pub fn step_player(
    player: &mut Player,
    intent: MoveIntent,
    platforms: &[Platform],
    canvas_width: f32,
    canvas_height: f32,
    frame: u64,
) -> StepOutcome {
    apply_horizontal_intent(player, intent);

    player.vy = (player.vy + GRAVITY).min(MAX_FALL_SPEED);

    player.x += player.vx;
    player.y += player.vy;

    animate_walk(player, frame);

    resolve_platforms(player, platforms);

    if player.x < 0.0 {
        player.x = 0.0;
    }
    if player.x > canvas_width - player.width {
        player.x = canvas_width - player.width;
    }

    StepOutcome {
        fell_off: player.y > canvas_height,
    }
}

fn apply_horizontal_intent(player: &mut Player, intent: MoveIntent) {
    if intent.left {
        if player.vx > -MOVE_SPEED {
            player.vx -= ACCELERATION;
        }
        if player.vx < -MOVE_SPEED {
            player.vx = -MOVE_SPEED;
        }
        player.facing = Facing::Left;
        player.anim_timer += 1;
    } else if intent.right {
        if player.vx < MOVE_SPEED {
            player.vx += ACCELERATION;
        }
        if player.vx > MOVE_SPEED {
            player.vx = MOVE_SPEED;
        }
        player.facing = Facing::Right;
        player.anim_timer += 1;
    } else {
        player.vx *= FRICTION;
        if player.vx.abs() < STOP_THRESHOLD {
            player.vx = 0.0;
        }
    }
}

fn animate_walk(player: &mut Player, frame: u64) {
    if player.vx.abs() > 0.5 {
        if player.anim_timer > WALK_ANIM_SPEED {
            player.anim_frame = (player.anim_frame + 1) % 2;
            player.anim_timer = 0;
        }
    } else {
        player.anim_frame = 0;
    }

    if player.grounded {
        player.dress_offset *= 0.9;
    } else {
        player.dress_offset = (frame as f32 * 0.2).sin() * 2.0;
    }
}

// grounded is recomputed from scratch every frame
pub fn resolve_platforms(player: &mut Player, platforms: &[Platform]) {
    player.grounded = false;

    for platform in platforms {
        if !aabb_overlap(&player.bounds(), &platform.bounds()) {
            continue;
        }

        let previous_bottom = player.y + player.height - player.vy;
        let previous_top = player.y - player.vy;

        if player.vy > 0.0 && previous_bottom <= platform.top() + LANDING_TOLERANCE {
            player.y = platform.top() - player.height;
            player.vy = 0.0;
            player.jumping = false;
            player.grounded = true;
        } else if player.vy < 0.0 && previous_top >= platform.bottom() - LANDING_TOLERANCE {
            player.y = platform.bottom();
            player.vy = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PlatformKind;

    fn floor() -> Vec<Platform> {
        vec![Platform::new(0.0, 550.0, 800.0, 50.0, PlatformKind::Ground)]
    }

    #[test]
    fn acceleration_caps_at_move_speed() {
        let mut player = Player::spawn(100.0, 512.0);
        let intent = MoveIntent {
            left: false,
            right: true,
        };
        for frame in 0..30 {
            step_player(&mut player, intent, &floor(), 800.0, 600.0, frame);
        }
        assert_eq!(player.vx, MOVE_SPEED);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn friction_snaps_to_zero() {
        let mut player = Player::spawn(100.0, 512.0);
        player.vx = MOVE_SPEED;
        for frame in 0..40 {
            step_player(&mut player, MoveIntent::default(), &floor(), 800.0, 600.0, frame);
        }
        assert_eq!(player.vx, 0.0);
    }

    #[test]
    fn fall_speed_is_clamped_every_frame() {
        let mut player = Player::spawn(100.0, -2000.0);
        for frame in 0..200 {
            step_player(&mut player, MoveIntent::default(), &[], 800.0, 1.0e6, frame);
            assert!(player.vy <= MAX_FALL_SPEED);
        }
    }

    #[test]
    fn landing_rests_exactly_on_top() {
        let mut player = Player::spawn(100.0, 510.0);
        player.vy = 4.0;
        step_player(&mut player, MoveIntent::default(), &floor(), 800.0, 600.0, 0);
        assert_eq!(player.y, 550.0 - player.height);
        assert_eq!(player.vy, 0.0);
        assert!(player.grounded);
        assert!(!player.jumping);
    }

    #[test]
    fn grounded_is_recomputed_each_frame() {
        let mut player = Player::spawn(100.0, 512.0);
        step_player(&mut player, MoveIntent::default(), &floor(), 800.0, 600.0, 0);
        assert!(player.grounded);

        step_player(&mut player, MoveIntent::default(), &[], 800.0, 600.0, 1);
        assert!(!player.grounded);
    }

    #[test]
    fn head_bump_stops_rise() {
        let ceiling = vec![Platform::new(0.0, 400.0, 800.0, 20.0, PlatformKind::Brick)];
        let mut player = Player::spawn(100.0, 425.0);
        player.vy = -8.0;
        step_player(&mut player, MoveIntent::default(), &ceiling, 800.0, 600.0, 0);
        assert_eq!(player.y, 420.0);
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn side_contact_does_not_snap_to_top() {
        let wall = vec![Platform::new(100.0, 400.0, 40.0, 150.0, PlatformKind::Brick)];
        let mut player = Player::spawn(90.0, 450.0);
        player.vy = 1.0;
        player.vx = 2.0;
        step_player(&mut player, MoveIntent::default(), &wall, 800.0, 600.0, 0);
        assert!(!player.grounded);
        assert!(player.y > 450.0);
    }

    #[test]
    fn jump_needs_ground_and_no_jump_in_progress() {
        let mut player = Player::spawn(100.0, 512.0);
        assert!(!try_jump(&mut player));

        player.grounded = true;
        assert!(try_jump(&mut player));
        assert_eq!(player.vy, JUMP_POWER);
        assert!(player.jumping);
        assert!(!try_jump(&mut player));
    }

    #[test]
    fn position_is_clamped_to_canvas() {
        let mut player = Player::spawn(790.0, 512.0);
        player.vx = MOVE_SPEED;
        let intent = MoveIntent {
            left: false,
            right: true,
        };
        step_player(&mut player, intent, &floor(), 800.0, 600.0, 0);
        assert_eq!(player.x, 800.0 - player.width);

        let mut player = Player::spawn(0.1, 512.0);
        let intent = MoveIntent {
            left: true,
            right: false,
        };
        step_player(&mut player, intent, &floor(), 800.0, 600.0, 0);
        assert_eq!(player.x, 0.0);
    }

    #[test]
    fn falling_below_canvas_is_reported() {
        let mut player = Player::spawn(100.0, 595.0);
        player.vy = 6.0;
        let outcome = step_player(&mut player, MoveIntent::default(), &[], 800.0, 600.0, 0);
        assert!(outcome.fell_off);
    }
}
