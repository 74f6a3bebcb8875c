use crate::entities::{Enemy, Platform, Player};
use crate::geometry::{aabb_overlap, Bounded};

pub const EDGE_MARGIN: f32 = 5.0;
// feet within [top - STAND_ABOVE, top + STAND_BELOW] count as standing
pub const STAND_ABOVE: f32 = 5.0;
pub const STAND_BELOW: f32 = 10.0;
pub const STOMP_TOLERANCE: f32 = 10.0;
pub const STOMP_BOUNCE: f32 = -8.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnemyOutcome {
    pub stomped: Vec<usize>,
    // at most one per frame
    pub side_hit: bool,
}

fn stands_on(enemy: &Enemy, platform: &Platform) -> bool {
    let feet = enemy.y + enemy.height;
    let horizontal = enemy.x < platform.right() && enemy.x + enemy.width > platform.left();
    horizontal && feet >= platform.top() - STAND_ABOVE && feet <= platform.top() + STAND_BELOW
}

// returns whether the guard turned; edges are checked in the direction of
// travel so a guard cannot turn straight back
pub fn patrol(enemy: &mut Enemy, platforms: &[Platform], canvas_width: f32) -> bool {
    enemy.x += enemy.vx;

    let mut turn = false;
    for platform in platforms.iter().filter(|p| stands_on(enemy, p)) {
        let at_left = enemy.vx < 0.0 && enemy.x <= platform.left() + EDGE_MARGIN;
        let at_right = enemy.vx > 0.0 && enemy.x + enemy.width >= platform.right() - EDGE_MARGIN;
        if at_left || at_right {
            turn = true;
            break;
        }
    }

    let at_wall = (enemy.vx < 0.0 && enemy.x <= 0.0)
        || (enemy.vx > 0.0 && enemy.x + enemy.width >= canvas_width);

    if turn || at_wall {
        enemy.vx = -enemy.vx;
        return true;
    }
    false
}

pub fn is_stomp(player: &Player, enemy: &Enemy) -> bool {
    let previous_feet = player.y + player.height - player.vy;
    player.vy > 0.0 && previous_feet <= enemy.y + STOMP_TOLERANCE
}

// dead guards neither move nor collide; one side hit ends contact checks
pub fn update_enemies(
    enemies: &mut [Enemy],
    platforms: &[Platform],
    player: &mut Player,
    canvas_width: f32,
) -> EnemyOutcome {
    let mut outcome = EnemyOutcome::default();

    for (index, enemy) in enemies.iter_mut().enumerate() {
        if !enemy.alive {
            continue;
        }

        patrol(enemy, platforms, canvas_width);

        if outcome.side_hit || player.is_invincible() {
            continue;
        }
        if !aabb_overlap(&player.bounds(), &enemy.bounds()) {
            continue;
        }

        if is_stomp(player, enemy) {
            enemy.alive = false;
            player.vy = STOMP_BOUNCE;
            outcome.stomped.push(index);
        } else {
            outcome.side_hit = true;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EnemyKind, PlatformKind, ENEMY_HEIGHT, ENEMY_WIDTH};

    fn guard(x: f32, y: f32, vx: f32) -> Enemy {
        Enemy {
            x,
            y,
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            vx,
            kind: EnemyKind::Guard,
            alive: true,
        }
    }

    fn ground() -> Vec<Platform> {
        vec![Platform::new(0.0, 550.0, 200.0, 50.0, PlatformKind::Ground)]
    }

    #[test]
    fn guard_turns_once_at_platform_edge() {
        let mut enemy = guard(120.0, 510.0, 1.2);
        let mut turns = 0;
        for _ in 0..60 {
            if patrol(&mut enemy, &ground(), 800.0) {
                turns += 1;
            }
        }
        assert_eq!(turns, 1);
        assert!(enemy.vx < 0.0);
        assert!(enemy.x + enemy.width <= 200.0);
    }

    #[test]
    fn guard_turns_at_canvas_wall() {
        let mut enemy = guard(1.0, 100.0, -1.5);
        assert!(patrol(&mut enemy, &[], 800.0));
        assert_eq!(enemy.vx, 1.5);
    }

    #[test]
    fn guard_in_the_air_ignores_platform_edges() {
        let mut enemy = guard(180.0, 300.0, 1.0);
        assert!(!patrol(&mut enemy, &ground(), 800.0));
    }

    #[test]
    fn falling_player_stomps_guard() {
        let mut enemies = vec![guard(300.0, 510.0, 0.0)];
        let mut player = Player::spawn(305.0, 475.0);
        player.vy = 5.0;
        let outcome = update_enemies(&mut enemies, &[], &mut player, 800.0);
        assert_eq!(outcome.stomped, vec![0]);
        assert!(!outcome.side_hit);
        assert!(!enemies[0].alive);
        assert_eq!(player.vy, STOMP_BOUNCE);
    }

    #[test]
    fn walking_into_guard_is_a_side_hit() {
        let mut enemies = vec![guard(300.0, 510.0, 0.0), guard(300.0, 510.0, 0.0)];
        let mut player = Player::spawn(290.0, 512.0);
        let outcome = update_enemies(&mut enemies, &[], &mut player, 800.0);
        assert!(outcome.side_hit);
        assert!(outcome.stomped.is_empty());
        assert!(enemies.iter().all(|e| e.alive));
    }

    #[test]
    fn invincible_player_passes_through() {
        let mut enemies = vec![guard(300.0, 510.0, 0.0)];
        let mut player = Player::spawn(290.0, 512.0);
        player.invincible_frames = 10;
        let outcome = update_enemies(&mut enemies, &[], &mut player, 800.0);
        assert_eq!(outcome, EnemyOutcome::default());
    }

    #[test]
    fn dead_guards_stay_put() {
        let mut enemies = vec![guard(300.0, 510.0, 2.0)];
        enemies[0].alive = false;
        let mut player = Player::spawn(0.0, 0.0);
        update_enemies(&mut enemies, &[], &mut player, 800.0);
        assert_eq!(enemies[0].x, 300.0);
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn dead_guard_never_touches_the_player() {
        let mut enemies = vec![guard(300.0, 510.0, 0.0)];
        enemies[0].alive = false;

        let mut player = Player::spawn(290.0, 512.0);
        player.grounded = true;
        assert!(aabb_overlap(&player.bounds(), &enemies[0].bounds()));
        let outcome = update_enemies(&mut enemies, &[], &mut player, 800.0);
        assert_eq!(outcome, EnemyOutcome::default());

        let mut player = Player::spawn(305.0, 475.0);
        player.vy = 5.0;
        let outcome = update_enemies(&mut enemies, &[], &mut player, 800.0);
        assert_eq!(outcome, EnemyOutcome::default());
        assert_eq!(player.vy, 5.0);
    }
}
