use std::collections::VecDeque;
use std::f32::consts::TAU;

use ::rand::Rng;
use macroquad::color::Color;

use crate::canvas::Canvas;
use crate::palette;

pub const DEFAULT_LIFETIME: u32 = 60;
pub const DEFAULT_CAPACITY: usize = 512;
pub const GAMEPLAY_GRAVITY: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Color,
    pub size: f32,
    pub life: u32,
    pub max_life: u32,
    pub round: bool,
}

impl Particle {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, color: Color) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            color,
            size: 3.0,
            life: DEFAULT_LIFETIME,
            max_life: DEFAULT_LIFETIME,
            round: false,
        }
    }

    pub fn with_life(mut self, life: u32) -> Self {
        self.life = life;
        self.max_life = life.max(1);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    pub fn alpha(&self) -> f32 {
        self.life as f32 / self.max_life.max(1) as f32
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }
}

// when full, the oldest particle makes room for the new one
pub struct ParticleSystem {
    particles: VecDeque<Particle>,
    capacity: usize,
    gravity: f32,
}

impl ParticleSystem {
    pub fn new(capacity: usize, gravity: f32) -> Self {
        let capacity = capacity.max(1);
        Self {
            particles: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            gravity,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn spawn(&mut self, particle: Particle) {
        while self.particles.len() >= self.capacity {
            self.particles.pop_front();
        }
        self.particles.push_back(particle);
    }

    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += self.gravity;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| !p.is_dead());
    }

    pub fn heart_burst(&mut self, rng: &mut impl Rng, x: f32, y: f32, count: u32) {
        self.radial_burst(rng, x, y, count, (1.0, 3.0), 2.0, palette::DEEP_PINK);
    }

    pub fn radial_burst(
        &mut self,
        rng: &mut impl Rng,
        x: f32,
        y: f32,
        count: u32,
        speed: (f32, f32),
        lift: f32,
        color: Color,
    ) {
        if count == 0 {
            return;
        }
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let s = rng.gen_range(speed.0..speed.1);
            let size = rng.gen_range(2.0..5.0);
            self.spawn(
                Particle::new(x, y, angle.cos() * s, angle.sin() * s - lift, color).with_size(size),
            );
        }
    }

    pub fn sparkle(&mut self, rng: &mut impl Rng, x: f32, y: f32, count: u32, color: Color) {
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(0.3..1.2);
            let size = rng.gen_range(2.0..4.0);
            self.spawn(
                Particle::new(x, y, angle.cos() * speed, angle.sin() * speed - 1.0, color)
                    .with_life(40)
                    .with_size(size),
            );
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for p in &self.particles {
            let color = palette::with_alpha(p.color, p.alpha() * p.color.a);
            if p.round {
                canvas.fill_circle(p.x, p.y, p.size, color);
            } else {
                canvas.fill_rect(p.x.round(), p.y.round(), p.size, p.size, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::rngs::StdRng;
    use ::rand::SeedableRng;

    #[test]
    fn particles_fall_and_expire() {
        let mut system = ParticleSystem::new(16, GAMEPLAY_GRAVITY);
        system.spawn(Particle::new(0.0, 0.0, 1.0, 0.0, palette::WHITE).with_life(2));

        system.update();
        let p = system.iter().next().cloned().unwrap();
        assert_eq!(p.x, 1.0);
        assert!((p.vy - GAMEPLAY_GRAVITY).abs() < 1e-6);
        assert_eq!(p.life, 1);

        system.update();
        assert!(system.is_empty());
    }

    #[test]
    fn full_pool_evicts_oldest_first() {
        let mut system = ParticleSystem::new(3, 0.0);
        for i in 0..5 {
            system.spawn(Particle::new(i as f32, 0.0, 0.0, 0.0, palette::WHITE));
        }
        assert_eq!(system.len(), 3);
        let xs: Vec<f32> = system.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn burst_never_exceeds_capacity() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut system = ParticleSystem::new(32, GAMEPLAY_GRAVITY);
        for _ in 0..20 {
            system.heart_burst(&mut rng, 100.0, 100.0, 15);
        }
        assert_eq!(system.len(), 32);
    }

    #[test]
    fn alpha_fades_with_life() {
        let mut p = Particle::new(0.0, 0.0, 0.0, 0.0, palette::WHITE).with_life(60);
        assert_eq!(p.alpha(), 1.0);
        p.life = 30;
        assert!((p.alpha() - 0.5).abs() < 1e-6);
    }
}
