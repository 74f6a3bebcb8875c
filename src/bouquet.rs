use std::f32::consts::TAU;

use ::rand::Rng;
use macroquad::color::Color;

use crate::palette;
use crate::particles::{Particle, ParticleSystem};

pub const CENTER: (f32, f32) = (400.0, 350.0);
pub const GROWTH_PER_FRAME: f32 = 0.02;
pub const PETAL_GRAVITY: f32 = 0.05;
pub const PETAL_LIFETIME: u32 = 100;
pub const PETAL_INTERVAL: u32 = 5;
pub const PETALS_PER_BURST: u32 = 3;

pub const TITLE_AFTER: u32 = 40;
pub const TITLE_FADE_FRAMES: u32 = 30;
pub const PROMPT_AFTER: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowerKind {
    Rose,
    Tulip,
    Daisy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flower {
    pub kind: FlowerKind,
    pub x: f32,
    pub y: f32,
    pub base_y: f32,
    pub color: Color,
    pub rotation: f32,
    pub scale: f32,
    pub target_scale: f32,
    pub wobble_amount: f32,
    pub wobble_speed: f32,
}

impl Flower {
    fn new(rng: &mut impl Rng, kind: FlowerKind, x: f32, y: f32, color: Color) -> Self {
        Self {
            kind,
            x,
            y,
            base_y: y,
            color,
            rotation: rng.gen_range(0.0..TAU),
            scale: 0.0,
            target_scale: rng.gen_range(0.8..1.2),
            wobble_amount: rng.gen_range(0.0..0.05),
            wobble_speed: rng.gen_range(0.02..0.07),
        }
    }

    fn update(&mut self, rng: &mut impl Rng, frame: u32) {
        if self.scale < self.target_scale {
            self.scale = (self.scale + GROWTH_PER_FRAME).min(self.target_scale);
        }
        self.y = self.base_y + (frame as f32 * self.wobble_speed).sin() * self.wobble_amount * 20.0;
        self.rotation += 0.01 * (rng.gen::<f32>() - 0.5);
    }
}

pub struct Bouquet {
    pub flowers: Vec<Flower>,
    pub petals: ParticleSystem,
    pub frame: u32,
    continue_after: u32,
}

impl Bouquet {
    // five roses, four tulips, four daisies
    pub fn new(rng: &mut impl Rng, capacity: usize, continue_after: u32) -> Self {
        use FlowerKind::{Daisy, Rose, Tulip};
        let (cx, cy) = CENTER;

        let layout = [
            (Rose, 0.0, -50.0, palette::DEEP_PINK),
            (Rose, -30.0, -30.0, palette::HOT_PINK),
            (Rose, 30.0, -30.0, palette::DEEP_PINK),
            (Rose, -50.0, 10.0, palette::HOT_PINK),
            (Rose, 50.0, 10.0, palette::DEEP_PINK),
            (Tulip, -20.0, -60.0, palette::LIGHT_PINK),
            (Tulip, 20.0, -60.0, palette::LIGHT_PINK),
            (Tulip, -60.0, -10.0, palette::LIGHT_PINK),
            (Tulip, 60.0, -10.0, palette::LIGHT_PINK),
            (Daisy, -40.0, -40.0, palette::MISTY_ROSE),
            (Daisy, 40.0, -40.0, palette::MISTY_ROSE),
            (Daisy, -70.0, 20.0, palette::MISTY_ROSE),
            (Daisy, 70.0, 20.0, palette::MISTY_ROSE),
        ];

        let flowers = layout
            .iter()
            .map(|&(kind, dx, dy, color)| Flower::new(rng, kind, cx + dx, cy + dy, color))
            .collect();

        Self {
            flowers,
            petals: ParticleSystem::new(capacity, PETAL_GRAVITY),
            frame: 0,
            continue_after,
        }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        self.frame += 1;

        for (index, flower) in self.flowers.iter_mut().enumerate() {
            flower.update(rng, self.frame + index as u32 * 5);
        }

        if self.frame % PETAL_INTERVAL == 0 && !self.flowers.is_empty() {
            for _ in 0..PETALS_PER_BURST {
                let flower = &self.flowers[rng.gen_range(0..self.flowers.len())];
                let angle = rng.gen_range(0.0..TAU);
                let speed = rng.gen_range(1.0..3.0);
                let size = rng.gen_range(1.0..4.0);
                self.petals.spawn(
                    Particle::new(
                        flower.x,
                        flower.y,
                        angle.cos() * speed,
                        angle.sin() * speed - 1.0,
                        flower.color,
                    )
                    .with_life(PETAL_LIFETIME)
                    .with_size(size)
                    .rounded(),
                );
            }
        }

        self.petals.update();
    }

    pub fn title_alpha(&self) -> f32 {
        if self.frame <= TITLE_AFTER {
            return 0.0;
        }
        ((self.frame - TITLE_AFTER) as f32 / TITLE_FADE_FRAMES as f32).min(1.0)
    }

    pub fn prompt_visible(&self) -> bool {
        self.frame > PROMPT_AFTER && (self.frame / 20) % 2 == 0
    }

    pub fn can_continue(&self) -> bool {
        self.frame >= self.continue_after
    }
}
