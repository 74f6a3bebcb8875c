use std::f32::consts::{PI, TAU};

use ::rand::Rng;
use serde::{Deserialize, Serialize};

use crate::palette;
use crate::particles::{Particle, ParticleSystem};

pub const CHAR_SPEED: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
}

impl DialogueLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Completed,
    NextLine,
    // reported exactly once
    Finished,
    Idle,
}

#[derive(Debug, Clone, Default)]
pub struct DialogueSystem {
    lines: Vec<DialogueLine>,
    current: usize,
    revealed: usize,
    counter: u32,
    active: bool,
}

impl DialogueSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, lines: Vec<DialogueLine>) {
        self.lines = lines;
        self.current = 0;
        self.revealed = 0;
        self.counter = 0;
        self.active = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn line(&self) -> Option<&DialogueLine> {
        if self.active {
            self.lines.get(self.current)
        } else {
            None
        }
    }

    fn line_len(&self) -> usize {
        self.line().map(|l| l.text.chars().count()).unwrap_or(0)
    }

    pub fn update(&mut self) {
        if !self.active || self.revealed >= self.line_len() {
            return;
        }
        self.counter += 1;
        if self.counter >= CHAR_SPEED {
            self.revealed += 1;
            self.counter = 0;
        }
    }

    pub fn skip(&mut self) -> Advance {
        if !self.active {
            return Advance::Idle;
        }
        if self.revealed < self.line_len() {
            self.revealed = self.line_len();
            return Advance::Completed;
        }
        self.current += 1;
        self.revealed = 0;
        self.counter = 0;
        if self.current >= self.lines.len() {
            self.active = false;
            return Advance::Finished;
        }
        Advance::NextLine
    }

    pub fn speaker(&self) -> &str {
        self.line().map(|l| l.speaker.as_str()).unwrap_or("")
    }

    pub fn displayed_text(&self) -> String {
        self.line()
            .map(|l| l.text.chars().take(self.revealed).collect())
            .unwrap_or_default()
    }

    pub fn is_text_complete(&self) -> bool {
        self.revealed >= self.line_len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftKind {
    Bouquet,
    Letter,
}

impl GiftKind {
    pub fn label(self) -> &'static str {
        match self {
            GiftKind::Bouquet => "FLOWERS",
            GiftKind::Letter => "LOVE LETTER",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gift {
    pub kind: GiftKind,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub angle: f32,
}

pub const SUMMON_DELAY: u32 = 20;
pub const SUMMON_DURATION: u32 = 60;
pub const GIFT_STAGGER: u32 = 10;

pub struct GiftReward {
    pub gifts: Vec<Gift>,
    pub showing: bool,
    pub frame: u32,
    pub summoning: bool,
}

impl Default for GiftReward {
    fn default() -> Self {
        let gift = |kind, x| Gift {
            kind,
            x,
            y: 280.0,
            scale: 0.0,
            angle: 0.0,
        };
        Self {
            gifts: vec![gift(GiftKind::Bouquet, 330.0), gift(GiftKind::Letter, 470.0)],
            showing: false,
            frame: 0,
            summoning: false,
        }
    }
}

impl GiftReward {
    pub fn show(&mut self) {
        self.showing = true;
        self.frame = 0;
        self.summoning = false;
        for gift in &mut self.gifts {
            gift.scale = 0.0;
            gift.angle = 0.0;
        }
    }

    pub fn hide(&mut self) {
        self.showing = false;
    }

    pub fn gift_progress(&self, index: usize) -> f32 {
        let delay = index as u32 * GIFT_STAGGER;
        let span = SUMMON_DURATION.saturating_sub(delay).max(1);
        let elapsed = self.frame as i64 - SUMMON_DELAY as i64 - delay as i64;
        (elapsed.max(0) as f32 / span as f32).max(0.0)
    }

    pub fn update(&mut self, rng: &mut impl Rng, particles: &mut ParticleSystem) -> bool {
        if !self.showing {
            return false;
        }
        self.frame += 1;

        let mut started = false;
        if self.frame > SUMMON_DELAY && !self.summoning {
            self.summoning = true;
            started = true;
        }
        if !self.summoning {
            return started;
        }

        for index in 0..self.gifts.len() {
            let progress = self.gift_progress(index);
            if progress <= 0.0 {
                continue;
            }
            let eased = (progress * 1.2).min(1.0);
            let gift = &mut self.gifts[index];
            gift.scale = (eased * PI).sin() * if eased > 0.8 { 0.95 } else { 1.0 };
            gift.angle = eased * 360.0;

            if progress < 0.5 && rng.gen_bool(0.3) {
                let angle = rng.gen_range(0.0..TAU);
                let speed = rng.gen_range(1.0..3.0);
                let color = if index == 0 {
                    palette::LIGHT_PINK
                } else {
                    palette::SADDLE_BROWN
                };
                particles.spawn(Particle::new(
                    gift.x,
                    gift.y,
                    angle.cos() * speed,
                    angle.sin() * speed,
                    color,
                ));
            }
        }

        started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::rngs::StdRng;
    use ::rand::SeedableRng;

    fn script() -> Vec<DialogueLine> {
        vec![DialogueLine::new("A:", "Hi"), DialogueLine::new("B:", "Bye")]
    }

    #[test]
    fn typewriter_reveals_one_char_every_two_frames() {
        let mut dialogue = DialogueSystem::new();
        dialogue.start(script());
        dialogue.update();
        assert_eq!(dialogue.displayed_text(), "");
        dialogue.update();
        assert_eq!(dialogue.displayed_text(), "H");
        dialogue.update();
        dialogue.update();
        assert_eq!(dialogue.displayed_text(), "Hi");
        assert!(dialogue.is_text_complete());
    }

    #[test]
    fn skip_completes_then_advances_then_finishes_once() {
        let mut dialogue = DialogueSystem::new();
        dialogue.start(script());
        assert_eq!(dialogue.speaker(), "A:");

        assert_eq!(dialogue.skip(), Advance::Completed);
        assert_eq!(dialogue.displayed_text(), "Hi");
        assert_eq!(dialogue.skip(), Advance::NextLine);
        assert_eq!(dialogue.speaker(), "B:");
        assert_eq!(dialogue.displayed_text(), "");

        assert_eq!(dialogue.skip(), Advance::Completed);
        assert_eq!(dialogue.skip(), Advance::Finished);
        assert!(!dialogue.is_active());
        assert_eq!(dialogue.skip(), Advance::Idle);
        assert_eq!(dialogue.speaker(), "");
    }

    #[test]
    fn empty_script_finishes_on_first_skip() {
        let mut dialogue = DialogueSystem::new();
        dialogue.start(Vec::new());
        assert!(dialogue.is_text_complete());
        assert_eq!(dialogue.skip(), Advance::Finished);
    }

    #[test]
    fn multibyte_text_reveals_by_character() {
        let mut dialogue = DialogueSystem::new();
        dialogue.start(vec![DialogueLine::new("A:", "♥x")]);
        dialogue.update();
        dialogue.update();
        assert_eq!(dialogue.displayed_text(), "♥");
    }

    #[test]
    fn gifts_summon_after_delay_and_stagger() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut particles = ParticleSystem::new(256, 0.1);
        let mut gifts = GiftReward::default();
        gifts.show();

        let mut started_at = None;
        for frame in 1..=40 {
            if gifts.update(&mut rng, &mut particles) {
                started_at = Some(frame);
            }
        }
        assert_eq!(started_at, Some(SUMMON_DELAY + 1));
        assert!(gifts.gifts[0].scale > 0.0);
        assert!(gifts.gift_progress(0) > gifts.gift_progress(1));
    }

    #[test]
    fn hidden_gifts_do_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut particles = ParticleSystem::new(256, 0.1);
        let mut gifts = GiftReward::default();
        assert!(!gifts.update(&mut rng, &mut particles));
        assert_eq!(gifts.frame, 0);
        assert!(particles.is_empty());
    }
}
