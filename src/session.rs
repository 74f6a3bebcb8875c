use ::rand::rngs::StdRng;

use crate::audio::SoundCue;
use crate::bouquet::Bouquet;
use crate::canvas::Canvas;
use crate::config::GameRules;
use crate::dialogue::{Advance, DialogueSystem, GiftReward};
use crate::enemy_ai::update_enemies;
use crate::entities::{LevelLayout, World};
use crate::geometry::Bounded;
use crate::input::FrameInput;
use crate::palette;
use crate::particles::{ParticleSystem, GAMEPLAY_GRAVITY};
use crate::physics::{step_player, try_jump, MoveIntent};
use crate::progress::{
    check_goal, collect_hearts, tick_invincibility, LifeLoss, Progress, STOMP_SCORE, VICTORY_SCORE,
};
use crate::reward::{RewardFlow, RewardInput};
use crate::screens;
use crate::state::{GameState, StartScreen};
use crate::story::{OpenedReward, StoryClient, StoryEvent, StoryReply, StoryRequest};

pub const VICTORY_DELAY_FRAMES: u32 = 90;
pub const STOMP_PARTICLES: u32 = 8;
pub const HEART_PARTICLES: u32 = 15;
pub const VICTORY_PARTICLES: u32 = 50;
// the bouquet moves on to the letter by itself after about five seconds
pub const AUTO_HANDOFF_FRAMES: u32 = 300;

const HEART_FLOAT_SPEED: f32 = 0.05;
const PLAYER_SPARKLE_EVERY: u64 = 30;
const PRINCE_SPARKLE_EVERY: u64 = 35;
const HEART_SPARKLE_EVERY: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Epilogue {
    pub title: String,
    pub message: String,
    pub signature: String,
    pub next_page: String,
}

pub struct GameSession {
    rules: GameRules,
    layout: LevelLayout,
    world: World,
    progress: Progress,
    state: GameState,
    start: StartScreen,
    particles: ParticleSystem,
    dialogue: DialogueSystem,
    gifts: GiftReward,
    reward: RewardFlow,
    opened: Option<OpenedReward>,
    bouquet: Option<Bouquet>,
    epilogue: Option<Epilogue>,
    story: StoryClient,
    epoch: u64,
    conversation_requested: bool,
    frame: u64,
    state_frames: u32,
    rng: StdRng,
    cues: Vec<SoundCue>,
}

impl GameSession {
    pub fn new(rules: GameRules, layout: LevelLayout, story: StoryClient, rng: StdRng) -> Self {
        let world = World::from_layout(&layout);
        let particles = ParticleSystem::new(rules.particle_capacity, GAMEPLAY_GRAVITY);
        Self {
            rules,
            layout,
            world,
            progress: Progress::default(),
            state: GameState::Start,
            start: StartScreen::default(),
            particles,
            dialogue: DialogueSystem::new(),
            gifts: GiftReward::default(),
            reward: RewardFlow::default(),
            opened: None,
            bouquet: None,
            epilogue: None,
            story,
            epoch: 0,
            conversation_requested: false,
            frame: 0,
            state_frames: 0,
            rng,
            cues: Vec::new(),
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn start_screen(&self) -> &StartScreen {
        &self.start
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn dialogue(&self) -> &DialogueSystem {
        &self.dialogue
    }

    pub fn gifts(&self) -> &GiftReward {
        &self.gifts
    }

    pub fn reward(&self) -> &RewardFlow {
        &self.reward
    }

    pub fn bouquet(&self) -> Option<&Bouquet> {
        self.bouquet.as_ref()
    }

    pub fn opened_reward(&self) -> Option<&OpenedReward> {
        self.opened.as_ref()
    }

    pub fn epilogue(&self) -> Option<&Epilogue> {
        self.epilogue.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn state_frames(&self) -> u32 {
        self.state_frames
    }

    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    fn set_state(&mut self, next: GameState) {
        if next != self.state {
            log::info!("state {} -> {}", self.state, next);
        }
        self.state = next;
        self.state_frames = 0;
    }

    // story answers still in flight belong to the old epoch and get dropped
    pub fn restart(&mut self) {
        self.world = World::from_layout(&self.layout);
        self.progress = Progress::default();
        self.particles.clear();
        self.dialogue.clear();
        self.gifts = GiftReward::default();
        self.reward.reset();
        self.opened = None;
        self.bouquet = None;
        self.epilogue = None;
        self.conversation_requested = false;
        self.epoch += 1;
        log::info!("level reset (epoch {})", self.epoch);
        self.set_state(GameState::Playing);
    }

    pub fn update(&mut self, input: &FrameInput) {
        self.frame += 1;
        self.state_frames += 1;

        for event in self.story.poll() {
            self.handle_story_event(event);
        }

        match self.state {
            GameState::Start => self.update_start(input),
            GameState::Playing => self.update_playing(input),
            GameState::GameOver => {
                if input.advance() {
                    self.restart();
                }
            }
            GameState::Victory => self.update_victory(),
            GameState::Dialogue => self.update_dialogue(input),
            GameState::VictoryScreen => self.update_victory_screen(input),
            GameState::FlowerBouquet => self.update_bouquet(input),
        }

        if self.state != GameState::FlowerBouquet {
            let width = self.world.canvas_width;
            for cloud in &mut self.world.clouds {
                cloud.drift(width);
            }
        }
        self.particles.update();
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        screens::draw_session(canvas, self);
    }

    fn update_start(&mut self, input: &FrameInput) {
        if self.start.unlocked {
            if input.advance() {
                self.restart();
            }
            return;
        }

        for &c in &input.typed {
            self.start.type_char(c);
        }
        if input.backspace {
            self.start.backspace();
        }
        if input.confirm {
            match self.start.submit(&self.rules.codename) {
                Ok(()) => log::info!("codename accepted"),
                Err(e) => log::info!("codename rejected: {e}"),
            }
        }
    }

    fn update_playing(&mut self, input: &FrameInput) {
        if input.jump && try_jump(&mut self.world.player) {
            self.cues.push(SoundCue::Jump);
        }

        let intent = MoveIntent {
            left: input.left,
            right: input.right,
        };
        let step = step_player(
            &mut self.world.player,
            intent,
            &self.world.platforms,
            self.world.canvas_width,
            self.world.canvas_height,
            self.frame,
        );
        tick_invincibility(&mut self.world.player);
        self.world.player.blink.tick();
        self.world.prince.tick_idle();
        self.world.prince.blink.tick();

        let contacts = update_enemies(
            &mut self.world.enemies,
            &self.world.platforms,
            &mut self.world.player,
            self.world.canvas_width,
        );
        for &index in &contacts.stomped {
            let (cx, cy) = self.world.enemies[index].midpoint();
            self.progress.score += STOMP_SCORE;
            self.particles.heart_burst(&mut self.rng, cx, cy, STOMP_PARTICLES);
            self.cues.push(SoundCue::Stomp);
        }

        for index in collect_hearts(&mut self.world, &mut self.progress) {
            let (cx, cy) = self.world.hearts[index].midpoint();
            self.particles.heart_burst(&mut self.rng, cx, cy, HEART_PARTICLES);
            self.cues.push(SoundCue::Collect);
            log::info!("heart collected ({}/{})", self.progress.hearts_collected, self.world.hearts.len());
        }
        for heart in &mut self.world.hearts {
            heart.float_phase += HEART_FLOAT_SPEED;
        }

        self.ambient_sparkles();

        if step.fell_off || contacts.side_hit {
            self.lose_life(if step.fell_off { "fell" } else { "guard" });
            return;
        }

        if check_goal(&mut self.world, &self.progress) {
            self.win();
        }
    }

    fn ambient_sparkles(&mut self) {
        let frame = self.frame;
        if frame % PLAYER_SPARKLE_EVERY == 0 {
            let (x, y) = self.world.player.midpoint();
            self.particles.sparkle(&mut self.rng, x, y, 1, palette::HOT_PINK);
        }
        if frame % PRINCE_SPARKLE_EVERY == 0 {
            let (x, y) = self.world.prince.midpoint();
            self.particles.sparkle(&mut self.rng, x, y, 1, palette::GOLD);
        }
        if frame % HEART_SPARKLE_EVERY == 0 {
            for heart in self.world.hearts.iter().filter(|h| !h.collected) {
                let (x, y) = heart.midpoint();
                self.particles.sparkle(&mut self.rng, x, y + heart.bob_offset(), 2, palette::LIGHT_PINK);
            }
        }
    }

    fn lose_life(&mut self, cause: &str) {
        self.cues.push(SoundCue::Hit);
        match self.progress.lose_life(&mut self.world) {
            LifeLoss::Respawned => {
                log::info!("life lost ({cause}), {} left", self.progress.lives);
            }
            LifeLoss::GameOver => {
                log::info!("last life lost ({cause}), final score {}", self.progress.score);
                self.cues.push(SoundCue::GameOver);
                self.set_state(GameState::GameOver);
            }
        }
    }

    fn win(&mut self) {
        self.progress.score += VICTORY_SCORE;
        let (cx, cy) = self.world.player.midpoint();
        self.particles.radial_burst(
            &mut self.rng,
            cx,
            cy,
            VICTORY_PARTICLES,
            (2.0, 7.0),
            3.0,
            palette::DEEP_PINK,
        );
        self.cues.push(SoundCue::Victory);
        log::info!("castle reached, score {}", self.progress.score);
        self.set_state(GameState::Victory);
    }

    fn update_victory(&mut self) {
        self.world.player.blink.tick();
        self.world.prince.tick_idle();
        self.world.prince.blink.tick();
        if self.world.flag_pole.reached {
            self.world.flag_pole.lower_flag();
        }

        if self.state_frames >= VICTORY_DELAY_FRAMES && !self.conversation_requested {
            self.conversation_requested = true;
            self.request(StoryRequest::StartConversation);
        }
    }

    fn update_dialogue(&mut self, input: &FrameInput) {
        self.dialogue.update();
        if self.gifts.update(&mut self.rng, &mut self.particles) {
            self.cues.push(SoundCue::Summon);
        }

        if input.advance() && self.dialogue.skip() == Advance::Finished {
            log::info!("dialogue finished");
            self.set_state(GameState::VictoryScreen);
            let request = self.reward.begin();
            self.request(request);
        }
    }

    fn update_victory_screen(&mut self, input: &FrameInput) {
        self.gifts.update(&mut self.rng, &mut self.particles);

        let choice = if input.accept || input.confirm || input.click {
            Some(RewardInput::Accept)
        } else if input.decline {
            Some(RewardInput::Decline)
        } else {
            None
        };
        if let Some(choice) = choice {
            if let Some(request) = self.reward.input(choice, &mut self.rng) {
                self.request(request);
            }
        }
    }

    fn update_bouquet(&mut self, input: &FrameInput) {
        if self.epilogue.is_some() {
            return;
        }
        let Some(bouquet) = self.bouquet.as_mut() else {
            return;
        };
        bouquet.update(&mut self.rng);
        if !bouquet.can_continue() {
            return;
        }
        let timed_out = bouquet.frame >= AUTO_HANDOFF_FRAMES;

        if input.confirm || input.click {
            self.show_epilogue();
        } else if timed_out {
            log::debug!("bouquet timed out, moving on");
            self.show_epilogue();
        }
    }

    fn show_epilogue(&mut self) {
        let next_page = self
            .opened
            .as_ref()
            .map(|o| o.next_page.clone())
            .unwrap_or_default();
        log::info!("presentation complete, next destination {next_page}");
        self.epilogue = Some(Epilogue {
            title: self.rules.confession_title.clone(),
            message: self.rules.confession_text.clone(),
            signature: self.rules.signature.clone(),
            next_page,
        });
    }

    fn request(&mut self, request: StoryRequest) {
        if let Err(e) = self.story.send(self.epoch, request) {
            log::error!("story request {request:?} failed: {e}. Using built-in content.");
            self.apply_reply(StoryReply::fallback(request));
        }
    }

    fn handle_story_event(&mut self, event: StoryEvent) {
        if event.epoch != self.epoch {
            log::debug!(
                "discarding stale story answer to {:?} (epoch {} != {})",
                event.request,
                event.epoch,
                self.epoch
            );
            return;
        }
        let reply = match event.result {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("story request {:?} failed: {e}. Using built-in content.", event.request);
                StoryReply::fallback(event.request)
            }
        };
        self.apply_reply(reply);
    }

    fn apply_reply(&mut self, reply: StoryReply) {
        match reply {
            StoryReply::Conversation(lines) => {
                if self.state != GameState::Victory {
                    log::warn!("conversation arrived in state {}; ignored", self.state);
                    return;
                }
                log::info!("conversation started ({} lines)", lines.len());
                self.dialogue.start(lines);
                self.gifts.show();
                self.set_state(GameState::Dialogue);
            }
            reply => {
                if self.state != GameState::VictoryScreen {
                    log::warn!("reward answer arrived in state {}; ignored", self.state);
                    return;
                }
                if let Some(opened) = self.reward.receive(reply) {
                    log::info!("chest opened, next destination {}", opened.next_page);
                    self.gifts.hide();
                    self.particles.clear();
                    self.bouquet = Some(Bouquet::new(
                        &mut self.rng,
                        self.rules.particle_capacity,
                        opened.animations.flower_duration,
                    ));
                    self.opened = Some(opened);
                    self.set_state(GameState::FlowerBouquet);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::DialogueLine;
    use crate::error::StoryError;
    use crate::story::{ConfirmPrompt, RewardPrompt, StoryService};
    use ::rand::SeedableRng;

    struct Offline;

    impl StoryService for Offline {
        fn start_conversation(&mut self) -> Result<Vec<DialogueLine>, StoryError> {
            Err(StoryError::Unavailable("offline".to_string()))
        }
        fn claim_reward(&mut self) -> Result<RewardPrompt, StoryError> {
            Err(StoryError::Unavailable("offline".to_string()))
        }
        fn confirm_reward(&mut self) -> Result<ConfirmPrompt, StoryError> {
            Err(StoryError::Unavailable("offline".to_string()))
        }
        fn open_reward(&mut self) -> Result<OpenedReward, StoryError> {
            Err(StoryError::Unavailable("offline".to_string()))
        }
    }

    fn session() -> GameSession {
        GameSession::new(
            GameRules::default(),
            LevelLayout::default(),
            StoryClient::inline(Box::new(Offline)),
            StdRng::seed_from_u64(1),
        )
    }

    #[test]
    fn starts_locked_on_the_start_screen() {
        let mut session = session();
        session.update(&FrameInput {
            confirm: true,
            ..FrameInput::default()
        });
        assert_eq!(session.state(), GameState::Start);
        assert!(session.start_screen().error.is_some());
    }

    #[test]
    fn restart_moves_the_epoch_on() {
        let mut session = session();
        session.restart();
        session.restart();
        assert_eq!(session.epoch(), 2);
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.state_frames(), 0);
    }

    #[test]
    fn cues_are_drained_once() {
        let mut session = session();
        session.restart();
        session.world_mut().player.grounded = true;
        session.update(&FrameInput {
            jump: true,
            ..FrameInput::default()
        });
        assert_eq!(session.drain_cues(), vec![SoundCue::Jump]);
        assert!(session.drain_cues().is_empty());
    }
}
