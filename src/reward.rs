use ::rand::Rng;

use crate::story::{ConfirmPrompt, OpenedReward, RewardPrompt, StoryReply, StoryRequest};

pub const DODGE_RANGE: f32 = 150.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RewardStage {
    #[default]
    Idle,
    AwaitingClaim,
    ChestPrompt {
        prompt: RewardPrompt,
        close_offset: (f32, f32),
    },
    AwaitingConfirm,
    ConfirmDialog {
        prompt: ConfirmPrompt,
        no_offset: (f32, f32),
    },
    AwaitingOpen,
    Opened(OpenedReward),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardInput {
    Accept,
    Decline,
}

#[derive(Debug, Clone, Default)]
pub struct RewardFlow {
    pub stage: RewardStage,
    pub dodges: u32,
}

fn dodge(rng: &mut impl Rng) -> (f32, f32) {
    (
        rng.gen_range(-DODGE_RANGE..DODGE_RANGE),
        rng.gen_range(-DODGE_RANGE..DODGE_RANGE),
    )
}

impl RewardFlow {
    pub fn begin(&mut self) -> StoryRequest {
        self.stage = RewardStage::AwaitingClaim;
        self.dodges = 0;
        StoryRequest::ClaimReward
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_waiting(&self) -> bool {
        matches!(
            self.stage,
            RewardStage::AwaitingClaim | RewardStage::AwaitingConfirm | RewardStage::AwaitingOpen
        )
    }

    pub fn input(&mut self, input: RewardInput, rng: &mut impl Rng) -> Option<StoryRequest> {
        match (&mut self.stage, input) {
            (RewardStage::ChestPrompt { .. }, RewardInput::Accept) => {
                self.stage = RewardStage::AwaitingConfirm;
                Some(StoryRequest::ConfirmReward)
            }
            (RewardStage::ChestPrompt { close_offset, .. }, RewardInput::Decline) => {
                *close_offset = dodge(rng);
                self.dodges += 1;
                None
            }
            (RewardStage::ConfirmDialog { .. }, RewardInput::Accept) => {
                self.stage = RewardStage::AwaitingOpen;
                Some(StoryRequest::OpenReward)
            }
            (RewardStage::ConfirmDialog { no_offset, .. }, RewardInput::Decline) => {
                *no_offset = dodge(rng);
                self.dodges += 1;
                None
            }
            _ => None,
        }
    }

    // replies the flow is not waiting for are dropped
    pub fn receive(&mut self, reply: StoryReply) -> Option<OpenedReward> {
        match (std::mem::take(&mut self.stage), reply) {
            (RewardStage::AwaitingClaim, StoryReply::Claim(prompt)) => {
                self.stage = RewardStage::ChestPrompt {
                    prompt,
                    close_offset: (0.0, 0.0),
                };
                None
            }
            (RewardStage::AwaitingConfirm, StoryReply::Confirm(prompt)) => {
                self.stage = RewardStage::ConfirmDialog {
                    prompt,
                    no_offset: (0.0, 0.0),
                };
                None
            }
            (RewardStage::AwaitingOpen, StoryReply::Opened(opened)) => {
                self.stage = RewardStage::Opened(opened.clone());
                Some(opened)
            }
            (stage, reply) => {
                log::warn!("ignoring story reply {reply:?} while in {stage:?}");
                self.stage = stage;
                None
            }
        }
    }
}
