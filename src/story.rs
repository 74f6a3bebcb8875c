use std::collections::VecDeque;
use std::sync::mpsc;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::config::read_json;
use crate::dialogue::DialogueLine;
use crate::error::{ConfigError, StoryError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPrompt {
    pub title: String,
    pub message: String,
    pub action: String,
}

impl Default for RewardPrompt {
    fn default() -> Self {
        Self {
            title: "CLAIM YOUR REWARD".to_string(),
            message: "YOU RECEIVE A CHEST".to_string(),
            action: "OPEN NOW".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub yes_button: String,
    pub no_button: String,
}

impl Default for ConfirmPrompt {
    fn default() -> Self {
        Self {
            title: "OPEN THE CHEST?".to_string(),
            message: "Claim your special gift inside...".to_string(),
            yes_button: "YES, OPEN IT!".to_string(),
            no_button: "NOT YET".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardAnimations {
    // minimum frames the bouquet plays before it can be dismissed
    pub flower_duration: u32,
}

impl Default for RewardAnimations {
    fn default() -> Self {
        Self { flower_duration: 200 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenedReward {
    pub status: String,
    pub next_page: String,
    #[serde(default)]
    pub animations: RewardAnimations,
}

impl Default for OpenedReward {
    fn default() -> Self {
        Self {
            status: "success".to_string(),
            next_page: "/confession".to_string(),
            animations: RewardAnimations::default(),
        }
    }
}

pub fn default_dialogue() -> Vec<DialogueLine> {
    vec![
        DialogueLine::new("PRINCE ???:", "You did it! You saved me!"),
        DialogueLine::new("PRINCE ???:", "I knew you had it in you..."),
        DialogueLine::new("PRINCE ???:", "I have a gift for you."),
        DialogueLine::new("JACQUES:", "Please accept these tokens of my affection."),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryScript {
    pub status: String,
    pub dialogues: Vec<DialogueLine>,
    pub claim: RewardPrompt,
    pub confirm: ConfirmPrompt,
    pub open: OpenedReward,
}

impl Default for StoryScript {
    fn default() -> Self {
        Self {
            status: "success".to_string(),
            dialogues: default_dialogue(),
            claim: RewardPrompt::default(),
            confirm: ConfirmPrompt::default(),
            open: OpenedReward::default(),
        }
    }
}

pub trait StoryService: Send {
    fn start_conversation(&mut self) -> Result<Vec<DialogueLine>, StoryError>;
    fn claim_reward(&mut self) -> Result<RewardPrompt, StoryError>;
    fn confirm_reward(&mut self) -> Result<ConfirmPrompt, StoryError>;
    fn open_reward(&mut self) -> Result<OpenedReward, StoryError>;
}

pub struct ScriptedStory {
    path: String,
}

impl ScriptedStory {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn script(&self) -> Result<StoryScript, StoryError> {
        let script: StoryScript = read_json(&self.path).map_err(|e| match e {
            ConfigError::Parse { .. } => StoryError::Malformed(e.to_string()),
            _ => StoryError::Unavailable(e.to_string()),
        })?;
        if script.status != "success" {
            return Err(StoryError::Rejected(script.status));
        }
        Ok(script)
    }
}

impl StoryService for ScriptedStory {
    fn start_conversation(&mut self) -> Result<Vec<DialogueLine>, StoryError> {
        let lines = self.script()?.dialogues;
        if lines.is_empty() {
            return Err(StoryError::Malformed(format!("{} has no dialogue lines", self.path)));
        }
        Ok(lines)
    }

    fn claim_reward(&mut self) -> Result<RewardPrompt, StoryError> {
        Ok(self.script()?.claim)
    }

    fn confirm_reward(&mut self) -> Result<ConfirmPrompt, StoryError> {
        Ok(self.script()?.confirm)
    }

    fn open_reward(&mut self) -> Result<OpenedReward, StoryError> {
        let opened = self.script()?.open;
        if opened.status != "success" {
            return Err(StoryError::Rejected(opened.status));
        }
        Ok(opened)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryRequest {
    StartConversation,
    ClaimReward,
    ConfirmReward,
    OpenReward,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryReply {
    Conversation(Vec<DialogueLine>),
    Claim(RewardPrompt),
    Confirm(ConfirmPrompt),
    Opened(OpenedReward),
}

impl StoryReply {
    // built-in content for a failed request
    pub fn fallback(request: StoryRequest) -> Self {
        match request {
            StoryRequest::StartConversation => StoryReply::Conversation(default_dialogue()),
            StoryRequest::ClaimReward => StoryReply::Claim(RewardPrompt::default()),
            StoryRequest::ConfirmReward => StoryReply::Confirm(ConfirmPrompt::default()),
            StoryRequest::OpenReward => StoryReply::Opened(OpenedReward::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoryEvent {
    pub epoch: u64,
    pub request: StoryRequest,
    pub result: Result<StoryReply, StoryError>,
}

fn serve(service: &mut dyn StoryService, request: StoryRequest) -> Result<StoryReply, StoryError> {
    match request {
        StoryRequest::StartConversation => service.start_conversation().map(StoryReply::Conversation),
        StoryRequest::ClaimReward => service.claim_reward().map(StoryReply::Claim),
        StoryRequest::ConfirmReward => service.confirm_reward().map(StoryReply::Confirm),
        StoryRequest::OpenReward => service.open_reward().map(StoryReply::Opened),
    }
}

enum Transport {
    Worker {
        requests: mpsc::Sender<(u64, StoryRequest)>,
        events: mpsc::Receiver<StoryEvent>,
    },
    Inline {
        service: Box<dyn StoryService>,
        ready: VecDeque<StoryEvent>,
    },
}

pub struct StoryClient {
    transport: Transport,
}

impl StoryClient {
    pub fn spawn(mut service: Box<dyn StoryService>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<(u64, StoryRequest)>();
        let (event_tx, event_rx) = mpsc::channel::<StoryEvent>();

        thread::spawn(move || {
            while let Ok((epoch, request)) = request_rx.recv() {
                let result = serve(service.as_mut(), request);
                if event_tx.send(StoryEvent { epoch, request, result }).is_err() {
                    break;
                }
            }
            log::debug!("story worker stopped");
        });

        Self {
            transport: Transport::Worker {
                requests: request_tx,
                events: event_rx,
            },
        }
    }

    // answers on the caller's thread, delivered by the next poll
    pub fn inline(service: Box<dyn StoryService>) -> Self {
        Self {
            transport: Transport::Inline {
                service,
                ready: VecDeque::new(),
            },
        }
    }

    pub fn send(&mut self, epoch: u64, request: StoryRequest) -> Result<(), StoryError> {
        log::debug!("story request {request:?} (epoch {epoch})");
        match &mut self.transport {
            Transport::Worker { requests, .. } => requests
                .send((epoch, request))
                .map_err(|_| StoryError::Disconnected),
            Transport::Inline { service, ready } => {
                let result = serve(service.as_mut(), request);
                ready.push_back(StoryEvent { epoch, request, result });
                Ok(())
            }
        }
    }

    pub fn poll(&mut self) -> Vec<StoryEvent> {
        match &mut self.transport {
            Transport::Worker { events, .. } => {
                let mut out = Vec::new();
                while let Ok(event) = events.try_recv() {
                    out.push(event);
                }
                out
            }
            Transport::Inline { ready, .. } => ready.drain(..).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    struct Fixed;

    impl StoryService for Fixed {
        fn start_conversation(&mut self) -> Result<Vec<DialogueLine>, StoryError> {
            Ok(vec![DialogueLine::new("X:", "hello")])
        }
        fn claim_reward(&mut self) -> Result<RewardPrompt, StoryError> {
            Err(StoryError::Unavailable("offline".to_string()))
        }
        fn confirm_reward(&mut self) -> Result<ConfirmPrompt, StoryError> {
            Ok(ConfirmPrompt::default())
        }
        fn open_reward(&mut self) -> Result<OpenedReward, StoryError> {
            Ok(OpenedReward::default())
        }
    }

    #[test]
    fn inline_client_answers_on_next_poll() {
        let mut client = StoryClient::inline(Box::new(Fixed));
        client.send(4, StoryRequest::StartConversation).unwrap();
        client.send(4, StoryRequest::ClaimReward).unwrap();

        let events = client.poll();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].epoch, 4);
        assert_eq!(
            events[0].result,
            Ok(StoryReply::Conversation(vec![DialogueLine::new("X:", "hello")]))
        );
        assert!(matches!(events[1].result, Err(StoryError::Unavailable(_))));
        assert!(client.poll().is_empty());
    }

    #[test]
    fn worker_client_delivers_events() {
        let mut client = StoryClient::spawn(Box::new(Fixed));
        client.send(1, StoryRequest::OpenReward).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while events.is_empty() && Instant::now() < deadline {
            events = client.poll();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].request, StoryRequest::OpenReward);
        assert_eq!(events[0].result, Ok(StoryReply::Opened(OpenedReward::default())));
    }

    #[test]
    fn missing_script_is_unavailable() {
        let mut story = ScriptedStory::new("no/such/story.json");
        assert!(matches!(story.start_conversation(), Err(StoryError::Unavailable(_))));
    }

    #[test]
    fn default_script_parses_from_json() {
        let script: StoryScript = serde_json::from_str(
            r#"{ "dialogues": [ { "speaker": "A:", "text": "one" } ] }"#,
        )
        .unwrap();
        assert_eq!(script.dialogues.len(), 1);
        assert_eq!(script.claim, RewardPrompt::default());
        assert_eq!(script.open.next_page, "/confession");
    }

    #[test]
    fn opened_reward_reads_the_flower_duration() {
        let opened: OpenedReward = serde_json::from_str(
            r#"{ "status": "success", "next_page": "/letter",
                 "animations": { "chest_duration": 240, "flower_duration": 90 } }"#,
        )
        .unwrap();
        assert_eq!(opened.animations.flower_duration, 90);

        let bare: OpenedReward =
            serde_json::from_str(r#"{ "status": "success", "next_page": "/letter" }"#).unwrap();
        assert_eq!(bare.animations, RewardAnimations::default());
    }

    #[test]
    fn rejected_script_status_is_an_error() {
        let path = std::env::temp_dir()
            .join(format!("heart_quest_story_{}.json", std::process::id()))
            .display()
            .to_string();
        let script = StoryScript {
            status: "closed".to_string(),
            ..StoryScript::default()
        };
        std::fs::write(&path, serde_json::to_string(&script).unwrap()).unwrap();

        let mut story = ScriptedStory::new(path);
        assert_eq!(
            story.claim_reward(),
            Err(StoryError::Rejected("closed".to_string()))
        );
    }
}
