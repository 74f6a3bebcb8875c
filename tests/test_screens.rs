use heart_quest::canvas::Canvas;
use heart_quest::config::GameRules;
use heart_quest::entities::LevelLayout;
use heart_quest::input::FrameInput;
use heart_quest::session::GameSession;
use heart_quest::state::GameState;
use heart_quest::story::{ScriptedStory, StoryClient};

use macroquad::color::Color;
use macroquad::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Counts shapes and keeps every string drawn.
#[derive(Default)]
struct Recorder {
    shapes: usize,
    texts: Vec<String>,
}

impl Recorder {
    fn saw(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }
}

impl Canvas for Recorder {
    fn width(&self) -> f32 {
        800.0
    }
    fn height(&self) -> f32 {
        600.0
    }
    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Color) {
        self.shapes += 1;
    }
    fn stroke_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _thickness: f32, _color: Color) {
        self.shapes += 1;
    }
    fn fill_circle(&mut self, _x: f32, _y: f32, _radius: f32, _color: Color) {
        self.shapes += 1;
    }
    fn stroke_circle(&mut self, _x: f32, _y: f32, _radius: f32, _thickness: f32, _color: Color) {
        self.shapes += 1;
    }
    fn line(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _thickness: f32, _color: Color) {
        self.shapes += 1;
    }
    fn fill_triangle(&mut self, _a: Vec2, _b: Vec2, _c: Vec2, _color: Color) {
        self.shapes += 1;
    }
    fn text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _color: Color) {
        self.texts.push(text.to_string());
    }
    fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }
}

fn make_session() -> GameSession {
    // no story file: every request falls back to the built-in script
    GameSession::new(
        GameRules::default(),
        LevelLayout::default(),
        StoryClient::inline(Box::new(ScriptedStory::new("no/such/story.json"))),
        StdRng::seed_from_u64(3),
    )
}

fn draw(session: &GameSession) -> Recorder {
    let mut canvas = Recorder::default();
    session.draw(&mut canvas);
    canvas
}

#[test]
fn start_screen_asks_for_a_codename() {
    let session = make_session();
    let canvas = draw(&session);
    assert!(canvas.saw("ENTER CODENAME"));
    assert!(canvas.shapes > 0);
}

#[test]
fn invalid_codename_is_shown() {
    let mut session = make_session();
    session.update(&FrameInput {
        typed: vec!['n', 'o'],
        confirm: true,
        ..FrameInput::default()
    });
    assert!(draw(&session).saw("INVALID CODENAME"));
}

#[test]
fn unlocked_start_screen_greets_the_player() {
    let mut session = make_session();
    session.update(&FrameInput {
        typed: "valentine".chars().collect(),
        confirm: true,
        ..FrameInput::default()
    });
    let canvas = draw(&session);
    assert!(canvas.saw("HI SWEETHEART!"));
    assert!(canvas.saw("COLLECT HEARTS"));
    assert!(canvas.saw("SAVE THE PRINCE"));
}

#[test]
fn hud_reports_score_hearts_and_lives() {
    let mut session = make_session();
    session.restart();
    session.progress_mut().score = 700;
    let canvas = draw(&session);
    assert!(canvas.saw("SCORE: 700"));
    assert!(canvas.saw("HEARTS: 0/3"));
    assert!(canvas.saw("LIVES: 3"));
}

#[test]
fn game_over_panel_is_drawn() {
    let mut session = make_session();
    session.restart();
    session.progress_mut().lives = 1;
    session.world_mut().player.y = 700.0;
    session.update(&FrameInput::default());
    assert_eq!(session.state(), GameState::GameOver);
    assert!(draw(&session).saw("GAME OVER"));
}

#[test]
fn dialogue_box_shows_the_speaker() {
    let mut session = make_session();
    session.restart();
    session.progress_mut().hearts_collected = 3;
    {
        let world = session.world_mut();
        world.flag_pole.reached = true;
        let door = world.castle.door();
        world.player.x = door.x + 5.0;
        world.player.y = door.y + 10.0;
    }
    for _ in 0..100 {
        session.update(&FrameInput::default());
    }
    assert_eq!(session.state(), GameState::Dialogue);
    assert!(draw(&session).saw(session.dialogue().speaker()));
}

#[test]
fn reward_screen_waits_for_the_chest_prompt() {
    let mut session = make_session();
    session.restart();
    session.progress_mut().hearts_collected = 3;
    {
        let world = session.world_mut();
        world.flag_pole.reached = true;
        let door = world.castle.door();
        world.player.x = door.x + 5.0;
        world.player.y = door.y + 10.0;
    }
    for _ in 0..100 {
        session.update(&FrameInput::default());
    }
    let confirm = FrameInput {
        confirm: true,
        ..FrameInput::default()
    };
    for _ in 0..50 {
        if session.state() != GameState::Dialogue {
            break;
        }
        session.update(&confirm);
    }
    assert_eq!(session.state(), GameState::VictoryScreen);
    assert!(session.reward().is_waiting());
    assert!(draw(&session).saw("PLEASE WAIT"));

    session.update(&FrameInput::default());
    let canvas = draw(&session);
    assert!(!canvas.saw("PLEASE WAIT"));
    assert!(canvas.saw("CLAIM YOUR REWARD"));
}
