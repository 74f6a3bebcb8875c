use macroquad::color::Color;
use macroquad::math::vec2;

use crate::art;
use crate::bouquet::Bouquet;
use crate::canvas::{text_centered, vertical_gradient, wrap_text, Canvas};
use crate::dialogue::{DialogueSystem, GiftKind, GiftReward, SUMMON_DELAY};
use crate::palette::{self, with_alpha};
use crate::progress::{player_visible, HEARTS_TO_WIN};
use crate::reward::{RewardFlow, RewardStage};
use crate::session::{Epilogue, GameSession};
use crate::state::{GameState, StartScreen};

const DIALOGUE_BOX_HEIGHT: f32 = 140.0;
const PORTAL_CENTER: (f32, f32) = (400.0, 280.0);
const STAR_COUNT: u32 = 50;

pub fn draw_session(canvas: &mut dyn Canvas, session: &GameSession) {
    match session.state() {
        GameState::Start => {
            draw_scenery(canvas, session);
            draw_start(canvas, session.start_screen(), session);
        }
        GameState::Playing => {
            draw_world(canvas, session);
            draw_hud(canvas, session);
            draw_progress_bar(canvas, session);
        }
        GameState::GameOver => {
            draw_world(canvas, session);
            draw_hud(canvas, session);
            draw_game_over(canvas, session);
        }
        GameState::Victory => {
            draw_world(canvas, session);
            draw_hud(canvas, session);
            draw_love_hearts(canvas, session);
        }
        GameState::Dialogue => {
            draw_world(canvas, session);
            dim(canvas);
            draw_gifts(canvas, session.gifts(), session.frame());
            draw_dialogue_box(canvas, session.dialogue(), session.frame());
        }
        GameState::VictoryScreen => {
            draw_world(canvas, session);
            dim(canvas);
            draw_gifts(canvas, session.gifts(), session.frame());
            draw_reward(canvas, session.reward(), session.frame());
        }
        GameState::FlowerBouquet => match (session.epilogue(), session.bouquet()) {
            (Some(epilogue), _) => draw_epilogue(canvas, epilogue),
            (None, Some(bouquet)) => draw_bouquet(canvas, bouquet),
            (None, None) => draw_night(canvas, session.frame()),
        },
    }
}

fn draw_scenery(canvas: &mut dyn Canvas, session: &GameSession) {
    art::draw_sky(canvas);
    for cloud in &session.world().clouds {
        art::draw_cloud(canvas, cloud);
    }
}

fn draw_world(canvas: &mut dyn Canvas, session: &GameSession) {
    let world = session.world();
    draw_scenery(canvas, session);

    for platform in &world.platforms {
        art::draw_platform(canvas, platform);
    }
    art::draw_castle(canvas, &world.castle, world.flag_pole.reached);
    art::draw_flag_pole(canvas, &world.flag_pole);
    art::draw_prince(canvas, &world.prince);
    for enemy in &world.enemies {
        art::draw_enemy(canvas, enemy, session.frame());
    }
    for heart in &world.hearts {
        art::draw_heart(canvas, heart);
    }
    if player_visible(&world.player) {
        art::draw_player(canvas, &world.player, session.frame());
    }
    session.particles().draw(canvas);
}

fn dim(canvas: &mut dyn Canvas) {
    let (w, h) = (canvas.width(), canvas.height());
    canvas.fill_rect(0.0, 0.0, w, h, palette::FOCUS_DIM);
}

fn panel(canvas: &mut dyn Canvas, x: f32, y: f32, w: f32, h: f32) {
    canvas.fill_rect(x, y, w, h, palette::PANEL);
    canvas.stroke_rect(x, y, w, h, 3.0, palette::GOLD);
}

fn draw_start(canvas: &mut dyn Canvas, start: &StartScreen, session: &GameSession) {
    let cx = canvas.width() * 0.5;
    panel(canvas, cx - 220.0, 140.0, 440.0, 300.0);

    if !start.unlocked {
        text_centered(canvas, "ENTER CODENAME", cx, 210.0, 28.0, palette::GOLD);

        canvas.fill_rect(cx - 140.0, 240.0, 280.0, 40.0, palette::WHITE);
        canvas.stroke_rect(cx - 140.0, 240.0, 280.0, 40.0, 2.0, palette::HOT_PINK);
        let caret = if (session.frame() / 30) % 2 == 0 { "_" } else { "" };
        let typed = format!("{}{caret}", start.input);
        text_centered(canvas, &typed, cx, 268.0, 26.0, palette::BLACK);

        if let Some(error) = &start.error {
            text_centered(canvas, &error.to_string(), cx, 320.0, 22.0, palette::CRIMSON);
        }
        text_centered(canvas, "Type, then press ENTER", cx, 410.0, 18.0, palette::LIGHT_PINK);
        return;
    }

    let greeting = format!("HI {}!", session.rules().greeting_name);
    text_centered(canvas, &greeting, cx, 200.0, 34.0, palette::HOT_PINK);
    text_centered(canvas, "PLEASE PLAY THIS.", cx, 240.0, 22.0, palette::WHITE);

    art::heart_shape(canvas, cx - 110.0, 290.0, 12.0, palette::DEEP_PINK);
    canvas.text("COLLECT HEARTS", cx - 90.0, 298.0, 22.0, palette::WHITE);
    art::heart_shape(canvas, cx - 110.0, 330.0, 12.0, palette::GOLD);
    canvas.text("SAVE THE PRINCE", cx - 90.0, 338.0, 22.0, palette::WHITE);

    if (session.frame() / 30) % 2 == 0 {
        text_centered(canvas, "PRESS ENTER TO START", cx, 410.0, 20.0, palette::GOLD);
    }
}

fn draw_hud(canvas: &mut dyn Canvas, session: &GameSession) {
    let progress = session.progress();
    let hud = format!(
        "SCORE: {}   HEARTS: {}/{}   LIVES: {}",
        progress.score, progress.hearts_collected, HEARTS_TO_WIN, progress.lives
    );
    canvas.fill_rect(8.0, 8.0, canvas.measure_text(&hud, 20.0) + 16.0, 30.0, palette::SHADOW);
    canvas.text(&hud, 16.0, 29.0, 20.0, palette::WHITE);
}

fn draw_progress_bar(canvas: &mut dyn Canvas, session: &GameSession) {
    let world = session.world();
    let y = canvas.height() - 30.0;
    let span = (world.castle.x - 50.0).max(1.0);
    let filled = (world.player.x / span * 200.0).clamp(0.0, 200.0);

    canvas.fill_rect(10.0, y, 200.0, 20.0, Color::new(0.0, 0.0, 0.0, 0.7));
    canvas.fill_rect(10.0, y, filled, 20.0, palette::GOLD);
    canvas.stroke_rect(10.0, y, 200.0, 20.0, 2.0, palette::WHITE);
    canvas.fill_rect(220.0, y + 6.0, 12.0, 14.0, palette::STONE);
    canvas.fill_rect(218.0, y + 2.0, 4.0, 4.0, palette::STONE);
    canvas.fill_rect(230.0, y + 2.0, 4.0, 4.0, palette::STONE);
}

fn draw_game_over(canvas: &mut dyn Canvas, session: &GameSession) {
    let (w, h) = (canvas.width(), canvas.height());
    canvas.fill_rect(0.0, 0.0, w, h, with_alpha(palette::BLACK, 0.6));
    panel(canvas, w * 0.5 - 200.0, h * 0.5 - 90.0, 400.0, 180.0);
    text_centered(canvas, "GAME OVER", w * 0.5, h * 0.5 - 30.0, 40.0, palette::CRIMSON);
    let score = format!("SCORE: {}", session.progress().score);
    text_centered(canvas, &score, w * 0.5, h * 0.5 + 10.0, 22.0, palette::WHITE);
    text_centered(canvas, "PRESS ENTER TO TRY AGAIN", w * 0.5, h * 0.5 + 55.0, 18.0, palette::GOLD);
}

fn draw_love_hearts(canvas: &mut dyn Canvas, session: &GameSession) {
    let world = session.world();
    let bob = (session.frame() as f32 * 0.1).sin() * 3.0;
    for (x, y) in [(world.player.x, world.player.y), (world.prince.x, world.prince.y)] {
        art::heart_shape(canvas, x + 8.0, y - 20.0 + bob, 12.0, palette::DEEP_PINK);
    }
}

fn draw_portal(canvas: &mut dyn Canvas, gifts: &GiftReward, frame: u64) {
    let progress = ((gifts.frame as f32 - SUMMON_DELAY as f32) / 30.0).clamp(0.0, 1.0);
    let (cx, cy) = PORTAL_CENTER;
    let pixel = 8.0;

    for ring in 0..3 {
        let radius = 40.0 + ring as f32 * 30.0;
        let alpha = (1.0 - progress) * (0.6 - ring as f32 * 0.15);
        if alpha <= 0.0 {
            continue;
        }
        let color = if ring == 0 { palette::LIGHT_PINK } else { palette::GOLD };
        let rotation = frame as f32 * 0.1 + ring as f32 * (std::f32::consts::PI / 1.5);
        let segments = (radius * std::f32::consts::TAU / pixel).ceil() as u32;

        // snapped to an 8px grid for the blocky look
        let point = |i: u32| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU + rotation;
            (
                ((cx + angle.cos() * radius) / pixel).round() * pixel,
                ((cy + angle.sin() * radius) / pixel).round() * pixel,
            )
        };
        for i in 0..segments {
            let (x1, y1) = point(i);
            let (x2, y2) = point((i + 1) % segments);
            canvas.line(x1, y1, x2, y2, 2.0, with_alpha(color, alpha));
        }
    }
}

fn draw_gifts(canvas: &mut dyn Canvas, gifts: &GiftReward, frame: u64) {
    if !gifts.showing {
        return;
    }
    if gifts.summoning {
        draw_portal(canvas, gifts, frame);
    }

    for gift in gifts.gifts.iter().filter(|g| g.scale > 0.0) {
        let angle = gift.angle.to_radians();
        if gift.scale > 0.5 {
            canvas.fill_circle(gift.x, gift.y, 40.0 * gift.scale, with_alpha(palette::LIGHT_PINK, 0.2));
        }
        match gift.kind {
            GiftKind::Bouquet => art::draw_posy(canvas, gift.x, gift.y, gift.scale * 1.5, angle),
            GiftKind::Letter => art::draw_letter(canvas, gift.x, gift.y, gift.scale * 1.5, angle),
        }
        if gift.scale > 0.8 {
            text_centered(canvas, gift.kind.label(), gift.x, gift.y + 60.0, 16.0, palette::WHITE);
        }
    }
}

fn draw_dialogue_box(canvas: &mut dyn Canvas, dialogue: &DialogueSystem, frame: u64) {
    if !dialogue.is_active() {
        return;
    }
    let (w, h) = (canvas.width(), canvas.height());
    let box_y = h - 150.0;
    let text_x = 35.0;

    canvas.fill_rect(10.0, box_y, w - 20.0, DIALOGUE_BOX_HEIGHT, palette::PANEL);
    canvas.stroke_rect(10.0, box_y, w - 20.0, DIALOGUE_BOX_HEIGHT, 3.0, palette::GOLD);
    canvas.text(dialogue.speaker(), text_x, box_y + 28.0, 22.0, palette::GOLD);

    let text = dialogue.displayed_text();
    for (i, line) in wrap_text(canvas, &text, 18.0, w - 80.0).iter().enumerate() {
        canvas.text(line, text_x, box_y + 55.0 + i as f32 * 20.0, 18.0, palette::WHITE);
    }

    if dialogue.is_text_complete() && (frame / 15) % 2 == 0 {
        let (cx, y) = (w * 0.5, h - 26.0);
        canvas.fill_triangle(
            vec2(cx - 7.0, y),
            vec2(cx + 7.0, y),
            vec2(cx, y + 10.0),
            palette::GOLD,
        );
    }
}

fn button(canvas: &mut dyn Canvas, label: &str, cx: f32, cy: f32, fill: Color) {
    let w = canvas.measure_text(label, 18.0) + 30.0;
    canvas.fill_rect(cx - w * 0.5, cy - 18.0, w, 36.0, fill);
    canvas.stroke_rect(cx - w * 0.5, cy - 18.0, w, 36.0, 2.0, palette::WHITE);
    text_centered(canvas, label, cx, cy + 6.0, 18.0, palette::WHITE);
}

fn prompt_body(canvas: &mut dyn Canvas, title: &str, message: &str, top: f32) {
    let cx = canvas.width() * 0.5;
    text_centered(canvas, title, cx, top + 40.0, 26.0, palette::GOLD);
    for (i, line) in wrap_text(canvas, message, 18.0, 380.0).iter().enumerate() {
        text_centered(canvas, line, cx, top + 80.0 + i as f32 * 22.0, 18.0, palette::WHITE);
    }
}

fn draw_reward(canvas: &mut dyn Canvas, reward: &RewardFlow, frame: u64) {
    let cx = canvas.width() * 0.5;
    let top = 120.0;

    if reward.is_waiting() {
        let dots = ".".repeat((frame / 20 % 4) as usize);
        text_centered(canvas, &format!("PLEASE WAIT{dots}"), cx, 480.0, 20.0, palette::LIGHT_PINK);
        return;
    }

    match &reward.stage {
        RewardStage::ChestPrompt { prompt, close_offset } => {
            panel(canvas, cx - 220.0, top, 440.0, 340.0);
            prompt_body(canvas, &prompt.title, &prompt.message, top);
            art::draw_chest(canvas, cx, top + 200.0, frame);
            button(canvas, &format!("[Y] {}", prompt.action), cx - 80.0, top + 295.0, palette::DEEP_PINK);
            button(
                canvas,
                "[N] CLOSE",
                cx + 90.0 + close_offset.0,
                top + 295.0 + close_offset.1,
                palette::STONE_DARK,
            );
        }
        RewardStage::ConfirmDialog { prompt, no_offset } => {
            panel(canvas, cx - 220.0, top + 40.0, 440.0, 260.0);
            prompt_body(canvas, &prompt.title, &prompt.message, top + 40.0);
            button(canvas, &format!("[Y] {}", prompt.yes_button), cx - 90.0, top + 250.0, palette::DEEP_PINK);
            button(
                canvas,
                &format!("[N] {}", prompt.no_button),
                cx + 90.0 + no_offset.0,
                top + 250.0 + no_offset.1,
                palette::STONE_DARK,
            );
        }
        _ => {}
    }
}

fn draw_night(canvas: &mut dyn Canvas, frame: u64) {
    let (w, h) = (canvas.width(), canvas.height());
    vertical_gradient(canvas, 0.0, 0.0, w, h, palette::NIGHT_TOP, palette::NIGHT_BOTTOM, 24);
    for i in 0..STAR_COUNT {
        let x = (i * 157 + 31) as f32 % w;
        let y = (i * 97 + 17) as f32 % h;
        let twinkle = ((frame as f32 * 0.05) + i as f32).sin() * 0.5 + 0.5;
        canvas.fill_rect(x, y, 2.0, 2.0, with_alpha(palette::WHITE, 0.3 + 0.7 * twinkle));
    }
}

fn draw_bouquet(canvas: &mut dyn Canvas, bouquet: &Bouquet) {
    draw_night(canvas, bouquet.frame as u64);
    let cx = canvas.width() * 0.5;

    for flower in &bouquet.flowers {
        art::draw_flower(canvas, flower);
    }
    bouquet.petals.draw(canvas);

    let alpha = bouquet.title_alpha();
    if alpha > 0.0 {
        text_centered(canvas, "HAPPY VALENTINE'S DAY", cx, 80.0, 34.0, with_alpha(palette::LIGHT_PINK, alpha));
    }
    if bouquet.prompt_visible() {
        text_centered(canvas, "PRESS ENTER", cx, 550.0, 22.0, palette::GOLD);
    }
}

fn draw_epilogue(canvas: &mut dyn Canvas, epilogue: &Epilogue) {
    let (w, h) = (canvas.width(), canvas.height());
    vertical_gradient(canvas, 0.0, 0.0, w, h, palette::NIGHT_TOP, palette::NIGHT_BOTTOM, 24);

    let (x, y, pw, ph) = (100.0, 60.0, w - 200.0, h - 120.0);
    canvas.fill_rect(x + 6.0, y + 6.0, pw, ph, palette::SHADOW);
    canvas.fill_rect(x, y, pw, ph, palette::MISTY_ROSE);
    canvas.stroke_rect(x, y, pw, ph, 3.0, palette::VIOLET_RED);

    canvas.text(&epilogue.title, x + 30.0, y + 50.0, 28.0, palette::VIOLET_RED);
    let mut line_y = y + 95.0;
    for line in wrap_text(canvas, &epilogue.message, 20.0, pw - 60.0) {
        canvas.text(&line, x + 30.0, line_y, 20.0, palette::DARK_RED);
        line_y += 26.0;
    }
    canvas.text(&epilogue.signature, x + pw - 230.0, y + ph - 50.0, 22.0, palette::VIOLET_RED);
    art::heart_shape(canvas, x + pw - 40.0, y + ph - 58.0, 12.0, palette::DEEP_PINK);

    if !epilogue.next_page.is_empty() {
        let next = format!("next: {}", epilogue.next_page);
        text_centered(canvas, &next, w * 0.5, h - 20.0, 16.0, palette::LIGHT_PINK);
    }
}
