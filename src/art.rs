use std::f32::consts::TAU;

use macroquad::color::Color;
use macroquad::math::vec2;

use crate::bouquet::{Flower, FlowerKind};
use crate::canvas::{rotate_about, vertical_gradient, Canvas};
use crate::entities::{Castle, Cloud, Enemy, Facing, FlagPole, Heart, Platform, PlatformKind, Player, Prince};
use crate::palette::{self, with_alpha};

struct Pixels<'a> {
    canvas: &'a mut dyn Canvas,
    x: f32,
    y: f32,
    unit: f32,
    cells: f32,
    mirror: bool,
}

impl<'a> Pixels<'a> {
    fn new(canvas: &'a mut dyn Canvas, x: f32, y: f32, unit: f32, cells: f32) -> Self {
        Self {
            canvas,
            x: x.round(),
            y: y.round(),
            unit,
            cells,
            mirror: false,
        }
    }

    fn facing(mut self, facing: Facing) -> Self {
        self.mirror = facing == Facing::Left;
        self
    }

    fn cell(&mut self, cx: f32, cy: f32, cw: f32, ch: f32, color: Color) {
        let cx = if self.mirror { self.cells - cx - cw } else { cx };
        self.canvas.fill_rect(
            self.x + cx * self.unit,
            self.y + cy * self.unit,
            cw * self.unit,
            ch * self.unit,
            color,
        );
    }
}

pub fn draw_sky(canvas: &mut dyn Canvas) {
    let (w, h) = (canvas.width(), canvas.height());
    let horizon = h * 0.7;
    vertical_gradient(canvas, 0.0, 0.0, w, horizon, palette::SKY_TOP, palette::SKY_BOTTOM, 24);
    vertical_gradient(
        canvas,
        0.0,
        horizon,
        w,
        h - horizon,
        palette::BRICK_WALL_TOP,
        palette::BRICK_WALL_BOTTOM,
        12,
    );

    const BRICK_W: f32 = 35.0;
    const BRICK_H: f32 = 22.0;
    let rows = ((h - horizon) / BRICK_H).ceil() as i32 + 1;
    let cols = ((w + BRICK_W) / BRICK_W).ceil() as i32;
    for row in 0..rows {
        let offset = (row % 2) as f32 * BRICK_W / 2.0;
        for col in -1..cols {
            let x = col as f32 * BRICK_W + offset;
            let y = horizon + row as f32 * BRICK_H;
            let shade = if (row + col) % 2 == 0 {
                Color::new(0.0, 0.0, 0.0, 0.08)
            } else {
                Color::new(1.0, 1.0, 1.0, 0.04)
            };
            canvas.fill_rect(x + 1.0, y + 1.0, BRICK_W - 2.0, BRICK_H - 2.0, shade);
            canvas.stroke_rect(x, y, BRICK_W, BRICK_H, 1.5, palette::SADDLE_BROWN);
        }
    }
}

pub fn draw_cloud(canvas: &mut dyn Canvas, cloud: &Cloud) {
    let (x, y, size) = (cloud.x, cloud.y, cloud.size);
    let shadow = Color::new(0.0, 0.0, 0.0, 0.08);
    for (dx, r) in [(0.0, 0.3), (0.3, 0.4), (0.6, 0.3)] {
        canvas.fill_circle(x + size * dx + 1.0, y + 2.0, size * r, shadow);
    }
    for (dx, r) in [(0.0, 0.3), (0.3, 0.4), (0.6, 0.3)] {
        canvas.fill_circle(x + size * dx, y, size * r, palette::WHITE);
    }
}

pub fn draw_platform(canvas: &mut dyn Canvas, platform: &Platform) {
    let (x, y, w, h) = (platform.x, platform.y, platform.width, platform.height);
    match platform.kind {
        PlatformKind::Ground => {
            canvas.fill_rect(x, y, w, h, palette::SADDLE_BROWN);
            canvas.fill_rect(x, y, w, 8.0, palette::GRASS);
            canvas.fill_rect(x, y, w, 3.0, palette::GRASS_LIGHT);
            canvas.fill_rect(x, y + 8.0, w, 2.0, palette::GRASS_DARK);
            let mut tx = x + 6.0;
            while tx < x + w - 4.0 {
                canvas.fill_rect(tx, y + 16.0 + (tx * 0.37).sin().abs() * 20.0, 4.0, 4.0, palette::DARK_BROWN);
                tx += 18.0;
            }
        }
        PlatformKind::Brick => {
            canvas.fill_rect(x, y, w, h, palette::CHOCOLATE);
            let brick_w = 20.0;
            let brick_h = h / 2.0;
            for row in 0..2 {
                let by = y + row as f32 * brick_h;
                let offset = if row == 1 { brick_w / 2.0 } else { 0.0 };
                let mut bx = x - offset;
                while bx < x + w {
                    let left = bx.max(x);
                    let right = (bx + brick_w).min(x + w);
                    canvas.stroke_rect(left, by, right - left, brick_h, 1.0, palette::DEEP_BROWN);
                    bx += brick_w;
                }
            }
            canvas.fill_rect(x, y, w, 2.0, with_alpha(palette::WHITE, 0.25));
        }
    }
}

pub fn draw_player(canvas: &mut dyn Canvas, player: &Player, frame: u64) {
    let s = 2.0;
    let sway = player.dress_offset;
    let mut px = Pixels::new(canvas, player.x - 1.0, player.y + 2.0, s, 9.0).facing(player.facing);

    // crown
    px.cell(3.0, -1.0, 5.0, 2.5, palette::GOLD);
    px.cell(5.0, -2.0, 1.0, 2.0, palette::GOLD);
    px.cell(7.0, -1.5, 1.0, 1.5, palette::GOLD);
    px.cell(5.0, -1.0, 1.0, 1.0, palette::DEEP_PINK);
    px.cell(3.0, -1.0, 1.5, 1.0, palette::ORANGE);

    // hair
    px.cell(2.0, 2.0, 4.0, 4.0, palette::DEEP_BROWN);
    px.cell(1.0, 6.0, 3.0, 8.0, palette::DEEP_BROWN);
    px.cell(6.0, 2.0, 2.0, 3.0, palette::DEEP_BROWN);
    px.cell(3.0, 3.0, 2.0, 1.0, palette::SADDLE_BROWN);

    // face
    px.cell(4.0, 3.0, 4.0, 6.0, palette::SKIN);
    px.cell(8.0, 5.0, 1.0, 2.0, palette::SKIN);
    if player.blink.eyes_open {
        px.cell(6.0, 5.0, 1.0, 1.0, palette::BLACK);
    } else {
        px.cell(5.5, 5.5, 1.5, 0.5, palette::BLACK);
    }
    px.cell(5.0, 7.0, 1.0, 1.0, palette::CHEEK);
    px.cell(6.0, 8.0, 1.5, 0.5, palette::CRIMSON);

    // dress, flared at the hem and swaying while airborne
    px.cell(3.0, 9.0, 4.0, 4.0, palette::HOT_PINK);
    px.cell(2.0 + sway * 0.5, 13.0, 6.0, 3.0, palette::HOT_PINK);
    px.cell(1.0 + sway, 16.0, 8.0, 2.0, palette::DEEP_PINK);
    px.cell(3.0, 11.0, 4.0, 0.5, palette::GOLD);

    // arm
    px.cell(6.0, 10.0, 1.5, 3.0, palette::SKIN);

    // feet, alternating while walking
    let step = if player.anim_frame == 1 { 1.0 } else { 0.0 };
    px.cell(3.0 + step, 18.0, 1.5, 1.0, palette::VIOLET_RED);
    px.cell(5.5 - step, 18.0, 1.5, 1.0, palette::VIOLET_RED);

    if player.is_invincible() && frame % 6 < 3 {
        canvas.stroke_rect(player.x - 2.0, player.y - 2.0, player.width + 4.0, player.height + 4.0, 1.0, with_alpha(palette::GOLD, 0.6));
    }
}

pub fn draw_prince(canvas: &mut dyn Canvas, prince: &Prince) {
    let s = 2.0;
    let bob = if prince.anim_frame == 1 { 1.0 } else { 0.0 };
    let mut px = Pixels::new(canvas, prince.x - 1.0, prince.y + 2.0 - bob, s, 9.0).facing(Facing::Left);

    px.cell(2.0, -1.0, 6.0, 2.0, palette::GOLD);
    px.cell(4.0, -2.0, 1.0, 1.0, palette::GOLD);
    px.cell(4.0, -1.0, 1.0, 1.0, palette::ROYAL_BLUE);

    px.cell(2.0, 1.0, 6.0, 3.0, palette::HAIR_DARK);
    px.cell(3.0, 3.0, 5.0, 6.0, palette::SKIN);
    px.cell(2.0, 4.0, 1.0, 3.0, palette::HAIR_DARK);
    px.cell(8.0, 5.0, 1.0, 2.0, palette::SKIN_SHADE);
    if prince.blink.eyes_open {
        px.cell(6.0, 5.0, 1.0, 1.0, palette::BLACK);
    } else {
        px.cell(5.5, 5.5, 1.5, 0.5, palette::BLACK);
    }
    px.cell(5.5, 7.5, 2.0, 0.5, palette::DARK_RED);

    // tunic and cape
    px.cell(1.0, 9.0, 2.0, 7.0, palette::CRIMSON);
    px.cell(3.0, 9.0, 5.0, 6.0, palette::ROYAL_BLUE);
    px.cell(3.0, 9.0, 5.0, 1.0, palette::NAVY_TRIM);
    px.cell(3.0, 12.0, 5.0, 1.0, palette::GOLD);
    px.cell(7.0, 10.0, 1.5, 3.0, palette::SKIN);

    px.cell(3.5, 15.0, 1.5, 3.0, palette::NAVY_TRIM);
    px.cell(5.5, 15.0, 1.5, 3.0, palette::NAVY_TRIM);
    px.cell(3.0, 18.0, 2.0, 1.0, palette::DEEP_BROWN);
    px.cell(5.5, 18.0, 2.0, 1.0, palette::DEEP_BROWN);
}

pub fn draw_enemy(canvas: &mut dyn Canvas, enemy: &Enemy, frame: u64) {
    if !enemy.alive {
        return;
    }
    let s = 4.0;
    let facing = if enemy.vx < 0.0 { Facing::Left } else { Facing::Right };
    let (x, y) = (enemy.x.round(), enemy.y.round());
    {
        let mut px = Pixels::new(canvas, x, y, s, 8.0).facing(facing);

        px.cell(1.0, 9.75, 6.0, 0.25, palette::SHADOW);

        // helmet with plume
        px.cell(1.0, 0.0, 6.0, 2.0, palette::ARMOR);
        px.cell(3.0, -1.0, 2.0, 1.0, palette::CRIMSON);
        px.cell(1.0, 1.5, 6.0, 0.5, palette::ARMOR_DARK);

        px.cell(1.5, 2.0, 5.0, 2.0, palette::TAN);
        px.cell(2.0, 2.5, 1.0, 1.0, palette::WHITE);
        px.cell(5.0, 2.5, 1.0, 1.0, palette::WHITE);
        px.cell(2.3, 2.7, 0.6, 0.6, palette::BLACK);
        px.cell(5.3, 2.7, 0.6, 0.6, palette::BLACK);
        px.cell(3.0, 3.5, 2.0, 0.5, palette::DARK_RED);

        // breastplate
        px.cell(1.0, 4.0, 6.0, 4.0, palette::ARMOR);
        px.cell(1.5, 4.5, 1.5, 1.5, palette::ARMOR_DARK);
        px.cell(4.0, 4.5, 1.5, 1.5, palette::ARMOR_DARK);
        px.cell(1.5, 6.5, 1.5, 1.5, palette::ARMOR_DARK);
        px.cell(4.0, 6.5, 1.5, 1.5, palette::ARMOR_DARK);
        px.cell(1.0, 4.0, 6.0, 0.5, palette::ARMOR_SHINE);

        px.cell(0.0, 4.0, 1.0, 3.0, palette::TAN);
        px.cell(7.0, 4.0, 1.0, 3.0, palette::TAN);

        // legs
        let stride = if (frame / 10) % 2 == 0 { 0.0 } else { 0.5 };
        px.cell(1.5 + stride, 8.0, 1.5, 1.5, palette::ARMOR_DARK);
        px.cell(4.0 - stride, 8.0, 1.5, 1.5, palette::ARMOR_DARK);
        px.cell(1.5 + stride, 9.5, 1.5, 0.5, palette::BLACK);
        px.cell(4.0 - stride, 9.5, 1.5, 0.5, palette::BLACK);
    }

    // sword, swinging gently
    let angle = (frame as f32 * 0.1).sin() * 15f32.to_radians();
    let hilt_x = if facing == Facing::Right { x + s * 8.0 } else { x - s * 0.5 };
    let hilt_y = y + s * 5.0;
    let tip = rotate_about(hilt_x, hilt_y, hilt_x, hilt_y - s * 5.0, angle);
    canvas.line(hilt_x, hilt_y, tip.x, tip.y, s * 0.6, palette::SILVER);
    let guard_l = rotate_about(hilt_x, hilt_y, hilt_x - s * 1.2, hilt_y, angle);
    let guard_r = rotate_about(hilt_x, hilt_y, hilt_x + s * 1.2, hilt_y, angle);
    canvas.line(guard_l.x, guard_l.y, guard_r.x, guard_r.y, 2.0, palette::GOLD);
    canvas.fill_rect(hilt_x - 1.5, hilt_y, 3.0, s * 1.5, palette::SADDLE_BROWN);
}

pub fn heart_shape(canvas: &mut dyn Canvas, cx: f32, cy: f32, r: f32, color: Color) {
    let lobe = r * 0.5;
    canvas.fill_circle(cx - lobe, cy - lobe * 0.4, lobe, color);
    canvas.fill_circle(cx + lobe, cy - lobe * 0.4, lobe, color);
    canvas.fill_triangle(
        vec2(cx - r, cy - lobe * 0.1),
        vec2(cx + r, cy - lobe * 0.1),
        vec2(cx, cy + r),
        color,
    );
}

pub fn draw_heart(canvas: &mut dyn Canvas, heart: &Heart) {
    if heart.collected {
        return;
    }
    let cx = heart.x + heart.width / 2.0;
    let cy = heart.y + heart.height / 2.0 + heart.bob_offset();
    let r = heart.width / 2.0;

    let pulse = (heart.float_phase * 2.0).sin() * 0.5 + 0.5;
    canvas.fill_circle(cx, cy, r * 1.3, with_alpha(palette::DEEP_PINK, 0.15 + 0.1 * pulse));
    heart_shape(canvas, cx, cy, r, palette::DEEP_PINK);
    heart_shape(canvas, cx, cy - 1.0, r * 0.75, palette::HOT_PINK);
    canvas.fill_rect(cx - r * 0.55, cy - r * 0.55, r * 0.25, r * 0.25, palette::WHITE);
}

pub fn draw_castle(canvas: &mut dyn Canvas, castle: &Castle, flag_reached: bool) {
    let (x, y, w, h) = (castle.x, castle.y, castle.width, castle.height);

    canvas.fill_rect(x, y, w, h, palette::STONE);
    let mut row = 0;
    let mut by = y + 30.0;
    while by < y + h {
        let offset = if row % 2 == 0 { 0.0 } else { 12.0 };
        let mut bx = x - offset;
        while bx < x + w {
            let left = bx.max(x);
            let right = (bx + 24.0).min(x + w);
            canvas.stroke_rect(left, by, right - left, 14.0, 1.0, palette::STONE_DARK);
            bx += 24.0;
        }
        by += 14.0;
        row += 1;
    }

    // towers with battlements
    for tx in [x - 10.0, x + w - 30.0] {
        canvas.fill_rect(tx, y - 40.0, 40.0, h + 40.0, palette::STONE);
        canvas.stroke_rect(tx, y - 40.0, 40.0, h + 40.0, 2.0, palette::STONE_DARK);
        for i in 0..4 {
            if i % 2 == 0 {
                canvas.fill_rect(tx + i as f32 * 10.0, y - 52.0, 10.0, 12.0, palette::BATTLEMENT);
                canvas.fill_rect(tx + i as f32 * 10.0, y - 42.0, 10.0, 2.0, palette::BATTLEMENT_SHADOW);
            }
        }
        canvas.fill_rect(tx + 14.0, y - 20.0, 12.0, 18.0, palette::WINDOW_GLASS);
        canvas.stroke_rect(tx + 14.0, y - 20.0, 12.0, 18.0, 2.0, palette::STONE_DARK);
    }
    for i in 0..8 {
        if i % 2 == 0 {
            canvas.fill_rect(x + 30.0 + i as f32 * 12.5, y - 12.0, 12.5, 12.0, palette::BATTLEMENT);
        }
    }

    // door: glows once the flag has been reached
    let door = castle.door();
    canvas.fill_rect(door.x - 4.0, door.y - 4.0, door.w + 8.0, door.h + 4.0, palette::STONE_DARK);
    canvas.fill_circle(door.x + door.w / 2.0, door.y, door.w / 2.0, palette::DEEP_BROWN);
    canvas.fill_rect(door.x, door.y, door.w, door.h, palette::DEEP_BROWN);
    canvas.line(door.x + door.w / 2.0, door.y - door.w / 2.0, door.x + door.w / 2.0, door.y + door.h, 1.5, palette::HAIR_DARK);
    canvas.fill_circle(door.x + door.w - 6.0, door.y + door.h / 2.0, 2.0, palette::GOLD);
    if flag_reached {
        canvas.stroke_rect(door.x - 2.0, door.y - 2.0, door.w + 4.0, door.h + 2.0, 2.0, with_alpha(palette::GOLD, 0.8));
    }
}

pub fn draw_flag_pole(canvas: &mut dyn Canvas, pole: &FlagPole) {
    canvas.fill_rect(pole.x, pole.y, pole.width, pole.height, palette::SILVER);
    canvas.fill_rect(pole.x + 2.0, pole.y, 2.0, pole.height, palette::ARMOR_SHINE);
    canvas.fill_circle(pole.x + pole.width / 2.0, pole.y - 4.0, 7.0, palette::GOLD);
    canvas.fill_rect(pole.x - 6.0, pole.y + pole.height - 10.0, pole.width + 12.0, 10.0, palette::STONE_DARK);

    let fx = pole.x + pole.width;
    let fy = pole.flag_y + 6.0;
    let color = if pole.reached { palette::DEEP_PINK } else { palette::FLAG_BLUE };
    canvas.fill_triangle(vec2(fx, fy), vec2(fx + 40.0, fy + 15.0), vec2(fx, fy + 30.0), color);
    heart_shape(canvas, fx + 12.0, fy + 15.0, 5.0, palette::WHITE);
}

pub fn draw_flower(canvas: &mut dyn Canvas, flower: &Flower) {
    let (cx, cy, rot, scale) = (flower.x, flower.y, flower.rotation, flower.scale);
    if scale <= 0.0 {
        return;
    }
    let at = |dx: f32, dy: f32| rotate_about(cx, cy, cx + dx * scale, cy + dy * scale, rot);

    match flower.kind {
        FlowerKind::Rose => {
            for i in 0..8 {
                let a = i as f32 / 8.0 * TAU;
                let tip = rotate_about(0.0, 0.0, 0.0, -15.0, a);
                let p = at(tip.x * 0.6, tip.y * 0.6);
                let q = at(tip.x, tip.y);
                canvas.line(p.x, p.y, q.x, q.y, 6.0 * scale, flower.color);
            }
            canvas.fill_circle(cx, cy, 9.0 * scale, flower.color);
            canvas.fill_circle(cx, cy, 4.0 * scale, palette::GOLD);
        }
        FlowerKind::Tulip => {
            let stem_top = at(0.0, 0.0);
            let stem_bottom = at(2.0, 25.0);
            canvas.line(stem_top.x, stem_top.y, stem_bottom.x, stem_bottom.y, 2.0, palette::GRASS);
            canvas.fill_triangle(at(-6.0, 0.0), at(6.0, 0.0), at(0.0, 5.0), flower.color);
            canvas.fill_triangle(at(-6.0, 0.0), at(-5.0, -20.0), at(0.0, -10.0), flower.color);
            canvas.fill_triangle(at(6.0, 0.0), at(5.0, -20.0), at(0.0, -10.0), flower.color);
            canvas.fill_triangle(at(-4.0, 0.0), at(0.0, -18.0), at(4.0, 0.0), flower.color);
        }
        FlowerKind::Daisy => {
            for i in 0..6 {
                let a = i as f32 / 6.0 * TAU;
                let petal = rotate_about(0.0, 0.0, 0.0, -10.0, a);
                let p = at(petal.x, petal.y);
                canvas.fill_circle(p.x, p.y, 4.0 * scale, flower.color);
            }
            canvas.fill_circle(cx, cy, 3.0 * scale, palette::GOLD);
        }
    }
}

pub fn draw_chest(canvas: &mut dyn Canvas, cx: f32, cy: f32, frame: u64) {
    let glow = (frame as f32 * 0.08).sin() * 0.5 + 0.5;
    canvas.fill_circle(cx, cy, 46.0, with_alpha(palette::GOLD, 0.1 + 0.15 * glow));
    canvas.fill_rect(cx - 36.0, cy - 10.0, 72.0, 36.0, palette::SADDLE_BROWN);
    canvas.fill_rect(cx - 36.0, cy - 30.0, 72.0, 20.0, palette::CHOCOLATE);
    canvas.stroke_rect(cx - 36.0, cy - 30.0, 72.0, 56.0, 2.0, palette::DEEP_BROWN);
    canvas.fill_rect(cx - 36.0, cy - 12.0, 72.0, 4.0, palette::GOLD);
    canvas.fill_rect(cx - 6.0, cy - 14.0, 12.0, 14.0, palette::GOLD);
    canvas.fill_rect(cx - 2.0, cy - 9.0, 4.0, 5.0, palette::DEEP_BROWN);
}

pub fn draw_letter(canvas: &mut dyn Canvas, cx: f32, cy: f32, scale: f32, angle: f32) {
    let at = |dx: f32, dy: f32| rotate_about(cx, cy, cx + dx * scale, cy + dy * scale, angle);
    let (a, b, c, d) = (at(-24.0, -16.0), at(24.0, -16.0), at(24.0, 16.0), at(-24.0, 16.0));
    canvas.fill_triangle(a, b, c, palette::MISTY_ROSE);
    canvas.fill_triangle(a, c, d, palette::MISTY_ROSE);
    canvas.fill_triangle(a, b, at(0.0, 4.0), palette::LIGHT_PINK);
    let seal = at(0.0, 4.0);
    heart_shape(canvas, seal.x, seal.y, 6.0 * scale, palette::CRIMSON);
}

pub fn draw_posy(canvas: &mut dyn Canvas, cx: f32, cy: f32, scale: f32, angle: f32) {
    let at = |dx: f32, dy: f32| rotate_about(cx, cy, cx + dx * scale, cy + dy * scale, angle);
    let wrap = (at(-14.0, 0.0), at(14.0, 0.0), at(0.0, 26.0));
    canvas.fill_triangle(wrap.0, wrap.1, wrap.2, palette::LIGHT_PINK);
    for (dx, dy, color) in [
        (-10.0, -6.0, palette::DEEP_PINK),
        (10.0, -6.0, palette::HOT_PINK),
        (0.0, -14.0, palette::CRIMSON),
        (0.0, -2.0, palette::DEEP_PINK),
    ] {
        let p = at(dx, dy);
        canvas.fill_circle(p.x, p.y, 8.0 * scale, color);
        canvas.fill_circle(p.x, p.y, 3.0 * scale, palette::GOLD);
    }
}
