use macroquad::color::Color;
use macroquad::math::{vec2, Vec2};

pub trait Canvas {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32, thickness: f32, color: Color);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Color);
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color);

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
    fn measure_text(&self, text: &str, size: f32) -> f32;
}

pub fn vertical_gradient(
    canvas: &mut dyn Canvas,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    top: Color,
    bottom: Color,
    bands: u32,
) {
    let bands = bands.max(1);
    let band_h = h / bands as f32;
    for i in 0..bands {
        let t = i as f32 / (bands.saturating_sub(1).max(1)) as f32;
        let color = crate::palette::lerp(top, bottom, t);
        // one pixel of overlap hides seams between bands
        canvas.fill_rect(x, y + i as f32 * band_h, w, band_h + 1.0, color);
    }
}

pub fn text_centered(canvas: &mut dyn Canvas, text: &str, cx: f32, y: f32, size: f32, color: Color) {
    let w = canvas.measure_text(text, size);
    canvas.text(text, cx - w / 2.0, y, size, color);
}

pub fn wrap_text(canvas: &dyn Canvas, text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if !line.is_empty() && canvas.measure_text(&candidate, size) > max_width {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn rotate_about(cx: f32, cy: f32, px: f32, py: f32, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    let dx = px - cx;
    let dy = py - cy;
    vec2(cx + dx * c - dy * s, cy + dx * s + dy * c)
}

pub struct MacroquadCanvas {
    width: f32,
    height: f32,
}

impl MacroquadCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Canvas for MacroquadCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        macroquad::shapes::draw_rectangle(x, y, w, h, color);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color) {
        macroquad::shapes::draw_rectangle_lines(x, y, w, h, thickness, color);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        macroquad::shapes::draw_circle(x, y, radius, color);
    }

    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32, thickness: f32, color: Color) {
        macroquad::shapes::draw_circle_lines(x, y, radius, thickness, color);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Color) {
        macroquad::shapes::draw_line(x1, y1, x2, y2, thickness, color);
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        macroquad::shapes::draw_triangle(a, b, c, color);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        macroquad::text::draw_text(text, x, y, size, color);
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        macroquad::text::measure_text(text, None, size.round().max(1.0) as u16, 1.0).width
    }
}
