//! Scene tessellation
//!
//! Turns a read-only `Frame` into a triangle list in CSS pixels. The speech
//! bubble text comes back as a `TextLabel` for the host to draw on top.

use glam::{Affine2, Vec2};
use std::f32::consts::PI;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::PROJECTILE_RADIUS;
use crate::session::BarTone;
use crate::sim::{Character, Drag, Frame, Mood, Randomness};

/// Font size of the speech bubble label, CSS pixels
pub const LABEL_FONT_PX: f32 = 16.0;
/// Average glyph advance of the bold label font, relative to its size
const GLYPH_ADVANCE: f32 = 0.56;

const BUBBLE_OFFSET: Vec2 = Vec2::new(60.0, -150.0);
const BUBBLE_HEIGHT: f32 = 46.0;
const BUBBLE_MIN_WIDTH: f32 = 120.0;
const BUBBLE_PAD: f32 = 20.0;

const SEGMENTS: u32 = 32;

/// Fraction of the remaining gap the backdrop closes per tick (about 2 s)
pub const BACKDROP_EASE: f32 = 0.025;

/// Background gradient, top to bottom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backdrop {
    pub top: [f32; 4],
    pub bottom: [f32; 4],
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::for_tone(BarTone::Hot)
    }
}

impl Backdrop {
    /// Warm while angry, cooling toward indigo as the meter drains
    pub fn for_tone(tone: BarTone) -> Self {
        let (top, bottom) = match tone {
            BarTone::Hot => (colors::ROSE_50, colors::ORANGE_50),
            BarTone::Warm => (colors::ORANGE_50, colors::PURPLE_50),
            BarTone::Calm => (colors::PURPLE_50, colors::INDIGO_50),
        };
        Self { top, bottom }
    }

    /// Move `t` of the way toward `target`
    pub fn approach(self, target: Self, t: f32) -> Self {
        let mix = |a: [f32; 4], b: [f32; 4]| std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t);
        Self {
            top: mix(self.top, target.top),
            bottom: mix(self.bottom, target.bottom),
        }
    }
}

/// Text the host draws over the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: &'static str,
    /// Center of the label in CSS pixels
    pub center: Vec2,
    pub color: [f32; 4],
    pub font_px: f32,
}

/// Triangles plus an optional label for one frame
#[derive(Debug, Clone)]
pub struct DrawList {
    pub vertices: Vec<Vertex>,
    pub label: Option<TextLabel>,
    transform: Affine2,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            vertices: Vec::with_capacity(4096),
            label: None,
            transform: Affine2::IDENTITY,
        }
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current local-to-screen transform
    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    /// Append local-space vertices under the current transform
    pub fn push(&mut self, shape: Vec<Vertex>) {
        let t = self.transform;
        self.vertices.extend(shape.into_iter().map(|v| {
            let p = t.transform_point2(Vec2::from(v.position));
            Vertex::new(p.x, p.y, v.color)
        }));
    }

    /// Draw with `local` composed onto the current transform, then restore it
    pub fn with_transform(&mut self, local: Affine2, draw: impl FnOnce(&mut Self)) {
        let saved = self.transform;
        self.transform = saved * local;
        draw(self);
        self.transform = saved;
    }
}

/// Rough rendered width of the label text
pub fn estimate_text_width(text: &str, font_px: f32) -> f32 {
    text.chars().count() as f32 * font_px * GLYPH_ADVANCE
}

/// Tessellate one frame.
///
/// `rng` drives the cosmetic jitter (screen shake offset, scared pupils);
/// the simulation state is never touched.
pub fn render_scene(frame: &Frame, backdrop: Backdrop, rng: &mut dyn Randomness) -> DrawList {
    let mut list = DrawList::new();
    let vp = frame.viewport;

    list.push(shapes::vertical_gradient(
        Vec2::ZERO,
        Vec2::new(vp.width, vp.height),
        backdrop.top,
        backdrop.bottom,
    ));

    let shake = if frame.shake > 0.0 {
        Vec2::new(
            (rng.unit() - 0.5) * frame.shake,
            (rng.unit() - 0.5) * frame.shake,
        )
    } else {
        Vec2::ZERO
    };

    list.with_transform(Affine2::from_translation(shake), |list| {
        draw_ground(list, frame.character.pos);

        for p in frame.projectiles.iter().filter(|p| p.active) {
            list.push(shapes::circle(p.pos, p.radius, p.color, 24));
            list.push(shapes::circle(
                p.pos - Vec2::splat(3.0),
                4.0,
                colors::with_alpha(colors::WHITE, 0.4),
                12,
            ));
        }

        if let Some(drag) = frame.drag {
            draw_aiming(list, drag, frame);
        }

        draw_character(list, frame.character, frame.time_ticks, rng);

        for p in frame.particles {
            list.push(shapes::circle(
                p.pos,
                (p.size * p.life).max(0.0),
                colors::with_alpha(p.color, p.color[3] * p.life),
                12,
            ));
        }

        if let Some(text) = frame.character.text {
            draw_bubble(list, frame.character.pos, text);
        }
    });

    list
}

fn draw_ground(list: &mut DrawList, pos: Vec2) {
    list.push(shapes::radial_ellipse(
        pos + Vec2::new(0.0, 20.0),
        Vec2::new(200.0, 60.0),
        &[
            (0.2, colors::with_alpha(colors::WHITE, 0.6)),
            (0.6, colors::with_alpha(colors::WHITE, 0.2)),
            (1.0, colors::with_alpha(colors::WHITE, 0.0)),
        ],
        48,
    ));
}

/// Positions of the trajectory preview dots
pub fn trajectory_preview(drag: Drag, drag_power: f32, gravity: f32, steps: u32) -> Vec<Vec2> {
    let mut pos = drag.start;
    let mut vel = drag.pull() * drag_power;
    (0..steps)
        .map(|_| {
            pos += vel;
            vel.y += gravity;
            pos
        })
        .collect()
}

fn draw_aiming(list: &mut DrawList, drag: Drag, frame: &Frame) {
    let tuning = frame.tuning;

    list.push(shapes::line(
        drag.start,
        drag.current,
        3.0,
        colors::with_alpha(colors::WHITE, 0.8),
    ));

    let dots = trajectory_preview(drag, tuning.drag_power, tuning.gravity, tuning.preview_steps);
    for (i, dot) in dots.into_iter().enumerate() {
        let alpha = (1.0 - i as f32 / 20.0).max(0.0);
        if alpha > 0.0 {
            list.push(shapes::circle(dot, 3.0, colors::with_alpha(colors::WHITE, alpha), 10));
        }
    }

    // Puck under the finger, with a soft shadow
    let shadow = colors::with_alpha([0.0, 0.0, 0.0, 1.0], 0.06);
    for spread in [3.0, 6.0, 9.0] {
        list.push(shapes::ring(
            drag.current,
            PROJECTILE_RADIUS,
            PROJECTILE_RADIUS + spread,
            shadow,
            SEGMENTS,
        ));
    }
    list.push(shapes::circle(drag.current, PROJECTILE_RADIUS, colors::PROJECTILE, 24));
    list.push(shapes::circle(
        drag.current,
        4.0,
        colors::with_alpha(colors::WHITE, 0.5),
        12,
    ));
}

fn draw_character(list: &mut DrawList, billu: &Character, time_ticks: u64, rng: &mut dyn Randomness) {
    // Blink and mouth wobble are phased on the tick counter
    let time = time_ticks as f32;
    let mood = billu.mood();
    let pose = Affine2::from_scale_angle_translation(billu.scale, billu.rotation, billu.pos);

    list.with_transform(pose, |list| {
        // Contact shadow
        list.push(shapes::ellipse(
            Vec2::new(0.0, 10.0),
            Vec2::new(55.0, 18.0),
            colors::SHADOW,
            SEGMENTS,
        ));

        // Capsule body, lit from the top-left
        let body_min = Vec2::new(-40.0, -90.0);
        let body_size = Vec2::new(80.0, 100.0);
        list.push(shapes::rounded_rect(body_min, body_size, 40.0, colors::BODY, 12));
        let axis = body_size;
        list.push(shapes::rounded_rect_shaded(body_min, body_size, 40.0, 12, |p| {
            let t = ((p - body_min).dot(axis) / axis.length_squared()).clamp(0.0, 1.0);
            let light = colors::with_alpha(colors::WHITE, 0.2 * (1.0 - t));
            let dark = [0.0, 0.0, 0.0, 0.05 * t];
            if light[3] >= dark[3] { light } else { dark }
        }));

        // Head
        list.push(shapes::circle(Vec2::new(0.0, -95.0), 45.0, colors::SKIN, 48));

        draw_eyes(list, billu, mood, time, rng);
        draw_mouth(list, mood, time);

        // Blush
        list.push(shapes::circle(Vec2::new(-32.0, -88.0), 10.0, colors::BLUSH, 16));
        list.push(shapes::circle(Vec2::new(32.0, -88.0), 10.0, colors::BLUSH, 16));
    });
}

const EYE_Y: f32 = -100.0;

fn draw_eyes(list: &mut DrawList, billu: &Character, mood: Mood, time: f32, rng: &mut dyn Randomness) {
    if mood == Mood::Relief {
        // Closed happy eyes
        for x in [-20.0, 20.0] {
            let arc = shapes::quad_curve(
                Vec2::new(x - 5.0, EYE_Y),
                Vec2::new(x, EYE_Y - 8.0),
                Vec2::new(x + 5.0, EYE_Y),
                8,
            );
            list.push(shapes::stroke(&arc, 3.5, colors::INK));
        }
        return;
    }

    if billu.is_hit {
        // > <
        for side in [-1.0_f32, 1.0] {
            let outer = side * 28.0;
            let inner = side * 18.0;
            list.push(shapes::stroke(
                &[
                    Vec2::new(outer, EYE_Y - 6.0),
                    Vec2::new(inner, EYE_Y),
                    Vec2::new(outer, EYE_Y + 6.0),
                ],
                3.5,
                colors::INK,
            ));
        }
        return;
    }

    let blink = (time * 0.005).sin() > 0.98;
    if blink && mood != Mood::Scared {
        list.push(shapes::rect(Vec2::new(-25.0, EYE_Y), Vec2::new(10.0, 2.0), colors::PUPIL));
        list.push(shapes::rect(Vec2::new(15.0, EYE_Y), Vec2::new(10.0, 2.0), colors::PUPIL));
        return;
    }

    let mut look = Vec2::ZERO;
    if mood == Mood::Scared {
        look = Vec2::new((rng.unit() - 0.5) * 2.0, (rng.unit() - 0.5) * 2.0);
        list.push(shapes::line(
            Vec2::new(-30.0, EYE_Y - 12.0),
            Vec2::new(-20.0, EYE_Y - 15.0),
            2.0,
            colors::PUPIL,
        ));
        list.push(shapes::line(
            Vec2::new(20.0, EYE_Y - 15.0),
            Vec2::new(30.0, EYE_Y - 12.0),
            2.0,
            colors::PUPIL,
        ));
    }

    for x in [-20.0, 20.0] {
        let pupil = Vec2::new(x, EYE_Y) + look;
        list.push(shapes::circle(pupil, 5.0, colors::PUPIL, 16));
        list.push(shapes::circle(pupil + Vec2::new(2.0, -2.0), 2.0, colors::WHITE, 8));
    }
}

fn draw_mouth(list: &mut DrawList, mood: Mood, time: f32) {
    match mood {
        Mood::Scared => {
            list.push(shapes::ellipse_outline(
                Vec2::new(0.0, -75.0),
                Vec2::new(4.0, 6.0),
                3.0,
                colors::INK,
                20,
            ));
        }
        Mood::Idle | Mood::Sorry => {
            let wobble = mouth_wobble(time);
            let curve = shapes::quad_curve(
                Vec2::new(-6.0, -75.0 + wobble),
                Vec2::new(0.0, -78.0),
                Vec2::new(6.0, -75.0 - wobble),
                8,
            );
            list.push(shapes::stroke(&curve, 3.0, colors::INK));
        }
        Mood::Relief => {
            let smile = shapes::arc_points(Vec2::new(0.0, -80.0), 10.0, 0.2, PI - 0.2, 12);
            list.push(shapes::stroke(&smile, 3.0, colors::INK));
        }
    }
}

/// Vertical offset of the mouth corners at `time` ticks
fn mouth_wobble(time: f32) -> f32 {
    (time * 0.1).sin()
}

/// Bubble size for `text`
pub fn bubble_size(text: &str) -> Vec2 {
    let width = (estimate_text_width(text, LABEL_FONT_PX) + BUBBLE_PAD * 2.0).max(BUBBLE_MIN_WIDTH);
    Vec2::new(width, BUBBLE_HEIGHT)
}

fn draw_bubble(list: &mut DrawList, pos: Vec2, text: &'static str) {
    let size = bubble_size(text);
    let radius = BUBBLE_HEIGHT / 2.0;

    list.with_transform(Affine2::from_translation(pos + BUBBLE_OFFSET), |list| {
        let min = Vec2::new(-BUBBLE_PAD, -size.y / 2.0);

        // Soft drop shadow
        for spread in [6.0, 3.0] {
            list.push(shapes::rounded_rect(
                min + Vec2::new(-spread, 5.0 - spread),
                size + Vec2::splat(spread * 2.0),
                radius + spread,
                [0.0, 0.0, 0.0, 0.025],
                8,
            ));
        }

        let fill = colors::with_alpha(colors::WHITE, 0.95);
        list.push(shapes::rounded_rect(min, size, radius, fill, 8));
        list.push(shapes::triangle(
            Vec2::new(-10.0, size.y / 2.0 - 5.0),
            Vec2::new(-20.0, size.y / 2.0 + 10.0),
            Vec2::new(0.0, size.y / 2.0 - 5.0),
            fill,
        ));

        let center = list
            .transform()
            .transform_point2(Vec2::new(size.x / 2.0 - BUBBLE_PAD, 1.0));
        list.label = Some(TextLabel {
            text,
            center,
            color: colors::TEXT,
            font_px: LABEL_FONT_PX,
        });
    });
}
