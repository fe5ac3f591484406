/*
 * Render Surface Module
 *
 * Particles draw through the `Surface` trait so they stay independent of a
 * live window. `ScreenDraw` is the nannou-backed surface: particle space
 * has its origin at the top-left corner with y pointing down, while nannou
 * centers the origin with y pointing up.
 */

use nannou::color::Hsva;
use nannou::prelude::*;

/// How a disc is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid,
    Outline { weight: f32 },
}

pub trait Surface {
    /// Draw a disc approximated by `resolution` segments.
    fn disc(&mut self, center: Point2, radius: f32, resolution: u32, color: Hsva, fill: Fill);

    /// Draw a straight segment.
    fn line(&mut self, start: Point2, end: Point2, color: Hsva, weight: f32);
}

pub struct ScreenDraw<'a> {
    draw: &'a Draw,
    window_rect: Rect,
}

impl<'a> ScreenDraw<'a> {
    pub fn new(draw: &'a Draw, window_rect: Rect) -> Self {
        Self { draw, window_rect }
    }
}

// Convert a point from particle space to nannou's centered space
#[inline]
pub fn to_screen(window_rect: Rect, point: Point2) -> Point2 {
    pt2(window_rect.left() + point.x, window_rect.top() - point.y)
}

// Convert a point from nannou's centered space back to particle space
#[inline]
pub fn from_screen(window_rect: Rect, point: Point2) -> Point2 {
    pt2(point.x - window_rect.left(), window_rect.top() - point.y)
}

impl Surface for ScreenDraw<'_> {
    fn disc(&mut self, center: Point2, radius: f32, resolution: u32, color: Hsva, fill: Fill) {
        let ellipse = self
            .draw
            .ellipse()
            .xy(to_screen(self.window_rect, center))
            .radius(radius)
            .resolution(resolution as f32);

        match fill {
            Fill::Solid => {
                ellipse.color(color);
            }
            Fill::Outline { weight } => {
                ellipse.no_fill().stroke(color).stroke_weight(weight);
            }
        }
    }

    fn line(&mut self, start: Point2, end: Point2, color: Hsva, weight: f32) {
        self.draw
            .line()
            .start(to_screen(self.window_rect, start))
            .end(to_screen(self.window_rect, end))
            .weight(weight)
            .color(color);
    }
}
