use glam::Vec2;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::canvas::{Circle, Context, Line as Segment, Rectangle};

use crate::physics::Aabb;

pub trait Surface {
    fn rect(&mut self, rect: Aabb, color: Color);
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn text(&mut self, at: Vec2, text: &str, color: Color);
}

/// Viewport in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub camera_x: f32,
    pub width: f32,
    pub height: f32,
}

impl View {
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.width as f64]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [0.0, self.height as f64]
    }

    fn to_canvas(&self, p: Vec2) -> (f64, f64) {
        ((p.x - self.camera_x) as f64, (self.height - p.y) as f64)
    }
}

/// Paints onto a ratatui canvas. World y points down and canvas y points up,
/// so points are flipped and shifted by the camera.
pub struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
    view: View,
}

impl<'a, 'b> CanvasSurface<'a, 'b> {
    pub fn new(ctx: &'a mut Context<'b>, view: View) -> Self {
        Self { ctx, view }
    }
}

impl Surface for CanvasSurface<'_, '_> {
    fn rect(&mut self, rect: Aabb, color: Color) {
        // Canvas rectangles are anchored at their bottom-left corner.
        let (x, y) = self.view.to_canvas(Vec2::new(rect.x, rect.bottom()));
        self.ctx.draw(&Rectangle {
            x,
            y,
            width: rect.width as f64,
            height: rect.height as f64,
            color,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let (x, y) = self.view.to_canvas(center);
        self.ctx.draw(&Circle {
            x,
            y,
            radius: radius as f64,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let (x1, y1) = self.view.to_canvas(from);
        let (x2, y2) = self.view.to_canvas(to);
        self.ctx.draw(&Segment { x1, y1, x2, y2, color });
    }

    fn text(&mut self, at: Vec2, text: &str, color: Color) {
        let (x, y) = self.view.to_canvas(at);
        self.ctx.print(x, y, Line::styled(text.to_owned(), Style::default().fg(color)));
    }
}

/// Counts primitives instead of drawing them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub rects: Vec<Aabb>,
    pub circles: Vec<(Vec2, f32)>,
    pub lines: usize,
    pub texts: Vec<String>,
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn rect(&mut self, rect: Aabb, _color: Color) {
        self.rects.push(rect);
    }

    fn circle(&mut self, center: Vec2, radius: f32, _color: Color) {
        self.circles.push((center, radius));
    }

    fn line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {
        self.lines += 1;
    }

    fn text(&mut self, _at: Vec2, text: &str, _color: Color) {
        self.texts.push(text.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_flips_y_and_applies_camera() {
        let view = View { camera_x: 100.0, width: 960.0, height: 540.0 };
        assert_eq!(view.to_canvas(Vec2::new(150.0, 40.0)), (50.0, 500.0));
    }
}
