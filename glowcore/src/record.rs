//! record — a surface that keeps a display list instead of drawing
//!
//! Lets renderer and scene tests assert on the exact primitives a frame
//! produced, without a window or a pixel buffer.

use crate::surface::{FontSpec, Paint, Pen, Surface};
use egui::{Align2, Pos2, Rect, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    FillPolygon {
        points: Vec<Pos2>,
        paint: Paint,
    },
    StrokePolyline {
        points: Vec<Pos2>,
        closed: bool,
        pen: Pen,
    },
    Text {
        pos: Pos2,
        align: Align2,
        text: String,
        font: FontSpec,
        paint: Paint,
    },
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every text command as `(text, paint)`, in draw order.
    pub fn texts(&self) -> Vec<(&str, &Paint)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, paint, .. } => Some((text.as_str(), paint)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn fill_polygon(&mut self, points: &[Pos2], paint: &Paint) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            paint: paint.clone(),
        });
    }

    fn stroke_polyline(&mut self, points: &[Pos2], closed: bool, pen: &Pen) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            closed,
            pen: pen.clone(),
        });
    }

    fn text(&mut self, pos: Pos2, align: Align2, text: &str, font: &FontSpec, paint: &Paint) {
        self.commands.push(DrawCommand::Text {
            pos,
            align,
            text: text.to_owned(),
            font: *font,
            paint: paint.clone(),
        });
    }
}
