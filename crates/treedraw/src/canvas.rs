#![forbid(unsafe_code)]

//! Renderer-facing drawing surface and the viewport transform.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use treedraw_core::geometry::{Point, Rect};

/// Something a tree can be drawn onto.
///
/// Coordinates are in the target's own space; [`TreeDrawing`] has already
/// mapped layout positions through a [`Fit`] before calling these.
///
/// [`TreeDrawing`]: crate::TreeDrawing
pub trait Canvas {
    /// Failure reported by the drawing backend.
    type Error;

    /// Stroke a straight edge between two node centers.
    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), Self::Error>;

    /// Stroke a node outline.
    fn draw_circle(&mut self, center: Point, radius: f64) -> Result<(), Self::Error>;

    /// Draw `text` centered on `center`, no wider than `max_width`.
    fn draw_label(&mut self, center: Point, text: &str, max_width: f64)
    -> Result<(), Self::Error>;
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Label {
        center: Point,
        text: String,
        max_width: f64,
    },
}

/// A [`Canvas`] that records every call in order.
///
/// Useful for tests and for renderers that want to batch or replay the
/// drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle { center, radius } => Some((*center, *radius)),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    type Error = Infallible;

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Line { from, to });
        Ok(())
    }

    fn draw_circle(&mut self, center: Point, radius: f64) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Circle { center, radius });
        Ok(())
    }

    fn draw_label(&mut self, center: Point, text: &str, max_width: f64) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Label {
            center,
            text: text.to_owned(),
            max_width,
        });
        Ok(())
    }
}

/// Uniform scale plus translation mapping layout space into a viewport.
///
/// The content rectangle is scaled as large as fits while keeping its
/// aspect ratio, then centered in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub scale: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Default for Fit {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Fit {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    /// Fit `content` into `viewport`.
    ///
    /// Returns `None` when either rectangle is empty or not finite.
    pub fn new(content: Rect, viewport: Rect) -> Option<Self> {
        let usable = |r: &Rect| r.is_finite() && !r.is_empty();
        if !usable(&content) || !usable(&viewport) {
            return None;
        }
        let scale = (viewport.width / content.width).min(viewport.height / content.height);
        let from = content.center();
        let to = viewport.center();
        Some(Self {
            scale,
            dx: to.x - from.x * scale,
            dy: to.y - from.y * scale,
        })
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.dx, p.y * self.scale + self.dy)
    }

    #[inline]
    pub fn apply_len(&self, len: f64) -> f64 {
        len * self.scale
    }

    pub fn apply_rect(&self, r: Rect) -> Rect {
        let origin = self.apply(Point::new(r.x, r.y));
        Rect::new(
            origin.x,
            origin.y,
            self.apply_len(r.width),
            self.apply_len(r.height),
        )
    }
}
