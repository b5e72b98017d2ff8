//! Drawing capability consumed by the renderer
//!
//! Hosts implement [`Surface`] over their raster target of choice.
//! [`NullSurface`] and [`RecordingSurface`] ship for headless hosts and
//! renderer tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// Straight-alpha RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::opaque(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::opaque(0xff, 0xff, 0xff);
    pub const RED: Color = Color::opaque(0xff, 0x00, 0x00);
    pub const YELLOW: Color = Color::opaque(0xff, 0xff, 0x00);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
}

/// Minimal raster capability: fill a rectangle, fill a line of text.
/// `px` is the text height in canvas units.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, px: f32, align: TextAlign, color: Color);
}

/// Discards every draw call. For hosts that only want the simulation.
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
    fn fill_text(&mut self, _text: &str, _pos: Vec2, _px: f32, _align: TextAlign, _color: Color) {}
}

/// One captured draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        px: f32,
        align: TextAlign,
        color: Color,
    },
}

/// Captures draw calls in order, for renderer tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn rect_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Rect { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Rect { rect, color });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, px: f32, align: TextAlign, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            px,
            align,
            color,
        });
    }
}
