//! Frame composition over an abstract drawing surface
//!
//! The simulation is rendered through the minimal [`Surface`] capability
//! (fill rectangle, fill text) so game logic tests never touch a concrete
//! graphics backend.

pub mod draw;
pub mod surface;

pub use draw::{draw_frame, tint_color};
pub use surface::{Color, DrawCall, NullSurface, RecordingSurface, Surface, TextAlign};
