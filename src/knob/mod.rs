pub mod geometry;
pub mod model;
pub mod ticks;
pub mod view;

pub use geometry::{Bounds, Point, Track, convert_range, pointer_angle};
pub use model::{DragSession, Knob, PointerEvent};
pub use ticks::{Tick, Ticks};
pub use view::{KnobView, render};

pub const FULL_CIRCLE: f64 = 360.0;
pub const MARGIN_FACTOR: f64 = 0.12; // track margin around the body, relative to size
pub const PLAIN_TICK_WIDTH_FACTOR: f64 = 0.013; // relative to size
pub const NOTCH_TICK_WIDTH: f64 = 3.0;
pub const TICK_OVERHANG: f64 = 10.0; // tick length past the track radius
pub const STALL_NUDGE: f64 = 1.0; // degrees below the start angle after a move onto it
