mod macros;

pub mod config;
pub mod events;
pub mod knob;
pub mod sys;
