use super::geometry::{Bounds, Point, Track, convert_range};
use super::ticks::Ticks;
use super::{NOTCH_TICK_WIDTH, PLAIN_TICK_WIDTH_FACTOR, STALL_NUDGE};
use crate::config::{InvalidConfig, KnobConfig, TrackType};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Bounds),
    Move(Point),
    Up,
    Leave,
}

/// Moves are only routed to the knob while a session exists.
#[derive(Debug)]
pub struct DragSession {
    pivot: Point,
    moves: u64,
}

impl DragSession {
    fn begin(bounds: Bounds) -> Self {
        let pivot = bounds.center();
        log::debug!("Drag started, pivot at ({}, {})", pivot.x, pivot.y);
        Self { pivot, moves: 0 }
    }

    pub fn pivot(&self) -> Point {
        self.pivot
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        log::debug!("Drag released after {} moves", self.moves);
    }
}

pub struct Knob<'a> {
    config: KnobConfig,
    track: Track,
    current_angle: f64,
    active: bool,
    drag: Option<DragSession>,
    on_wheel: Box<dyn FnMut(f64) + 'a>,
}

impl fmt::Debug for Knob<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Knob")
            .field("config", &self.config)
            .field("track", &self.track)
            .field("current_angle", &self.current_angle)
            .field("active", &self.active)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl<'a> Knob<'a> {
    /// `on_wheel` receives the value on every drag move.
    pub fn new(config: KnobConfig, on_wheel: impl FnMut(f64) + 'a) -> Result<Self, InvalidConfig> {
        config.validate()?;

        let track = Track::new(config.degrees, config.num_ticks, config.track_type);
        let mut knob = Self {
            current_angle: track.start,
            config,
            track,
            active: false,
            drag: None,
            on_wheel: Box::new(on_wheel),
        };

        match knob.angle_for_value(knob.config.default_value) {
            Some(angle) => knob.current_angle = angle,
            None => log::warn!(
                "Default value {} is outside [{}, {}], starting at the beginning of the track",
                knob.config.default_value,
                knob.config.min,
                knob.config.max
            ),
        }

        Ok(knob)
    }

    pub fn config(&self) -> &KnobConfig {
        &self.config
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn value(&self) -> f64 {
        self.value_from_angle(self.current_angle)
    }

    /// Track angle for `value`, floored to a whole degree. `None` outside `[min, max]`.
    pub fn angle_for_value(&self, value: f64) -> Option<f64> {
        self.config.contains(value).then(|| {
            convert_range(
                value,
                self.config.min..=self.config.max,
                self.track.range(),
            )
            .floor()
        })
    }

    /// Floored, and only shifted by `|min|` when `min` is negative.
    pub fn value_from_angle(&self, angle: f64) -> f64 {
        let KnobConfig { min, max, .. } = self.config;
        let step = self.track.degrees / (max - min);
        if step == 0.0 {
            return min;
        }

        let raw = (angle - self.track.start) / step;
        if raw < min {
            min
        } else if min < 0.0 {
            (raw - min.abs()).floor()
        } else {
            raw.floor()
        }
    }

    pub fn angle_from_pointer(&self, pivot: Point, pointer: Point) -> f64 {
        self.track.angle_from_pointer(pivot, pointer)
    }

    pub fn tick_width(&self) -> f64 {
        match self.config.track_type {
            TrackType::Plain => self.config.size * PLAIN_TICK_WIDTH_FACTOR,
            TrackType::Notch => NOTCH_TICK_WIDTH,
        }
    }

    pub fn ticks(&self) -> Ticks {
        Ticks::new(
            self.track,
            self.current_angle,
            self.config.first_active,
            self.tick_width(),
        )
    }

    pub fn start_drag(&mut self, bounds: Bounds) {
        if !self.active {
            self.active = true;
        }
        self.drag = Some(DragSession::begin(bounds));
    }

    pub fn drag_to(&mut self, pointer: Point) -> Option<f64> {
        let pivot = self.drag.as_mut().map(|session| {
            session.moves += 1;
            session.pivot
        })?;

        let angle = self.angle_from_pointer(pivot, pointer);

        // a move onto the start angle sits one degree under it
        self.current_angle = if angle == self.track.start {
            angle - STALL_NUDGE
        } else {
            angle
        };

        let value = self.value_from_angle(angle);
        log::trace!("Drag to {:.2} degrees, value {}", angle, value);
        (self.on_wheel)(value);
        Some(value)
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn leave(&mut self) {
        self.active = false;
    }

    /// The rotation only moves when the value lies within `[min, max]`.
    pub fn set_default_value(&mut self, value: f64) -> bool {
        self.config.default_value = value;

        match self.angle_for_value(value) {
            Some(angle) => {
                self.current_angle = angle;
                true
            }
            None => {
                log::warn!("Ignoring default value {} outside the knob range", value);
                false
            }
        }
    }

    pub fn update(&mut self, event: PointerEvent) -> Option<f64> {
        match event {
            PointerEvent::Down(bounds) => {
                self.start_drag(bounds);
                None
            }
            PointerEvent::Move(pointer) => self.drag_to(pointer),
            PointerEvent::Up => {
                self.end_drag();
                None
            }
            PointerEvent::Leave => {
                self.leave();
                None
            }
        }
    }
}
