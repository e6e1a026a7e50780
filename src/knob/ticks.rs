use super::Track;
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub index: u32,
    /// Degrees, same frame as the knob rotation.
    pub angle: f64,
    pub width: f64,
    pub active: bool,
}

/// Ticks from the start of the track to its end, both inclusive.
///
/// Tick `i` sits at `start + i * increment` and the last one is pinned to the
/// end of the track, so summing increments can never drop the final tick.
#[derive(Debug, Clone)]
pub struct Ticks {
    track: Track,
    increment: f64,
    width: f64,
    current_angle: f64,
    first_active: bool,
    count: u32,
    next: u32,
}

impl Ticks {
    pub fn new(track: Track, current_angle: f64, first_active: bool, width: f64) -> Self {
        let count = match track.num_ticks {
            0 => 0,
            // zero-length track: every step lands on the start
            _ if track.degrees == 0.0 => 1,
            n => n.saturating_add(1),
        };

        Self {
            track,
            increment: track.tick_increment(),
            width,
            current_angle,
            first_active,
            count,
            next: 0,
        }
    }

    fn angle_of(&self, index: u32) -> f64 {
        if index + 1 == self.count {
            self.track.end
        } else {
            self.track.start + f64::from(index) * self.increment
        }
    }
}

impl Iterator for Ticks {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.next >= self.count {
            return None;
        }

        let index = self.next;
        self.next += 1;

        let angle = self.angle_of(index);
        Some(Tick {
            index,
            angle,
            width: self.width,
            active: angle <= self.current_angle || (self.first_active && index == 0),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Ticks {}

impl FusedIterator for Ticks {}
