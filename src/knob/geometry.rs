use super::FULL_CIRCLE;
use crate::config::TrackType;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Element bounds as reported by the layout system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Angle of `pointer` around `pivot`, in degrees on `[0, 360]`.
///
/// Angles run clockwise in screen coordinates starting straight below the
/// pivot: left is 90, up is 180, right is 270.
pub fn pointer_angle(pivot: Point, pointer: Point) -> f64 {
    let (x, y) = (pointer.x - pivot.x, pointer.y - pivot.y);

    // atan(y / 0) is +-90 by the sign of y; also keeps -0.0 and the pivot itself off the NaN path
    let raw = if x == 0.0 {
        if y >= 0.0 { 90.0 } else { -90.0 }
    } else {
        (y / x).atan().to_degrees()
    };

    if x < 0.0 { raw + 90.0 } else { raw + 270.0 }
}

/// Linear map of `value` from one range onto another.
pub fn convert_range(value: f64, from: RangeInclusive<f64>, to: RangeInclusive<f64>) -> f64 {
    (value - from.start()) * (to.end() - to.start()) / (from.end() - from.start()) + to.start()
}

/// The arc the knob turns through, centered on the bottom of the circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub degrees: f64,
    pub start: f64,
    pub end: f64,
    /// Effective tick count; equals `degrees` for plain tracks.
    pub num_ticks: u32,
}

impl Track {
    pub fn new(degrees: f64, num_ticks: u32, track_type: TrackType) -> Self {
        let start = (FULL_CIRCLE - degrees) / 2.0;
        let num_ticks = match track_type {
            TrackType::Plain => degrees.trunc() as u32,
            TrackType::Notch => num_ticks,
        };

        Self {
            degrees,
            start,
            end: start + degrees,
            num_ticks,
        }
    }

    pub fn range(&self) -> RangeInclusive<f64> {
        self.start..=self.end
    }

    pub fn tick_increment(&self) -> f64 {
        self.degrees / f64::from(self.num_ticks)
    }

    pub fn clamp(&self, angle: f64) -> f64 {
        angle.clamp(self.start, self.end)
    }

    pub fn angle_from_pointer(&self, pivot: Point, pointer: Point) -> f64 {
        self.clamp(pointer_angle(pivot, pointer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIVOT: Point = Point { x: 50.0, y: 50.0 };

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_track_is_centered() {
        for degrees in [0.0, 90.0, 180.0, 260.0, 300.5, 360.0] {
            let track = Track::new(degrees, 25, TrackType::Notch);
            assert_close(track.start + degrees, track.end);
            assert!((0.0..=360.0).contains(&track.start));
            assert!((0.0..=360.0).contains(&track.end));
            assert_close(track.start, FULL_CIRCLE - track.end);
        }

        let track = Track::new(260.0, 25, TrackType::Notch);
        assert_eq!((track.start, track.end), (50.0, 310.0));
        assert_close(track.tick_increment(), 10.4);
    }

    #[test]
    fn test_plain_track_ticks_follow_degrees() {
        assert_eq!(Track::new(260.0, 25, TrackType::Plain).num_ticks, 260);
        assert_eq!(Track::new(270.5, 7, TrackType::Plain).num_ticks, 270);
        assert_eq!(Track::new(0.0, 7, TrackType::Plain).num_ticks, 0);
        assert_eq!(Track::new(260.0, 7, TrackType::Notch).num_ticks, 7);
    }

    #[test]
    fn test_pointer_angle_compass() {
        let cases = vec![
            (Point::new(0.0, 50.0), 90.0),    // left
            (Point::new(50.0, 0.0), 180.0),   // above
            (Point::new(100.0, 50.0), 270.0), // right
            (Point::new(50.0, 100.0), 360.0), // below
            (Point::new(0.0, 100.0), 45.0),   // below left
            (Point::new(0.0, 0.0), 135.0),    // above left
            (Point::new(100.0, 0.0), 225.0),  // above right
            (Point::new(100.0, 100.0), 315.0),
        ];

        for (pointer, expected) in cases {
            assert_close(pointer_angle(PIVOT, pointer), expected);
        }
    }

    #[test]
    fn test_pointer_angle_on_vertical_axis_is_finite() {
        assert_close(pointer_angle(PIVOT, PIVOT), 360.0);
        assert_close(pointer_angle(Point::new(-0.0, 0.0), Point::new(0.0, 5.0)), 360.0);
        assert_close(pointer_angle(Point::new(0.0, 0.0), Point::new(-0.0, 5.0)), 360.0);
        assert_close(pointer_angle(Point::new(0.0, 0.0), Point::new(-0.0, -5.0)), 180.0);
    }

    #[test]
    fn test_angle_from_pointer_is_clamped() {
        let track = Track::new(260.0, 25, TrackType::Notch);

        for i in 0..360 {
            let theta = f64::from(i).to_radians();
            let pointer = Point::new(PIVOT.x + 40.0 * theta.cos(), PIVOT.y + 40.0 * theta.sin());
            let angle = track.angle_from_pointer(PIVOT, pointer);
            assert!(track.range().contains(&angle), "{angle} outside track");
        }

        // straight below the pivot lies in the dead zone, past the end of the track
        assert_eq!(track.angle_from_pointer(PIVOT, Point::new(50.0, 90.0)), 310.0);
        assert_eq!(track.angle_from_pointer(PIVOT, Point::new(49.0, 90.0)), 50.0);
    }

    #[test]
    fn test_convert_range() {
        assert_close(convert_range(50.0, 1.0..=100.0, 50.0..=310.0), 50.0 + 260.0 * 49.0 / 99.0);
        assert_close(convert_range(1.0, 1.0..=100.0, 50.0..=310.0), 50.0);
        assert_close(convert_range(100.0, 1.0..=100.0, 50.0..=310.0), 310.0);
        assert_close(convert_range(0.0, -50.0..=50.0, 0.0..=1.0), 0.5);
    }

    #[test]
    fn test_bounds_center() {
        assert_eq!(Bounds::new(10.0, 20.0, 100.0, 50.0).center(), Point::new(60.0, 45.0));
        assert_eq!(Bounds::new(10.0, 20.0, 0.0, 0.0).center(), Point::new(10.0, 20.0));
    }
}
