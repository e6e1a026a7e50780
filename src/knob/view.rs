//! Style descriptors for whatever draws the knob.
//!
//! Nothing here paints pixels: [`render`] snapshots a [`Knob`] into class
//! names and CSS property values for the presentation layer.

use super::model::Knob;
use super::ticks::Tick;
use super::{MARGIN_FACTOR, TICK_OVERHANG};
use crate::config::{MarkerType, TrackType};
use knob_color::{HslColor, get_knob_color};

const BODY_SHADOW: &str = "0 5px 15px 2px black, 0 0 5px 3px black";

#[derive(Debug, Clone, PartialEq)]
pub struct TickStyle {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    pub transform: String,
    pub transform_origin: &'static str,
    pub background: String,
    pub box_shadow: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickView {
    pub class_name: String,
    pub style: TickStyle,
}

/// Outer body: fixed size, leaves room for the track and draws the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct OuterStyle {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub box_shadow: String,
}

/// Inner body: rotates with the knob and carries the marker.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerStyle {
    pub width: f64,
    pub height: f64,
    pub transform: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub class_name: String,
    pub style: Option<String>,
}

/// Track color in HSL plus a darker variant for unlit glow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackShades {
    pub base: HslColor,
    pub dimmed: HslColor,
}

impl TrackShades {
    pub fn derive(color: &str) -> Option<Self> {
        get_knob_color(color).map(|base| Self {
            base,
            dimmed: base.with_lightness(base.lightness / 2.0),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KnobView {
    pub class_name: String,
    pub ticks: Vec<TickView>,
    pub outer: OuterStyle,
    pub inner: InnerStyle,
    pub marker: MarkerView,
    pub track_shades: Option<TrackShades>,
}

fn rotate(degrees: f64) -> String {
    format!("rotate({degrees}deg)")
}

struct TickPainter<'a> {
    track_type: TrackType,
    track_color: &'a str,
    track_background: &'a str,
    /// Distance from the tick anchor to the knob center.
    reach: f64,
}

impl TickPainter<'_> {
    fn class_name(&self, tick: &Tick) -> String {
        if tick.active {
            format!("tick {} active", self.track_type)
        } else {
            format!("tick {}", self.track_type)
        }
    }

    fn box_shadow(&self, tick: &Tick) -> String {
        let color = self.track_color;
        match (tick.active, self.track_type) {
            (true, TrackType::Notch) => format!("inset 0 0 5px 2px {color}, 0 0 0 1px {color}"),
            (true, TrackType::Plain) => format!("inset 0 0 5px 5px {color}, 0 0 0 0px {color}"),
            (false, _) => format!("inset 0 0 0 0 {}", self.track_background),
        }
    }

    fn paint(&self, tick: &Tick) -> TickView {
        TickView {
            class_name: self.class_name(tick),
            style: TickStyle {
                width: tick.width,
                height: self.reach + TICK_OVERHANG,
                left: self.reach - 1.0,
                top: self.reach,
                transform: rotate(tick.angle),
                transform_origin: "top",
                background: if tick.active {
                    "none".to_string()
                } else {
                    self.track_background.to_string()
                },
                box_shadow: self.box_shadow(tick),
            },
        }
    }
}

impl Knob<'_> {
    pub fn margin(&self) -> f64 {
        self.config().size * MARGIN_FACTOR
    }

    /// Root class list: `knob`, the configured class, then `active`.
    pub fn class_name(&self) -> String {
        let mut classes = vec!["knob"];
        if let Some(class_name) = self.config().class_name.as_deref() {
            classes.push(class_name);
        }
        if self.is_active() {
            classes.push("active");
        }
        classes.join(" ")
    }

    pub fn outer_style(&self) -> OuterStyle {
        let config = self.config();
        let ring = if config.outcircle {
            format!("0 0 0 {} #444", config.outcircle_size)
        } else {
            "0 0 0 9px #1c1c1c".to_string()
        };

        OuterStyle {
            width: config.size,
            height: config.size,
            margin: self.margin(),
            box_shadow: format!("{BODY_SHADOW}, {ring}"),
        }
    }

    pub fn inner_style(&self) -> InnerStyle {
        InnerStyle {
            width: self.config().size,
            height: self.config().size,
            transform: rotate(self.current_angle()),
        }
    }

    pub fn marker_view(&self) -> MarkerView {
        let config = self.config();
        MarkerView {
            class_name: format!("marker {}", config.marker_type),
            style: config.marker_style.clone(),
        }
    }

    /// True when the marker is styled entirely by `marker_style`.
    pub fn has_custom_marker(&self) -> bool {
        self.config().marker_type == MarkerType::Custom
    }

    pub fn track_shades(&self) -> Option<TrackShades> {
        TrackShades::derive(&self.config().track_color)
    }
}

pub fn render(knob: &Knob<'_>) -> KnobView {
    let config = knob.config();
    let painter = TickPainter {
        track_type: config.track_type,
        track_color: &config.track_color,
        track_background: &config.track_background,
        reach: knob.margin() + config.size / 2.0,
    };

    KnobView {
        class_name: knob.class_name(),
        ticks: knob.ticks().map(|tick| painter.paint(&tick)).collect(),
        outer: knob.outer_style(),
        inner: knob.inner_style(),
        marker: knob.marker_view(),
        track_shades: knob.track_shades(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KnobConfig;
    use crate::knob::{Bounds, PointerEvent};

    fn knob(config: KnobConfig) -> Knob<'static> {
        Knob::new(config, |_| {}).unwrap()
    }

    #[test]
    fn test_class_name_follows_activity() {
        let mut k = knob(KnobConfig::default().class_name("volume"));
        assert_eq!(k.class_name(), "knob volume");

        k.update(PointerEvent::Down(Bounds::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(k.class_name(), "knob volume active");

        k.update(PointerEvent::Up);
        assert_eq!(k.class_name(), "knob volume active");

        k.update(PointerEvent::Leave);
        assert_eq!(render(&k).class_name, "knob volume");
        assert_eq!(knob(KnobConfig::default()).class_name(), "knob");
    }

    #[test]
    fn test_notch_tick_styles() {
        let view = render(&knob(KnobConfig::default().default_value(50.0)));
        assert_eq!(view.ticks.len(), 26);

        let first = &view.ticks[0];
        assert_eq!(first.class_name, "tick notch active");
        assert_eq!(first.style.width, 3.0);
        assert_eq!(first.style.height, 72.0);
        assert_eq!(first.style.left, 61.0);
        assert_eq!(first.style.top, 62.0);
        assert_eq!(first.style.transform, "rotate(50deg)");
        assert_eq!(first.style.transform_origin, "top");
        assert_eq!(first.style.background, "none");
        assert_eq!(
            first.style.box_shadow,
            "inset 0 0 5px 2px #509eec, 0 0 0 1px #509eec"
        );

        let last = view.ticks.last().unwrap();
        assert_eq!(last.class_name, "tick notch");
        assert_eq!(last.style.transform, "rotate(310deg)");
        assert_eq!(last.style.background, "black");
        assert_eq!(last.style.box_shadow, "inset 0 0 0 0 black");
    }

    #[test]
    fn test_plain_tick_styles() {
        let view = render(&knob(
            KnobConfig::default()
                .track_type(TrackType::Plain)
                .default_value(100.0),
        ));
        assert_eq!(view.ticks.len(), 261);
        assert!(view.ticks.iter().all(|t| t.class_name == "tick plain active"));
        assert_eq!(
            view.ticks[0].style.box_shadow,
            "inset 0 0 5px 5px #509eec, 0 0 0 0px #509eec"
        );
    }

    #[test]
    fn test_body_styles() {
        let k = knob(KnobConfig::default().default_value(50.0));
        assert_eq!(
            k.outer_style(),
            OuterStyle {
                width: 100.0,
                height: 100.0,
                margin: 12.0,
                box_shadow: "0 5px 15px 2px black, 0 0 5px 3px black, 0 0 0 8px #444"
                    .to_string(),
            }
        );
        assert_eq!(k.inner_style().transform, "rotate(178deg)");

        let k = knob(KnobConfig::default().outcircle(false, "8px"));
        assert_eq!(
            k.outer_style().box_shadow,
            "0 5px 15px 2px black, 0 0 5px 3px black, 0 0 0 9px #1c1c1c"
        );
    }

    #[test]
    fn test_marker_view() {
        let k = knob(KnobConfig::default());
        assert_eq!(k.marker_view().class_name, "marker led");
        assert!(!k.has_custom_marker());

        let k = knob(KnobConfig::default().marker(MarkerType::Custom, Some("width: 2px".into())));
        assert_eq!(
            k.marker_view(),
            MarkerView {
                class_name: "marker custom".to_string(),
                style: Some("width: 2px".to_string()),
            }
        );
        assert!(k.has_custom_marker());
    }

    #[test]
    fn test_track_shades() {
        let shades = knob(KnobConfig::default()).track_shades().unwrap();
        assert_eq!(shades.base.to_string(), "hsl(210,80.4%,6.2%)");
        assert_eq!(shades.dimmed.to_string(), "hsl(210,80.4%,3.1%)");

        let k = knob(KnobConfig::default().track_colors("tomato", "black"));
        assert_eq!(k.track_shades(), None);
    }
}
