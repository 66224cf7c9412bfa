//! Dial geometry.
//!
//! One full revolution of the dial is one hour. Angles are in degrees,
//! 0° sits at 12 o'clock and grows clockwise; coordinates live in the
//! dial's logical 0..100 viewBox with y growing downward.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Seconds in one revolution of the dial.
pub const SECONDS_PER_REVOLUTION: f64 = 3600.0;

/// Largest value drawn as a wedge. A full 3600 would produce an arc whose
/// start and end points coincide, which SVG renders as nothing.
pub const MAX_WEDGE_SECONDS: f64 = 3599.99;

const HALF_DIAL_SECONDS: f64 = 1800.0;
const TICK_COUNT: u32 = 60;
const MAJOR_TICK_LENGTH: f64 = 5.0;
const MINOR_TICK_LENGTH: f64 = 2.0;
const LABEL_INSET: f64 = 7.0;

pub fn seconds_to_angle(seconds: f64) -> f64 {
    (seconds.clamp(0.0, MAX_WEDGE_SECONDS) / SECONDS_PER_REVOLUTION) * 360.0
}

pub fn angle_to_seconds(degrees: f64) -> f64 {
    (degrees / 360.0) * SECONDS_PER_REVOLUTION
}

/// Angle of `(x, y)` around `(center_x, center_y)`, in `[0, 360)`.
pub fn coordinates_to_angle(x: f64, y: f64, center_x: f64, center_y: f64) -> f64 {
    let mut angle = (y - center_y).atan2(x - center_x).to_degrees() + 90.0;
    if angle < 0.0 {
        angle += 360.0;
    }
    // -1e-15 + 360.0 rounds to 360.0
    if angle >= 360.0 {
        angle -= 360.0;
    }
    angle
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Screen-space bounding box of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A pointer position in the dial's 0..100 logical space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale client coordinates into the dial's viewBox.
    ///
    /// Returns `None` for a collapsed surface, which happens while the
    /// widget is hidden or not yet laid out.
    pub fn from_client(client_x: f64, client_y: f64, rect: SurfaceRect) -> Option<Self> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return None;
        }
        Some(Self {
            x: (client_x - rect.left) / rect.width * 100.0,
            y: (client_y - rect.top) / rect.height * 100.0,
        })
    }

    /// Touch events carry a list of contact points; only the first one steers the dial.
    pub fn from_touches(touches: &[Point], rect: SurfaceRect) -> Option<Self> {
        let first = touches.first()?;
        Self::from_client(first.x, first.y, rect)
    }
}

/// The pie slice representing remaining time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WedgePath {
    Empty,
    Slice {
        center: Point,
        radius: f64,
        end: Point,
        large_arc: bool,
    },
}

impl WedgePath {
    pub fn is_empty(&self) -> bool {
        matches!(self, WedgePath::Empty)
    }

    pub fn large_arc(&self) -> bool {
        matches!(self, WedgePath::Slice { large_arc: true, .. })
    }
}

/// Renders SVG path data; `Empty` renders as an empty string.
impl fmt::Display for WedgePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WedgePath::Empty => Ok(()),
            WedgePath::Slice {
                center,
                radius,
                end,
                large_arc,
            } => write!(
                f,
                "M {cx},{cy} L {cx},{top} A {r},{r} 0 {flag} 1 {x},{y} Z",
                cx = center.x,
                cy = center.y,
                top = center.y - radius,
                r = radius,
                flag = u8::from(*large_arc),
                x = end.x,
                y = end.y,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TickClass {
    TickMinute,
    TickFiveMinute,
}

impl TickClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickClass::TickMinute => "tick-minute",
            TickClass::TickFiveMinute => "tick-five-minute",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    pub from: Point,
    pub to: Point,
    pub class: TickClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialLabel {
    pub at: Point,
    pub text: String,
}

/// Static decoration of the dial: 60 ticks and 12 labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockFace {
    pub ticks: Vec<TickMark>,
    pub labels: Vec<DialLabel>,
}

/// Center and radius of the dial in viewBox units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialGeometry {
    pub center: f64,
    pub radius: f64,
}

impl Default for DialGeometry {
    fn default() -> Self {
        Self {
            center: 50.0,
            radius: 50.0,
        }
    }
}

impl DialGeometry {
    pub fn new(center: f64, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center_point(&self) -> Point {
        Point::new(self.center, self.center)
    }

    /// Point at `radius` from the center, `angle` degrees clockwise from the top.
    pub fn point_at(&self, angle: f64, radius: f64) -> Point {
        let rad = (angle - 90.0).to_radians();
        Point::new(
            self.center + radius * rad.cos(),
            self.center + radius * rad.sin(),
        )
    }

    pub fn angle_of(&self, sample: PointerSample) -> f64 {
        coordinates_to_angle(sample.x, sample.y, self.center, self.center)
    }

    /// Slice from 12 o'clock clockwise to the position of `seconds`.
    pub fn wedge_path(&self, seconds: f64) -> WedgePath {
        if seconds <= 0.0 {
            return WedgePath::Empty;
        }
        let time = seconds.min(MAX_WEDGE_SECONDS);
        WedgePath::Slice {
            center: self.center_point(),
            radius: self.radius,
            end: self.point_at(seconds_to_angle(time), self.radius),
            large_arc: time > HALF_DIAL_SECONDS,
        }
    }

    /// Labels read as a countdown dial, so the top shows 60 rather than 12.
    pub fn clock_face(&self) -> ClockFace {
        let mut ticks = Vec::with_capacity(TICK_COUNT as usize);
        let mut labels = Vec::with_capacity((TICK_COUNT / 5) as usize);

        for i in 0..TICK_COUNT {
            let angle = f64::from(i) / f64::from(TICK_COUNT) * 360.0;
            let major = i % 5 == 0;
            let (length, class) = if major {
                (MAJOR_TICK_LENGTH, TickClass::TickFiveMinute)
            } else {
                (MINOR_TICK_LENGTH, TickClass::TickMinute)
            };

            ticks.push(TickMark {
                from: self.point_at(angle, self.radius - length),
                to: self.point_at(angle, self.radius),
                class,
            });

            if major {
                let text = if i == 0 { 60 } else { i };
                labels.push(DialLabel {
                    at: self.point_at(angle, self.radius - length - LABEL_INSET),
                    text: text.to_string(),
                });
            }
        }

        ClockFace { ticks, labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn quarter_hours_map_to_right_angles() {
        assert!(close(seconds_to_angle(0.0), 0.0));
        assert!(close(seconds_to_angle(900.0), 90.0));
        assert!(close(seconds_to_angle(1800.0), 180.0));
        assert!(close(seconds_to_angle(2700.0), 270.0));
        assert!(close(angle_to_seconds(90.0), 900.0));
    }

    #[test]
    fn seconds_to_angle_clamps_both_ends() {
        assert_eq!(seconds_to_angle(-30.0), 0.0);
        assert!(seconds_to_angle(3600.0) < 360.0);
        assert!(seconds_to_angle(99_999.0) < 360.0);
    }

    #[test]
    fn coordinates_to_angle_compass_points() {
        assert!(close(coordinates_to_angle(50.0, 0.0, 50.0, 50.0), 0.0));
        assert!(close(coordinates_to_angle(100.0, 50.0, 50.0, 50.0), 90.0));
        assert!(close(coordinates_to_angle(50.0, 100.0, 50.0, 50.0), 180.0));
        assert!(close(coordinates_to_angle(0.0, 50.0, 50.0, 50.0), 270.0));
    }

    #[test]
    fn coordinates_to_angle_upper_left_quadrant_is_normalized() {
        let angle = coordinates_to_angle(10.0, 10.0, 50.0, 50.0);
        assert!(close(angle, 315.0), "got {angle}");
    }

    #[test]
    fn wedge_is_empty_at_zero_and_below() {
        let dial = DialGeometry::default();
        assert!(dial.wedge_path(0.0).is_empty());
        assert!(dial.wedge_path(-1.0).is_empty());
        assert_eq!(dial.wedge_path(0.0).to_string(), "");
    }

    #[test]
    fn large_arc_flag_flips_past_half_hour() {
        let dial = DialGeometry::default();
        assert!(!dial.wedge_path(60.0).large_arc());
        assert!(!dial.wedge_path(1800.0).large_arc());
        assert!(dial.wedge_path(1801.0).large_arc());
        assert!(dial.wedge_path(3600.0).large_arc());
    }

    #[test]
    fn quarter_hour_wedge_path_data() {
        let path = DialGeometry::default().wedge_path(900.0);
        let WedgePath::Slice { end, .. } = path else {
            panic!("expected a slice");
        };
        assert!(close(end.x, 100.0));
        assert!(close(end.y, 50.0));
        assert!(path.to_string().starts_with("M 50,50 L 50,0 A 50,50 0 0 1 "));
        assert!(path.to_string().ends_with(" Z"));
    }

    #[test]
    fn full_hour_wedge_stops_just_short_of_the_top() {
        let WedgePath::Slice { end, .. } = DialGeometry::default().wedge_path(3600.0) else {
            panic!("expected a slice");
        };
        assert!(end.x < 50.0);
        assert!(end.y < 0.01);
    }

    #[test]
    fn wedge_top_follows_custom_geometry() {
        let path = DialGeometry::new(60.0, 40.0).wedge_path(600.0).to_string();
        assert!(path.starts_with("M 60,60 L 60,20 A 40,40 0 0 1 "), "{path}");
    }

    #[test]
    fn clock_face_has_sixty_ticks_and_twelve_labels() {
        let face = DialGeometry::default().clock_face();
        assert_eq!(face.ticks.len(), 60);
        assert_eq!(face.labels.len(), 12);
        let majors = face
            .ticks
            .iter()
            .filter(|t| t.class == TickClass::TickFiveMinute)
            .count();
        assert_eq!(majors, 12);
    }

    #[test]
    fn clock_face_labels_count_down_from_sixty() {
        let face = DialGeometry::default().clock_face();
        let texts: Vec<&str> = face.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            ["60", "5", "10", "15", "20", "25", "30", "35", "40", "45", "50", "55"]
        );
        let top = &face.labels[0];
        assert!(close(top.at.x, 50.0));
        assert!(close(top.at.y, 12.0));
    }

    #[test]
    fn minor_ticks_are_shorter() {
        let dial = DialGeometry::default();
        let face = dial.clock_face();
        let len = |t: &TickMark| ((t.to.x - t.from.x).powi(2) + (t.to.y - t.from.y).powi(2)).sqrt();
        assert!(close(len(&face.ticks[0]), 5.0));
        assert!(close(len(&face.ticks[1]), 2.0));
        assert_eq!(face.ticks[1].class.as_str(), "tick-minute");
    }

    #[test]
    fn pointer_sample_scales_into_view_box() {
        let rect = SurfaceRect {
            left: 100.0,
            top: 20.0,
            width: 200.0,
            height: 400.0,
        };
        let sample = PointerSample::from_client(200.0, 120.0, rect).unwrap();
        assert!(close(sample.x, 50.0));
        assert!(close(sample.y, 25.0));
    }

    #[test]
    fn pointer_sample_rejects_collapsed_surface() {
        let rect = SurfaceRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 100.0,
        };
        assert!(PointerSample::from_client(10.0, 10.0, rect).is_none());
    }

    #[test]
    fn touch_sample_uses_first_contact() {
        let rect = SurfaceRect {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
        };
        let touches = [Point::new(75.0, 50.0), Point::new(0.0, 0.0)];
        let sample = PointerSample::from_touches(&touches, rect).unwrap();
        assert_eq!(sample, PointerSample::new(75.0, 50.0));
        assert!(PointerSample::from_touches(&[], rect).is_none());
    }

    proptest! {
        #[test]
        fn angle_round_trip_is_stable(seconds in 0.0f64..=3600.0) {
            let angle = seconds_to_angle(seconds);
            let again = seconds_to_angle(angle_to_seconds(angle));
            prop_assert!((again - angle).abs() < EPS);
        }

        #[test]
        fn coordinates_always_normalized(x in -500.0f64..500.0, y in -500.0f64..500.0) {
            let angle = coordinates_to_angle(x, y, 50.0, 50.0);
            prop_assert!((0.0..360.0).contains(&angle));
        }
    }
}
