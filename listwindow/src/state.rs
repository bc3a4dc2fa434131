use crate::Axis;

/// A point in scroll-container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The coordinate along `axis`.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.y,
            Axis::Horizontal => self.x,
        }
    }

    /// A point whose `axis` coordinate is `main` and whose other coordinate is zero.
    pub fn on_axis(axis: Axis, main: f64) -> Self {
        match axis {
            Axis::Vertical => Self { x: 0.0, y: main },
            Axis::Horizontal => Self { x: main, y: 0.0 },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }
}

/// A read-only snapshot reported by the native scroll container on every scroll tick.
///
/// Every field is optional: native event payloads are not guaranteed to be complete, and a
/// snapshot without `content_offset` is ignored. With `feature = "serde"`, this type decodes
/// the bridge's camelCase payload (`contentOffset`, `contentSize`, `layoutMeasurement`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ScrollTelemetry {
    pub content_offset: Option<Point>,
    pub content_size: Option<Size>,
    pub layout_measurement: Option<Size>,
    pub velocity: Option<f64>,
}

impl ScrollTelemetry {
    pub fn new(content_offset: Point) -> Self {
        Self {
            content_offset: Some(content_offset),
            ..Self::default()
        }
    }

    /// Convenience constructor for a vertical list.
    pub fn vertical(offset: f64, viewport_height: f64, content_height: f64) -> Self {
        Self {
            content_offset: Some(Point { x: 0.0, y: offset }),
            content_size: Some(Size {
                width: 0.0,
                height: content_height,
            }),
            layout_measurement: Some(Size {
                width: 0.0,
                height: viewport_height,
            }),
            velocity: None,
        }
    }

    /// Convenience constructor for a horizontal list.
    pub fn horizontal(offset: f64, viewport_width: f64, content_width: f64) -> Self {
        Self {
            content_offset: Some(Point { x: offset, y: 0.0 }),
            content_size: Some(Size {
                width: content_width,
                height: 0.0,
            }),
            layout_measurement: Some(Size {
                width: viewport_width,
                height: 0.0,
            }),
            velocity: None,
        }
    }

    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = Some(velocity);
        self
    }
}

/// Scroll metrics reported to `on_metrics` after each accepted scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListMetrics {
    pub content_length: f64,
    pub visible_length: f64,
    pub offset: f64,
    pub velocity: f64,
}

/// Payload of the end-reached callback.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndReached {
    pub distance_from_end: f64,
}
