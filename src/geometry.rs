//! Axis-aligned bounding boxes and rectangle overlap.

/// Axis-aligned bounding box in `(x, y, width, height)` form.
///
/// Coordinates may be pixels or normalized units; the suppression passes only
/// require that every box in one call shares the same coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Box width.
    pub width: f32,
    /// Box height.
    pub height: f32,
}

impl BBox {
    /// Creates a box from its top-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box area. Negative dimensions propagate arithmetically; degenerate
    /// boxes are handled by [`iou`], never rejected.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Returns the box shifted by `offset` along both axes.
    pub(crate) fn translated(&self, offset: f32) -> Self {
        Self {
            x: self.x + offset,
            y: self.y + offset,
            ..*self
        }
    }
}

/// Intersection area of two boxes, 0 when they do not overlap.
fn intersection_area(a: &BBox, b: &BBox) -> f32 {
    let left = a.x.max(b.x);
    let top = a.y.max(b.y);
    let right = (a.x + a.width).min(b.x + b.width);
    let bottom = (a.y + a.height).min(b.y + b.height);
    (right - left).max(0.0) * (bottom - top).max(0.0)
}

/// Intersection-over-union of two boxes.
///
/// Defined as `area(a ∩ b) / (area(a) + area(b) - area(a ∩ b))`. When both
/// boxes have zero total area the overlap is defined as 0, so degenerate
/// boxes never divide by zero.
pub fn iou(a: &BBox, b: &BBox) -> f32 {
    let total = a.area() + b.area();
    if total == 0.0 {
        return 0.0;
    }
    let inter = intersection_area(a, b);
    inter / (total - inter)
}
