//! Coordinate spaces and box utilities.
//!
//! The pipeline works in three coordinate spaces:
//!
//! - crop-relative: `[0,1]` within the image handed to the model
//! - image-normalized: `[0,1]` within the full input frame
//! - pixel: absolute integer coordinates in the full input frame
//!
//! `map_to_frame` and `to_pixels` move keypoints between them. Neither
//! clamps: a keypoint the model places outside its crop maps to coordinates
//! outside the frame, and callers decide whether to clip.

/// Point in image-normalized space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormPoint {
    pub x: f32,
    pub y: f32,
}

/// Point in absolute pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned rectangle in image-normalized space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct NormRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned rectangle in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Crop rectangle in image-normalized space, `(y0, x0, y1, x1)` order.
///
/// This is the cached-region representation: the reference box every decode
/// maps its keypoints through, and the rectangle `crop_and_resize` samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRegion {
    pub y0: f32,
    pub x0: f32,
    pub y1: f32,
    pub x1: f32,
}

impl CropRegion {
    /// The whole frame, `(0, 0, 1, 1)`.
    pub fn full() -> Self {
        Self {
            y0: 0.0,
            x0: 0.0,
            y1: 1.0,
            x1: 1.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Map a crop-relative keypoint into image-normalized space.
pub fn map_to_frame(kpt_x: f32, kpt_y: f32, region: &CropRegion) -> NormPoint {
    NormPoint {
        x: region.width() * kpt_x + region.x0,
        y: region.height() * kpt_y + region.y0,
    }
}

/// Image-normalized point to the nearest pixel.
pub fn to_pixels(point: NormPoint, width: u32, height: u32) -> PixelPoint {
    PixelPoint {
        x: (point.x * width as f32).round() as i32,
        y: (point.y * height as f32).round() as i32,
    }
}

/// Tight pixel-space enclosure of a point set.
///
/// An empty set yields the degenerate zero-size rectangle at the origin.
pub fn bounds_px(points: &[PixelPoint]) -> PixelRect {
    if points.is_empty() {
        return PixelRect::default();
    }
    let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
    let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
    let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
    PixelRect {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// Tight normalized-space enclosure of a point set.
pub fn bounds_raw(points: &[NormPoint]) -> NormRect {
    if points.is_empty() {
        return NormRect::default();
    }
    let min_x = points.iter().map(|p| p.x).fold(f32::MAX, f32::min);
    let min_y = points.iter().map(|p| p.y).fold(f32::MAX, f32::min);
    let max_x = points.iter().map(|p| p.x).fold(f32::MIN, f32::max);
    let max_y = points.iter().map(|p| p.y).fold(f32::MIN, f32::max);
    NormRect {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// Enclose pixel keypoints in a padded crop region.
///
/// The tight box is expanded by `factor` about its center, converted back to
/// image-normalized `(y0, x0, y1, x1)` and clipped to the frame. This is how
/// a detected pose becomes next frame's cached region.
pub fn scale_region(points: &[PixelPoint], factor: f32, width: u32, height: u32) -> CropRegion {
    let tight = bounds_px(points);
    let cx = tight.x as f32 + tight.width as f32 / 2.0;
    let cy = tight.y as f32 + tight.height as f32 / 2.0;
    let half_w = tight.width as f32 * factor / 2.0;
    let half_h = tight.height as f32 * factor / 2.0;
    let fw = width.max(1) as f32;
    let fh = height.max(1) as f32;
    CropRegion {
        y0: ((cy - half_h) / fh).clamp(0.0, 1.0),
        x0: ((cx - half_w) / fw).clamp(0.0, 1.0),
        y1: ((cy + half_h) / fh).clamp(0.0, 1.0),
        x1: ((cx + half_w) / fw).clamp(0.0, 1.0),
    }
}
