use crate::geometry::{NormPoint, NormRect, PixelPoint, PixelRect};
use crate::skeleton::{BodyPart, ChainAnnotation};

/// One detected anatomical landmark.
///
/// Keypoints only exist above the configured confidence threshold; filtering
/// happens at decode time, so a `Keypoint` never carries a sub-threshold
/// score. At most one keypoint per `BodyPart` per pose.
#[derive(Clone, Debug)]
pub struct Keypoint {
    pub part: BodyPart,
    /// Confidence in `[0,1]`, rounded to two decimals.
    pub score: f32,
    /// Position in full-image normalized coordinates.
    pub position_raw: NormPoint,
    /// Position in absolute pixel coordinates.
    pub position: PixelPoint,
}

/// One decoded pose.
///
/// `bbox`/`bbox_raw` are always the tight enclosure of this pose's own
/// surviving keypoints, never of the inference crop. A pose that kept zero
/// keypoints carries degenerate zero-size boxes.
#[derive(Clone, Debug)]
pub struct PoseResult {
    /// Slot index in multi-pose output; always 0 for single-pose.
    pub id: usize,
    /// Max retained keypoint score (single-pose) or the network's aggregate
    /// detection score (multi-pose), rounded to two decimals.
    pub score: f32,
    pub bbox: PixelRect,
    pub bbox_raw: NormRect,
    pub keypoints: Vec<Keypoint>,
    pub annotations: Vec<ChainAnnotation>,
}
