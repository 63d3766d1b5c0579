//! Raw-output decoding for both MoveNet head layouts.
//!
//! Decoding is deterministic and allocates fresh keypoint vectors per call;
//! no scratch state survives between invocations.

use std::cmp::Ordering;

use anyhow::{bail, Result};

use crate::config::PoseConfig;
use crate::detect::backend::{ModelLayout, RawOutput};
use crate::detect::result::{Keypoint, PoseResult};
use crate::geometry::{self, CropRegion};
use crate::skeleton::{build_annotations, BodyPart};

fn round2(v: f32) -> f32 {
    (100.0 * v).round() / 100.0
}

/// Decode 17 `(y, x, score)` triples, dropping sub-threshold keypoints.
///
/// Coordinates are crop-relative; `region` is the reference box they are
/// mapped through, and `frame_w`/`frame_h` the full frame's pixel size.
fn decode_keypoints(
    triples: &[f32],
    min_confidence: f32,
    frame_w: u32,
    frame_h: u32,
    region: &CropRegion,
) -> Vec<Keypoint> {
    (0..BodyPart::COUNT)
        .filter_map(|i| {
            let y = triples[3 * i];
            let x = triples[3 * i + 1];
            let score = triples[3 * i + 2];
            if score <= min_confidence {
                return None;
            }
            let part = BodyPart::from_index(i)?;
            let position_raw = geometry::map_to_frame(x, y, region);
            Some(Keypoint {
                part,
                score: round2(score),
                position_raw,
                position: geometry::to_pixels(position_raw, frame_w, frame_h),
            })
        })
        .collect()
}

fn build_pose(id: usize, score: f32, keypoints: Vec<Keypoint>, min_confidence: f32) -> PoseResult {
    let px: Vec<_> = keypoints.iter().map(|k| k.position).collect();
    let raw: Vec<_> = keypoints.iter().map(|k| k.position_raw).collect();
    PoseResult {
        id,
        score,
        bbox: geometry::bounds_px(&px),
        bbox_raw: geometry::bounds_raw(&raw),
        annotations: build_annotations(&keypoints, min_confidence),
        keypoints,
    }
}

/// Decode one raw inference output into zero or more poses.
///
/// `region` is the crop the input was taken from (`CropRegion::full()` for
/// full-frame inference). A raw output whose length does not match `layout`
/// is a contract violation with the backend and fails hard.
pub fn decode(
    layout: ModelLayout,
    raw: &RawOutput,
    config: &PoseConfig,
    frame_w: u32,
    frame_h: u32,
    region: &CropRegion,
) -> Result<Vec<PoseResult>> {
    match layout {
        ModelLayout::SinglePose => {
            if raw.len() != ModelLayout::KEYPOINT_VALUES {
                bail!(
                    "single-pose output has {} values, expected {}",
                    raw.len(),
                    ModelLayout::KEYPOINT_VALUES
                );
            }
            let keypoints =
                decode_keypoints(raw, config.min_confidence, frame_w, frame_h, region);
            let score = keypoints.iter().map(|k| k.score).fold(0.0, f32::max);
            Ok(vec![build_pose(0, score, keypoints, config.min_confidence)])
        }
        ModelLayout::MultiPose => {
            if raw.is_empty() || raw.len() % ModelLayout::SLOT_STRIDE != 0 {
                bail!(
                    "multi-pose output has {} values, expected a multiple of {}",
                    raw.len(),
                    ModelLayout::SLOT_STRIDE
                );
            }
            let mut poses = Vec::new();
            for (id, slot) in raw.chunks(ModelLayout::SLOT_STRIDE).enumerate() {
                let total = round2(slot[ModelLayout::SLOT_SCORE_OFFSET]);
                if total <= config.min_confidence {
                    continue;
                }
                let keypoints = decode_keypoints(
                    &slot[..ModelLayout::KEYPOINT_VALUES],
                    config.min_confidence,
                    frame_w,
                    frame_h,
                    region,
                );
                poses.push(build_pose(id, total, keypoints, config.min_confidence));
            }
            // stable sort keeps slot order among equal scores
            poses.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
            poses.truncate(config.max_detected);
            Ok(poses)
        }
    }
}
