//! Per-frame orchestration: the skip/refresh state machine.
//!
//! Cached-region inference is cheap and exploits temporal coherence of pose
//! location; full-frame inference is the authoritative path that detects new
//! poses and recovers from drift. Each frame runs zero or more cached-region
//! passes, then at most one full-frame pass, then refreshes the session.

use std::cmp::Ordering;

use anyhow::Result;
use log::{debug, error};

use crate::config::PoseConfig;
use crate::detect::decode::decode;
use crate::detect::{InferenceBackend, PoseResult};
use crate::frame::{crop_and_resize, resize_bilinear, Frame};
use crate::geometry::{scale_region, CropRegion};
use crate::track::session::TrackingSession;

/// A pose must keep more keypoints than this to earn a cached region.
pub const MIN_CACHE_KEYPOINTS: usize = 10;

/// Padding factor applied to a pose's bounding box when it becomes a cached
/// region.
pub const REGION_PADDING: f32 = 1.5;

/// Drives one tracked detection stream over an inference backend.
pub struct FrameProcessor<B> {
    backend: Option<B>,
}

impl<B: InferenceBackend> FrameProcessor<B> {
    pub fn new(backend: B) -> Self {
        debug!("pose pipeline using '{}' backend", backend.name());
        Self {
            backend: Some(backend),
        }
    }

    /// Pipeline whose model failed to load. Every frame yields an empty
    /// result; the failure is logged here once, not per frame.
    pub fn unavailable() -> Self {
        error!("pose model unavailable, frames will yield no detections");
        Self { backend: None }
    }

    /// Process one frame and return its poses, best first.
    ///
    /// Poses found by cached-region tracking precede poses from a full-frame
    /// refresh (a refresh replaces rather than appends, so the two never
    /// mix). Session mutations commit only after every inference call of the
    /// frame has succeeded; an `Err` leaves the session exactly as it was.
    pub fn process_frame(
        &mut self,
        frame: &Frame,
        config: &PoseConfig,
        session: &mut TrackingSession,
    ) -> Result<Vec<PoseResult>> {
        let Some(backend) = self.backend.as_mut() else {
            return Ok(Vec::new());
        };

        if !config.skip_allowed {
            session.regions.clear();
        }
        let staged_skipped = session.skipped_frames.saturating_add(1);
        let layout = backend.layout();
        let size = backend.input_size();

        // cheap pass: re-detect inside every cached region
        let mut poses: Vec<PoseResult> = Vec::new();
        for region in session.regions.clone() {
            let input = crop_and_resize(frame, &region, size);
            let raw = backend.infer(&input)?;
            poses.extend(decode(
                layout,
                &raw,
                config,
                frame.width,
                frame.height,
                &region,
            )?);
        }

        // independent region decodes can together exceed the cap
        if poses.len() > config.max_detected {
            poses.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
            poses.truncate(config.max_detected);
        }

        let refresh = poses.len() != config.max_detected && staged_skipped > config.skip_frames;
        if refresh {
            debug!(
                "full-frame refresh: {} tracked poses after {} skipped frames",
                poses.len(),
                staged_skipped
            );
            let input = resize_bilinear(frame, size, size);
            let raw = backend.infer(&input)?;
            poses = decode(
                layout,
                &raw,
                config,
                frame.width,
                frame.height,
                &CropRegion::full(),
            )?;
        }

        // commit point: no inference can fail past here
        if refresh {
            session.skipped_frames = 0;
        } else {
            session.skipped_frames = staged_skipped;
        }
        session.regions.clear();
        if config.skip_allowed {
            for pose in &poses {
                if pose.keypoints.len() > MIN_CACHE_KEYPOINTS {
                    let points: Vec<_> = pose.keypoints.iter().map(|k| k.position).collect();
                    session.regions.push(scale_region(
                        &points,
                        REGION_PADDING,
                        frame.width,
                        frame.height,
                    ));
                }
            }
            debug!(
                "session: {} cached regions, {} skipped frames",
                session.regions.len(),
                session.skipped_frames
            );
        }

        Ok(poses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{ModelLayout, StubBackend};

    fn full_body_output(score: f32) -> Vec<f32> {
        let mut raw = Vec::with_capacity(51);
        for i in 0..17 {
            let t = i as f32 / 16.0;
            raw.extend_from_slice(&[0.2 + 0.6 * t, 0.4 + 0.2 * t, score]);
        }
        raw
    }

    #[test]
    fn unavailable_model_yields_empty_frames() {
        let mut processor: FrameProcessor<StubBackend> = FrameProcessor::unavailable();
        let mut session = TrackingSession::new();
        let frame = Frame::new(64, 48);
        let poses = processor
            .process_frame(&frame, &PoseConfig::default(), &mut session)
            .unwrap();
        assert!(poses.is_empty());
        assert_eq!(session.skipped_frames(), u32::MAX);
    }

    #[test]
    fn inference_error_leaves_session_untouched() {
        // backend with no canned output fails on the full-frame pass
        let backend = StubBackend::new(ModelLayout::SinglePose, 8);
        let mut processor = FrameProcessor::new(backend);
        let mut session = TrackingSession::new();
        let frame = Frame::new(64, 48);
        let config = PoseConfig {
            skip_frames: 0,
            ..PoseConfig::default()
        };

        assert!(processor
            .process_frame(&frame, &config, &mut session)
            .is_err());
        assert_eq!(session.skipped_frames(), u32::MAX);
        assert!(session.regions().is_empty());
    }

    #[test]
    fn qualifying_pose_populates_cache() {
        let mut backend = StubBackend::new(ModelLayout::SinglePose, 8);
        backend.push_output(full_body_output(0.9));
        let mut processor = FrameProcessor::new(backend);
        let mut session = TrackingSession::new();
        let frame = Frame::new(64, 48);
        let config = PoseConfig {
            skip_frames: 0,
            ..PoseConfig::default()
        };

        let poses = processor
            .process_frame(&frame, &config, &mut session)
            .unwrap();
        assert_eq!(poses.len(), 1);
        assert_eq!(poses[0].keypoints.len(), 17);
        assert_eq!(session.regions().len(), 1);
        assert_eq!(session.skipped_frames(), 0);
    }

    #[test]
    fn sparse_pose_earns_no_cached_region() {
        let mut backend = StubBackend::new(ModelLayout::SinglePose, 8);
        // only 5 keypoints above threshold
        let mut raw = full_body_output(0.05);
        for i in 0..5 {
            raw[3 * i + 2] = 0.9;
        }
        backend.push_output(raw);
        let mut processor = FrameProcessor::new(backend);
        let mut session = TrackingSession::new();
        let config = PoseConfig {
            skip_frames: 0,
            ..PoseConfig::default()
        };

        let poses = processor
            .process_frame(&Frame::new(64, 48), &config, &mut session)
            .unwrap();
        assert_eq!(poses[0].keypoints.len(), 5);
        assert!(session.regions().is_empty());
    }
}
