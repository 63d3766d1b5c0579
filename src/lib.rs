//! posetrack
//!
//! Structured human-pose extraction from MoveNet-style keypoint models, with
//! a temporal ROI cache that lets most frames skip full-frame inference.
//!
//! # Architecture
//!
//! Each frame flows through a five-step skip/refresh loop:
//!
//! 1. when tracking is disabled, cached regions are cleared up front
//! 2. the staleness counter advances
//! 3. every cached region runs cheap cropped inference and is decoded
//!    against that region
//! 4. a full-frame pass runs only when tracked poses did not fill the
//!    detection cap and the cache has gone stale; its results replace the
//!    tracked ones
//! 5. poses with enough keypoints become next frame's cached regions
//!
//! # Module Structure
//!
//! - `geometry`: coordinate mapping across crop / normalized / pixel spaces
//! - `skeleton`: MoveNet part table and limb-chain annotations
//! - `detect`: inference backend seam, raw-output decoding, pose results
//! - `frame`: RGB frame container and crop/resize primitives
//! - `track`: tracking session state and the per-frame processor
//! - `config`: thresholds, caps and model settings

pub mod config;
pub mod detect;
pub mod frame;
pub mod geometry;
pub mod skeleton;
pub mod track;

pub use config::{ModelSettings, PoseConfig};
pub use detect::{InferenceBackend, Keypoint, ModelLayout, PoseResult, RawOutput, StubBackend};
pub use frame::{crop_and_resize, resize_bilinear, Frame};
pub use geometry::{CropRegion, NormPoint, NormRect, PixelPoint, PixelRect};
pub use skeleton::{build_annotations, BodyPart, ChainAnnotation, Segment, CHAINS};
pub use track::{FrameProcessor, TrackingSession, MIN_CACHE_KEYPOINTS, REGION_PADDING};

#[cfg(feature = "backend-tract")]
pub use detect::TractBackend;
