//! track_demo - synthetic end-to-end run of the pose tracking pipeline.
//!
//! Feeds a stub backend with a canned single-pose output and processes a
//! stream of blank frames through one tracking session, logging the
//! skip/refresh behavior per frame. Run with `RUST_LOG=debug` to see the
//! pipeline's own decisions.

use anyhow::Result;
use clap::Parser;
use log::info;

use posetrack::{Frame, FrameProcessor, ModelLayout, PoseConfig, StubBackend, TrackingSession};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of synthetic frames to process.
    #[arg(long, default_value_t = 30)]
    frames: u32,
    /// Frame width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,
    /// Frame height in pixels.
    #[arg(long, default_value_t = 480)]
    height: u32,
    /// Frames between forced full-frame refreshes.
    #[arg(long, default_value_t = 8)]
    skip_frames: u32,
}

/// A full body centered in frame, every keypoint at the given score.
fn synthetic_pose(score: f32) -> Vec<f32> {
    let mut raw = Vec::with_capacity(51);
    for i in 0..17 {
        let t = i as f32 / 16.0;
        let y = 0.15 + 0.7 * t;
        let x = 0.45 + 0.1 * (i % 3) as f32 / 2.0;
        raw.extend_from_slice(&[y, x, score]);
    }
    raw
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = PoseConfig::load()?;
    config.skip_frames = args.skip_frames;

    let mut backend = StubBackend::new(ModelLayout::SinglePose, config.model.input_size);
    backend.push_output(synthetic_pose(0.85));
    let calls = backend.call_counter();

    let mut processor = FrameProcessor::new(backend);
    let mut session = TrackingSession::new();
    let frame = Frame::new(args.width, args.height);

    for index in 0..args.frames {
        let poses = processor.process_frame(&frame, &config, &mut session)?;
        info!(
            "frame {:>3}: {} pose(s), {} cached region(s), {} skipped, {} inference call(s) total",
            index,
            poses.len(),
            session.regions().len(),
            session.skipped_frames(),
            calls.load(std::sync::atomic::Ordering::SeqCst),
        );
        if let Some(best) = poses.first() {
            info!(
                "           best score {:.2}, {} keypoints, bbox {:?}",
                best.score,
                best.keypoints.len(),
                best.bbox
            );
        }
    }

    Ok(())
}
