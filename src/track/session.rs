use crate::geometry::CropRegion;

/// Per-stream tracking state: cached crop regions and the staleness counter.
///
/// One session per video stream. Only [`FrameProcessor`] mutates it, and only
/// between inference calls of the frame it is processing; sharing a session
/// across concurrently processed streams is a caller error.
///
/// [`FrameProcessor`]: crate::track::FrameProcessor
#[derive(Debug)]
pub struct TrackingSession {
    /// Crop regions derived from the previous frame's poses, one per pose
    /// that qualified for caching.
    pub(crate) regions: Vec<CropRegion>,
    /// Frames processed since the last full-frame pass. A fresh session is
    /// maximally stale so its first frame always runs the full-frame pass.
    pub(crate) skipped_frames: u32,
}

impl Default for TrackingSession {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            skipped_frames: u32::MAX,
        }
    }
}

impl TrackingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached regions currently held, in the order their poses were detected.
    pub fn regions(&self) -> &[CropRegion] {
        &self.regions
    }

    /// Frames since the last full-frame inference pass.
    pub fn skipped_frames(&self) -> u32 {
        self.skipped_frames
    }
}
