mod processor;
mod session;

pub use processor::{FrameProcessor, MIN_CACHE_KEYPOINTS, REGION_PADDING};
pub use session::TrackingSession;
