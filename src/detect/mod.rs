mod backend;
mod backends;
pub mod decode;
mod result;

pub use backend::{InferenceBackend, ModelLayout, RawOutput};
pub use backends::StubBackend;
pub use result::{Keypoint, PoseResult};

#[cfg(feature = "backend-tract")]
pub use backends::TractBackend;
