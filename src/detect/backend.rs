use anyhow::Result;

use crate::frame::Frame;

/// Raw output tensor of one inference call, flattened row-major.
///
/// Shape validation against the declared [`ModelLayout`] happens in
/// [`decode`](crate::detect::decode::decode), not here.
pub type RawOutput = Vec<f32>;

/// Output layout of the loaded model, fixed at load time.
///
/// MoveNet ships two head variants. The layout is a property of the model
/// file, so it is declared once by the backend rather than re-inferred from
/// each output's shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelLayout {
    /// One pose of 17 `(y, x, score)` triples: 51 values.
    SinglePose,
    /// Up to N slots of 17 triples, a box, and an aggregate score: 56 values
    /// per slot.
    MultiPose,
}

impl ModelLayout {
    /// Values per single pose (17 keypoints x 3).
    pub const KEYPOINT_VALUES: usize = 51;
    /// Values per multi-pose slot (keypoints + box + aggregate score).
    pub const SLOT_STRIDE: usize = 56;
    /// Offset of the aggregate detection score within a multi-pose slot.
    pub const SLOT_SCORE_OFFSET: usize = 55;
}

/// Inference backend trait.
///
/// This is the narrow seam to the neural network: implementations take an
/// already cropped and resized frame and return the raw output tensor.
/// They must be repeatedly invocable and must not retain frame pixels or
/// mutate any pipeline state beyond their own internals.
pub trait InferenceBackend: Send {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Output layout of the loaded model.
    fn layout(&self) -> ModelLayout;

    /// Side length of the square model input in pixels.
    fn input_size(&self) -> u32;

    /// Run inference on a model-input-sized frame.
    fn infer(&mut self, input: &Frame) -> Result<RawOutput>;
}
