use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::detect::backend::{InferenceBackend, ModelLayout, RawOutput};
use crate::frame::Frame;

/// Stub backend for testing. Replays canned raw outputs in order.
///
/// Once the queue is drained the last output is replayed indefinitely, so a
/// static scene can be simulated with a single canned tensor. The call
/// counter is shared so tests can observe how many inference passes a frame
/// actually cost.
pub struct StubBackend {
    layout: ModelLayout,
    input_size: u32,
    outputs: VecDeque<RawOutput>,
    last: Option<RawOutput>,
    calls: Arc<AtomicUsize>,
}

impl StubBackend {
    pub fn new(layout: ModelLayout, input_size: u32) -> Self {
        Self {
            layout,
            input_size,
            outputs: VecDeque::new(),
            last: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue a canned output for a future `infer` call.
    pub fn push_output(&mut self, output: RawOutput) {
        self.outputs.push_back(output);
    }

    /// Shared inference-call counter.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl InferenceBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn layout(&self) -> ModelLayout {
        self.layout
    }

    fn input_size(&self) -> u32 {
        self.input_size
    }

    fn infer(&mut self, input: &Frame) -> Result<RawOutput> {
        if input.width != self.input_size || input.height != self.input_size {
            return Err(anyhow!(
                "input is {}x{}, model expects {}x{}",
                input.width,
                input.height,
                self.input_size,
                self.input_size
            ));
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.outputs.pop_front() {
            self.last = Some(next.clone());
            return Ok(next);
        }
        self.last
            .clone()
            .ok_or_else(|| anyhow!("stub backend has no canned output"))
    }
}
