//! Frame pixel container and the crop/resize primitives that build model
//! inputs.
//!
//! Pixels are RGB interleaved `f32` in `[0,1]`, the layout MoveNet-style
//! models consume directly. `crop_and_resize` follows the corner-aligned
//! sampling convention of TensorFlow's `cropAndResize` so cached-region
//! inputs match what the network was trained against; `resize_bilinear`
//! uses half-pixel centers for the full-frame path.

use anyhow::{anyhow, Result};

use crate::geometry::CropRegion;

const CHANNELS: usize = 3;

/// An RGB frame with `f32` pixels in `[0,1]`.
#[derive(Clone, Debug)]
pub struct Frame {
    pixels: Vec<f32>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    /// Zero-filled frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0.0; width as usize * height as usize * CHANNELS],
            width,
            height,
        }
    }

    /// Build a frame from packed RGB bytes.
    pub fn from_rgb8(data: &[u8], width: u32, height: u32) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or_else(|| anyhow!("frame dimensions overflow"))?;
        if data.len() != expected {
            return Err(anyhow!(
                "expected {} RGB bytes for {}x{}, received {}",
                expected,
                width,
                height,
                data.len()
            ));
        }
        Ok(Self {
            pixels: data.iter().map(|&b| b as f32 / 255.0).collect(),
            width,
            height,
        })
    }

    pub fn from_pixels(pixels: Vec<f32>, width: u32, height: u32) -> Result<Self> {
        if pixels.len() != width as usize * height as usize * CHANNELS {
            return Err(anyhow!(
                "pixel buffer length {} does not match {}x{}x{}",
                pixels.len(),
                width,
                height,
                CHANNELS
            ));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn at(&self, x: u32, y: u32, channel: usize) -> f32 {
        self.pixels[(y as usize * self.width as usize + x as usize) * CHANNELS + channel]
    }

    /// Bilinear sample at continuous pixel coordinates, edge-clamped.
    fn sample(&self, x: f32, y: f32, channel: usize) -> f32 {
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let x = x.clamp(0.0, max_x);
        let y = y.clamp(0.0, max_y);
        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;
        let top = self.at(x0, y0, channel) * (1.0 - fx) + self.at(x1, y0, channel) * fx;
        let bottom = self.at(x0, y1, channel) * (1.0 - fx) + self.at(x1, y1, channel) * fx;
        top * (1.0 - fy) + bottom * fy
    }
}

/// Crop a normalized region and resample it to a square model input.
pub fn crop_and_resize(frame: &Frame, region: &CropRegion, size: u32) -> Frame {
    let mut out = Frame::new(size, size);
    if frame.is_empty() || size == 0 {
        return out;
    }
    let max_x = (frame.width - 1) as f32;
    let max_y = (frame.height - 1) as f32;
    for i in 0..size {
        for j in 0..size {
            let (src_x, src_y) = if size > 1 {
                let t = 1.0 / (size - 1) as f32;
                (
                    (region.x0 + region.width() * j as f32 * t) * max_x,
                    (region.y0 + region.height() * i as f32 * t) * max_y,
                )
            } else {
                (
                    (region.x0 + region.x1) / 2.0 * max_x,
                    (region.y0 + region.y1) / 2.0 * max_y,
                )
            };
            for c in 0..CHANNELS {
                let v = frame.sample(src_x, src_y, c);
                out.pixels[(i as usize * size as usize + j as usize) * CHANNELS + c] = v;
            }
        }
    }
    out
}

/// Resample the whole frame to the given size.
pub fn resize_bilinear(frame: &Frame, out_w: u32, out_h: u32) -> Frame {
    let mut out = Frame::new(out_w, out_h);
    if frame.is_empty() || out_w == 0 || out_h == 0 {
        return out;
    }
    let scale_x = frame.width as f32 / out_w as f32;
    let scale_y = frame.height as f32 / out_h as f32;
    for i in 0..out_h {
        for j in 0..out_w {
            let src_x = (j as f32 + 0.5) * scale_x - 0.5;
            let src_y = (i as f32 + 0.5) * scale_y - 0.5;
            for c in 0..CHANNELS {
                let v = frame.sample(src_x, src_y, c);
                out.pixels[(i as usize * out_w as usize + j as usize) * CHANNELS + c] = v;
            }
        }
    }
    out
}
