use rayon::prelude::*;

use depthstream_core::{CodecError, CodecKind, DepthCodec, DepthFrame, DepthRange, RgbFrame};

use crate::ramp::{index_to_rgb, rgb_to_index, RAMP_MAX};

/// Hue colorization codec, normalized in disparity (inverse-distance) space.
///
/// Same ramp as [`UniformHueCodec`], but the index is proportional to `1/d`,
/// concentrating color resolution on near-range depth — the right trade when
/// most scene content sits close to the camera. Near depth maps to the high
/// end of the ramp (`1/d_min`), far depth to index 0.
///
/// Zero (no-data) samples map to index 0, the same cell as the far bound, so
/// "no data" and "farthest" are deliberately indistinguishable on the wire;
/// decode returns a literal 0 for that cell to keep the sentinel visible
/// downstream. Both bounds must be strictly positive (the transform divides
/// by each); a zero bound fails with [`CodecError::InvalidRange`] on encode
/// *and* decode.
pub struct InverseHueCodec {
    encode_buf: RgbFrame,
    decode_buf: DepthFrame,
}

impl InverseHueCodec {
    pub fn new() -> Self {
        Self {
            encode_buf: RgbFrame::new(0, 0),
            decode_buf: DepthFrame::new(0, 0),
        }
    }
}

impl Default for InverseHueCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl DepthCodec for InverseHueCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::InverseHue
    }

    fn name(&self) -> &'static str {
        "inverse-hue"
    }

    fn encode(
        &mut self,
        depth: &DepthFrame,
        range: DepthRange,
    ) -> Result<&RgbFrame, CodecError> {
        if depth.is_empty() {
            return Err(CodecError::EmptyFrame);
        }
        range.validate()?;
        range.require_positive()?;

        self.encode_buf.ensure_size(depth.width(), depth.height());
        let disp_min = 1.0 / range.max;
        let disp_max = 1.0 / range.min;
        let disp_span = disp_max - disp_min;

        self.encode_buf
            .data_mut()
            .par_chunks_exact_mut(3)
            .zip(depth.samples().par_iter())
            .for_each(|(px, &sample)| {
                let n = if sample == 0.0 {
                    0
                } else {
                    let disp = 1.0 / range.clamp(f64::from(sample));
                    ((disp - disp_min) / disp_span * f64::from(RAMP_MAX)).round() as u16
                };
                px.copy_from_slice(&index_to_rgb(n));
            });

        Ok(&self.encode_buf)
    }

    fn decode(
        &mut self,
        image: &RgbFrame,
        range: DepthRange,
    ) -> Result<&DepthFrame, CodecError> {
        if image.is_empty() {
            return Err(CodecError::EmptyFrame);
        }
        range.validate()?;
        range.require_positive()?;

        self.decode_buf.ensure_size(image.width(), image.height());
        let disp_min = 1.0 / range.max;
        let disp_max = 1.0 / range.min;
        let disp_span = disp_max - disp_min;

        self.decode_buf
            .samples_mut()
            .par_iter_mut()
            .zip(image.data().par_chunks_exact(3))
            .for_each(|(out, px)| {
                let n = rgb_to_index([px[0], px[1], px[2]]);
                *out = if n == 0 {
                    // far/no-data cell stays the sentinel
                    0.0
                } else {
                    let steps = f64::from(RAMP_MAX);
                    (steps / (steps * disp_min + disp_span * f64::from(n))) as f32
                };
            });

        Ok(&self.decode_buf)
    }
}
