use rayon::prelude::*;

use depthstream_core::{CodecError, CodecKind, DepthCodec, DepthFrame, DepthRange, RgbFrame};

/// Number of distinct depth codes spread across the two depth-bearing
/// channels (2^16 - 1).
const MAX_CODE: f64 = 65535.0;

/// Maximum-precision transport codec: a range-normalized, inverted 16-bit
/// depth code split across two 8-bit channels.
///
/// Channel layout (identical for `encode` and `decode`):
/// - `R` — low byte of the code
/// - `G` — high byte of the code
/// - `B` — spare, always 0
///
/// The code is inverted (`near = 65535`, `far = 0`) so depth reads
/// dark-to-bright in a consistent direction; receivers must assume the same
/// direction. Zero (no-data) samples are substituted with the far bound
/// before encoding.
///
/// Quantization step: `(max - min) / 65535` — sub-millimeter over a 6 m
/// range.
pub struct LinearCodec {
    eight_bit_decode: bool,
    encode_buf: RgbFrame,
    decode_buf: DepthFrame,
}

impl LinearCodec {
    /// Codec with full 16-bit decode.
    pub fn new() -> Self {
        Self {
            eight_bit_decode: false,
            encode_buf: RgbFrame::new(0, 0),
            decode_buf: DepthFrame::new(0, 0),
        }
    }

    /// Codec whose decode trusts only the most-significant byte (`G`).
    ///
    /// Lower fidelity (256 levels instead of 65536) but robust to transports
    /// that chroma-subsample or otherwise mangle the low channel.
    pub fn with_8bit_decode() -> Self {
        Self {
            eight_bit_decode: true,
            ..Self::new()
        }
    }
}

impl Default for LinearCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl DepthCodec for LinearCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Linear
    }

    fn name(&self) -> &'static str {
        "linear"
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

        self.encode_buf.ensure_size(depth.width(), depth.height());
        let span = range.span();

        self.encode_buf
            .data_mut()
            .par_chunks_exact_mut(3)
            .zip(depth.samples().par_iter())
            .for_each(|(px, &sample)| {
                let mut d = f64::from(sample);
                if d == 0.0 {
                    // no-data reads as farthest
                    d = range.max;
                }
                let t = (range.clamp(d) - range.min) * MAX_CODE / span;
                let code = (MAX_CODE - t) as u16;
                px[0] = (code & 0xFF) as u8;
                px[1] = (code >> 8) as u8;
                px[2] = 0;
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

        self.decode_buf.ensure_size(image.width(), image.height());
        let span = range.span();
        let eight_bit = self.eight_bit_decode;

        self.decode_buf
            .samples_mut()
            .par_iter_mut()
            .zip(image.data().par_chunks_exact(3))
            .for_each(|(out, px)| {
                let code = if eight_bit {
                    // 255 * 257 == 65535, so the 8-bit scale spans the full
                    // code space and the range endpoints stay reachable.
                    u32::from(px[1]) * 257
                } else {
                    u32::from(px[0]) | (u32::from(px[1]) << 8)
                };
                let t = 1.0 - f64::from(code) / MAX_CODE;
                *out = (range.min + t * span) as f32;
            });

        Ok(&self.decode_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mm_range() -> DepthRange {
        DepthRange::new(0.0, 6000.0).unwrap()
    }

    #[test]
    fn near_bound_takes_the_highest_code() {
        let depth = DepthFrame::from_samples(1, 1, vec![f32::MIN_POSITIVE]).unwrap();
        let mut codec = LinearCodec::new();
        let rgb = codec.encode(&depth, mm_range()).unwrap();
        // vanishingly close to the near bound → code 65535 → low 0xFF, high 0xFF
        assert_eq!(rgb.data(), &[0xFF, 0xFF, 0x00]);
    }

    #[test]
    fn far_bound_takes_code_zero() {
        let depth = DepthFrame::from_samples(1, 1, vec![6000.0]).unwrap();
        let mut codec = LinearCodec::new();
        let rgb = codec.encode(&depth, mm_range()).unwrap();
        assert_eq!(rgb.data(), &[0x00, 0x00, 0x00]);
    }

    #[test]
    fn halfway_sample_splits_the_code_space() {
        let depth = DepthFrame::from_samples(1, 1, vec![3000.0]).unwrap();
        let mut codec = LinearCodec::new();
        let rgb = codec.encode(&depth, mm_range()).unwrap().clone();
        // t = 32767.5 → code truncates to 32767 = 0x7FFF
        assert_eq!(rgb.data(), &[0xFF, 0x7F, 0x00]);

        let decoded = codec.decode(&rgb, mm_range()).unwrap();
        assert!((decoded.samples()[0] - 3000.0).abs() < 1.0);
    }

    #[test]
    fn eight_bit_decode_trusts_only_the_high_channel() {
        let mut rgb = RgbFrame::new(1, 1);
        // garbage in the low channel, 0x7F in the high channel
        rgb.data_mut().copy_from_slice(&[0x13, 0x7F, 0x00]);

        let mut codec = LinearCodec::with_8bit_decode();
        let decoded = codec.decode(&rgb, mm_range()).unwrap();
        let expected = 6000.0 * (1.0 - (0x7F as f64 * 257.0) / 65535.0);
        assert!((f64::from(decoded.samples()[0]) - expected).abs() < 1e-3);
    }

    #[test]
    fn empty_frame_is_rejected() {
        let mut codec = LinearCodec::new();
        assert_eq!(
            codec.encode(&DepthFrame::new(0, 0), mm_range()),
            Err(CodecError::EmptyFrame)
        );
    }
}
