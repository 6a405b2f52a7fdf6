use tracing::debug;

use crate::error::CodecError;

/// Dense W×H buffer of `f32` depth samples, row-major.
///
/// Samples are unit-agnostic but must be consistent with the [`DepthRange`]
/// handed to the codec (the CLI convention is millimeters). The value `0.0`
/// is the reserved no-data sentinel; each codec documents how it maps it.
///
/// Codecs keep one `DepthFrame` as reusable decode scratch and hand it back
/// by reference, so a decoded frame is valid until the next call on the same
/// codec instance.
///
/// [`DepthRange`]: crate::DepthRange
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl DepthFrame {
    /// Zero-filled frame (all pixels no-data).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            samples: vec![0.0; width as usize * height as usize],
        }
    }

    /// Wrap an existing sample vector, checking it matches the dimensions.
    pub fn from_samples(width: u32, height: u32, samples: Vec<f32>) -> Result<Self, CodecError> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(CodecError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Widen 16-bit sensor samples (the common depth-camera wire format).
    pub fn from_u16_samples(width: u32, height: u32, samples: &[u16]) -> Result<Self, CodecError> {
        let widened = samples.iter().map(|&d| f32::from(d)).collect();
        Self::from_samples(width, height, widened)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Make the frame exactly `width`×`height`, reallocating only when the
    /// dimensions actually changed. Codecs call this once at the top of each
    /// frame; steady-state streaming therefore allocates nothing.
    pub fn ensure_size(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        debug!(
            old_width = self.width,
            old_height = self.height,
            width,
            height,
            "reallocating depth scratch buffer"
        );
        self.width = width;
        self.height = height;
        self.samples.clear();
        self.samples
            .resize(width as usize * height as usize, 0.0);
    }
}

/// Dense W×H buffer of interleaved 8-bit RGB triples, row-major.
///
/// The channel layout a codec writes here must be identical between its own
/// `encode` and `decode`; each codec documents its assignment. The buffer
/// doubles as the codec's reusable encode scratch (same reuse contract as
/// [`DepthFrame`]).
#[derive(Debug, Clone, PartialEq)]
pub struct RgbFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbFrame {
    /// Black frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Wrap an existing interleaved RGB buffer, checking it matches the
    /// dimensions (3 bytes per pixel).
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CodecError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(CodecError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Interleaved RGB bytes, `width * height * 3` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Same contract as [`DepthFrame::ensure_size`].
    pub fn ensure_size(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        debug!(
            old_width = self.width,
            old_height = self.height,
            width,
            height,
            "reallocating color scratch buffer"
        );
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width as usize * height as usize * 3, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_checks_length() {
        assert!(DepthFrame::from_samples(4, 4, vec![0.0; 16]).is_ok());
        assert!(matches!(
            DepthFrame::from_samples(4, 4, vec![0.0; 15]),
            Err(CodecError::BufferSizeMismatch { expected: 16, actual: 15, .. })
        ));
    }

    #[test]
    fn from_raw_expects_three_bytes_per_pixel() {
        assert!(RgbFrame::from_raw(2, 2, vec![0; 12]).is_ok());
        assert!(RgbFrame::from_raw(2, 2, vec![0; 4]).is_err());
    }

    #[test]
    fn ensure_size_reuses_allocation_for_equal_dimensions() {
        let mut frame = RgbFrame::new(8, 8);
        let ptr = frame.data().as_ptr();
        frame.ensure_size(8, 8);
        assert_eq!(frame.data().as_ptr(), ptr);

        frame.ensure_size(16, 8);
        assert_eq!(frame.data().len(), 16 * 8 * 3);
    }

    #[test]
    fn u16_widening_preserves_values() {
        let frame = DepthFrame::from_u16_samples(2, 1, &[0, 6000]).unwrap();
        assert_eq!(frame.samples(), &[0.0, 6000.0]);
    }
}
