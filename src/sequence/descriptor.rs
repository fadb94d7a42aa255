use std::path::PathBuf;

use crate::foundation::core::Dimensions;
use crate::foundation::error::{ExrSeqError, ExrSeqResult};
use crate::media::decode::FrameDecoder;

/// Fallback frame rate when neither an override nor an embedded attribute is
/// present (or either is non-positive).
pub const DEFAULT_FRAME_RATE: f64 = 24.0;

/// Resolved dimensions, frame rate, and duration of an open sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequenceDescriptor {
    /// Pixel dimensions of the sequence, taken from the first frame. Every
    /// subsequent frame is validated against these and the sink is sized to
    /// them.
    pub dimensions: Dimensions,
    /// Resolved frames per second, always positive.
    pub frame_rate: f64,
    /// Total duration in seconds: `frame_count / frame_rate`.
    pub duration: f64,
}

/// Resolve a sequence descriptor from the first frame of `manifest`.
///
/// Only the first frame's header is read; no pixel data is decoded. The
/// frame rate is chosen by precedence, first positive value wins:
/// `rate_override`, then the frame's embedded rate attribute, then
/// [`DEFAULT_FRAME_RATE`].
///
/// Fails with [`ExrSeqError::InvalidDataWindow`] when the first frame
/// reports a zero-sized data window; this aborts the open operation.
pub fn resolve_descriptor(
    decoder: &dyn FrameDecoder,
    manifest: &[PathBuf],
    rate_override: f64,
) -> ExrSeqResult<SequenceDescriptor> {
    let first = manifest.first().ok_or_else(|| {
        ExrSeqError::no_matching_files("cannot resolve a descriptor for an empty manifest")
    })?;

    let reader = decoder.open_frame(first)?;

    let dimensions = reader.data_window();
    if dimensions.is_empty() {
        return Err(ExrSeqError::invalid_data_window(format!(
            "first frame '{}' reports a {} data window",
            first.display(),
            dimensions
        )));
    }

    let mut frame_rate = rate_override;
    if frame_rate <= 0.0 {
        frame_rate = reader.embedded_frame_rate(DEFAULT_FRAME_RATE);
    }
    if frame_rate <= 0.0 {
        frame_rate = DEFAULT_FRAME_RATE;
    }

    Ok(SequenceDescriptor {
        dimensions,
        frame_rate,
        duration: manifest.len() as f64 / frame_rate,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::media::decode::FrameReader;

    /// Scripted decoder that serves a fixed header without touching the
    /// filesystem.
    struct FakeDecoder {
        dim: Dimensions,
        embedded_rate: Option<f64>,
    }

    #[derive(Debug)]
    struct FakeReader {
        dim: Dimensions,
        embedded_rate: Option<f64>,
    }

    impl FrameDecoder for FakeDecoder {
        fn open_frame(&self, _path: &Path) -> ExrSeqResult<Box<dyn FrameReader>> {
            Ok(Box::new(FakeReader {
                dim: self.dim,
                embedded_rate: self.embedded_rate,
            }))
        }
    }

    impl FrameReader for FakeReader {
        fn data_window(&self) -> Dimensions {
            self.dim
        }

        fn embedded_frame_rate(&self, default: f64) -> f64 {
            self.embedded_rate.unwrap_or(default)
        }

        fn read_pixels(&mut self, _target: &mut [f32], _dim: Dimensions) -> ExrSeqResult<()> {
            Ok(())
        }
    }

    fn manifest(frames: usize) -> Vec<PathBuf> {
        (0..frames)
            .map(|i| PathBuf::from(format!("/seq/frame_{i:04}.exr")))
            .collect()
    }

    #[test]
    fn override_wins_over_embedded_rate() {
        let decoder = FakeDecoder {
            dim: Dimensions::new(8, 8),
            embedded_rate: Some(24.0),
        };
        let d = resolve_descriptor(&decoder, &manifest(30), 30.0).unwrap();
        assert_eq!(d.frame_rate, 30.0);
        assert_eq!(d.duration, 1.0);
    }

    #[test]
    fn embedded_rate_wins_over_default() {
        let decoder = FakeDecoder {
            dim: Dimensions::new(8, 8),
            embedded_rate: Some(48.0),
        };
        let d = resolve_descriptor(&decoder, &manifest(48), 0.0).unwrap();
        assert_eq!(d.frame_rate, 48.0);
        assert_eq!(d.duration, 1.0);
    }

    #[test]
    fn default_applies_without_override_or_embedded_rate() {
        let decoder = FakeDecoder {
            dim: Dimensions::new(8, 8),
            embedded_rate: None,
        };
        let d = resolve_descriptor(&decoder, &manifest(12), 0.0).unwrap();
        assert_eq!(d.frame_rate, DEFAULT_FRAME_RATE);
        assert_eq!(d.duration, 0.5);
    }

    #[test]
    fn non_positive_embedded_rate_falls_back_to_default() {
        let decoder = FakeDecoder {
            dim: Dimensions::new(8, 8),
            embedded_rate: Some(0.0),
        };
        let d = resolve_descriptor(&decoder, &manifest(24), 0.0).unwrap();
        assert_eq!(d.frame_rate, DEFAULT_FRAME_RATE);
    }

    #[test]
    fn duration_is_frame_count_over_rate() {
        let decoder = FakeDecoder {
            dim: Dimensions::new(8, 8),
            embedded_rate: None,
        };
        let d = resolve_descriptor(&decoder, &manifest(10), 0.0).unwrap();
        assert_eq!(d.duration, 10.0 / 24.0);
    }

    #[test]
    fn zero_sized_data_window_is_rejected() {
        let decoder = FakeDecoder {
            dim: Dimensions::new(0, 8),
            embedded_rate: None,
        };
        let err = resolve_descriptor(&decoder, &manifest(4), 0.0).unwrap_err();
        assert!(matches!(err, ExrSeqError::InvalidDataWindow(_)));
    }
}
