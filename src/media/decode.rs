use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::Dimensions;
use crate::foundation::error::{ExrSeqError, ExrSeqResult};

/// One opened frame file.
///
/// A reader is cheap to open: header data (dimensions, embedded attributes)
/// must be available without decoding pixel rows, so that resolving a
/// sequence descriptor does not pay for a full decode.
pub trait FrameReader: std::fmt::Debug {
    /// Pixel dimensions of the frame's data window.
    fn data_window(&self) -> Dimensions;

    /// Frame rate embedded in the frame's metadata, or `default` when the
    /// format or file carries no such attribute.
    fn embedded_frame_rate(&self, default: f64) -> f64;

    /// Decode pixel rows into `target`, an interleaved RGBA `f32` buffer laid
    /// out with `target_dim`'s stride.
    ///
    /// The copy is clamped row-by-row to the overlap of the frame and
    /// `target_dim`: a frame larger or smaller than the target yields a
    /// cropped or partially filled buffer rather than an error.
    fn read_pixels(&mut self, target: &mut [f32], target_dim: Dimensions) -> ExrSeqResult<()>;
}

/// Decoder capability consumed by the playback engine.
///
/// Implementations are injected into the player at construction; the engine
/// itself never names a concrete codec.
pub trait FrameDecoder: Send + Sync {
    /// Open one frame file for header inspection and pixel reads.
    fn open_frame(&self, path: &Path) -> ExrSeqResult<Box<dyn FrameReader>>;
}

/// Built-in decoder backed by the `image` crate's OpenEXR codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageFrameDecoder;

impl FrameDecoder for ImageFrameDecoder {
    fn open_frame(&self, path: &Path) -> ExrSeqResult<Box<dyn FrameReader>> {
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("read image header of '{}'", path.display()))?;

        Ok(Box::new(ImageFrameReader {
            path: path.to_path_buf(),
            dim: Dimensions::new(width, height),
        }))
    }
}

/// Lazy per-frame reader: the header is read at open time, pixel data only
/// when [`FrameReader::read_pixels`] runs.
#[derive(Debug)]
struct ImageFrameReader {
    path: PathBuf,
    dim: Dimensions,
}

impl FrameReader for ImageFrameReader {
    fn data_window(&self) -> Dimensions {
        self.dim
    }

    fn embedded_frame_rate(&self, default: f64) -> f64 {
        // The `image` EXR codec does not surface header attributes such as
        // `framesPerSecond`, so the sequence-level default always applies.
        default
    }

    fn read_pixels(&mut self, target: &mut [f32], target_dim: Dimensions) -> ExrSeqResult<()> {
        if target.len() < target_dim.float_len() {
            return Err(ExrSeqError::decode_failure(format!(
                "target buffer holds {} floats, {} required for {}",
                target.len(),
                target_dim.float_len(),
                target_dim
            )));
        }

        let frame = image::open(&self.path)
            .map_err(|e| {
                ExrSeqError::decode_failure(format!(
                    "read pixel data of '{}': {e}",
                    self.path.display()
                ))
            })?
            .into_rgba32f();

        let src = frame.as_raw();
        let src_stride = frame.width() as usize * 4;
        let dst_stride = target_dim.width as usize * 4;
        let copy_w = (frame.width().min(target_dim.width) as usize) * 4;
        let copy_h = frame.height().min(target_dim.height) as usize;

        for y in 0..copy_h {
            let s = &src[y * src_stride..y * src_stride + copy_w];
            let d = &mut target[y * dst_stride..y * dst_stride + copy_w];
            d.copy_from_slice(s);
        }

        Ok(())
    }
}
