use std::sync::Weak;

use crate::foundation::core::{BufferMode, PixelFormat};
use crate::foundation::error::ExrSeqError;
use crate::media::decode::FrameDecoder;
use crate::media::sink::lock_sink;
use crate::playback::session::Session;

/// Map a playback position to a manifest index.
///
/// The raw index is `floor(time * frame_rate)`, clamped into
/// `[0, frame_count - 1]` before any use. Out-of-range positions (forward
/// overrun without looping, or negative time from reverse playback) hold the
/// boundary frame rather than fault; combined with the redundant-tick guard
/// this means overrun playback decodes the boundary frame once and then goes
/// quiet.
pub(crate) fn schedule_frame_index(time: f64, frame_rate: f64, frame_count: usize) -> usize {
    debug_assert!(frame_count > 0);
    let last = frame_count - 1;
    let raw = (time * frame_rate).floor();
    if raw <= 0.0 {
        0
    } else if raw >= last as f64 {
        last
    } else {
        raw as usize
    }
}

/// Decode-and-present step of one tick. The caller holds the session lock
/// for the whole call.
///
/// Presents at most one frame. Every failure path is non-fatal: it logs,
/// leaves `last_presented_frame` untouched so the next tick retries the same
/// frame, and returns.
pub(crate) fn tick_video(session: &mut Session, decoder: &dyn FrameDecoder) {
    if session.frame_paths.is_empty() {
        return;
    }
    let Some(sink) = session.sink.as_ref().and_then(Weak::upgrade) else {
        return;
    };

    let frame_index = schedule_frame_index(
        session.clock.current_time,
        session.frame_rate,
        session.frame_count(),
    );
    if Some(frame_index) == session.last_presented_frame {
        return;
    }

    let path = &session.frame_paths[frame_index];
    let mut reader = match decoder.open_frame(path) {
        Ok(reader) => reader,
        Err(err) => {
            tracing::warn!(frame = frame_index, path = %path.display(), %err, "frame decode failed, tick skipped");
            return;
        }
    };

    let frame_dim = reader.data_window();
    if frame_dim != session.dimensions {
        // Non-fatal: the copy below still goes through the session's fixed
        // dimensions and stride, so the presented frame may look cropped or
        // corrupted.
        tracing::warn!(
            path = %path.display(),
            frame = %frame_dim,
            sequence = %session.dimensions,
            "frame does not match the sequence dimensions"
        );
    }

    let mut sink = lock_sink(&sink);

    if sink.dimensions() != session.dimensions
        && !sink.initialize(
            session.dimensions,
            PixelFormat::FloatRgba,
            BufferMode::Unbuffered,
        )
    {
        tracing::warn!(dimensions = %session.dimensions, "sink refused resize, tick skipped");
        return;
    }

    let Some(buffer) = sink.acquire_buffer() else {
        let err = ExrSeqError::sink_unavailable("no pixel buffer available");
        tracing::warn!(frame = frame_index, %err, "tick skipped");
        return;
    };

    if let Err(err) = reader.read_pixels(buffer, session.dimensions) {
        tracing::warn!(frame = frame_index, path = %path.display(), %err, "frame read failed, tick skipped");
        sink.release_buffer();
        return;
    }

    sink.release_buffer();
    sink.present(session.clock.current_time);
    session.last_presented_frame = Some(frame_index);
}
