//! Exrseq presents a directory of sequentially numbered OpenEXR images as a
//! continuous, seekable, rate-controllable video stream.
//!
//! The host application owns the render/display pipeline. It constructs a
//! [`SequencePlayer`] around a [`FrameDecoder`] capability, attaches a
//! [`VideoSink`] for decoded pixels, and drives playback:
//!
//! 1. **Open**: `exr://<directory>` is expanded into a lexically sorted frame
//!    manifest, and the first frame resolves dimensions and frame rate.
//! 2. **Tick**: each `tick(dt)` advances the playback clock by `rate * dt`,
//!    maps the new time to a frame index, and decodes-and-presents at most
//!    one frame into the attached sink.
//! 3. **Control**: `seek`, `set_rate`, and looping may be issued from a
//!    control thread concurrently with the tick thread; the whole session is
//!    guarded by one lock, so control changes are observed in full by the
//!    next tick, never torn.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No background threads**: all work happens on the caller's threads.
//! - **Non-fatal ticks**: per-tick failures are logged and retried on the
//!   next tick; the worst case is a stalled video track, never a crash.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod playback;

/// Decoder, sink, and source capabilities consumed and produced by the player.
pub mod media;
/// The session-oriented player surface.
pub mod player;
/// Open-time pipeline: frame manifest and sequence descriptor.
pub mod sequence;

pub use crate::foundation::core::{BufferMode, Dimensions, PixelFormat, PlayState};
pub use crate::foundation::error::{ExrSeqError, ExrSeqResult};
pub use crate::media::decode::{FrameDecoder, FrameReader, ImageFrameDecoder};
pub use crate::media::sink::{InMemorySink, SharedSink, VideoSink, shared_sink};
pub use crate::media::source::{
    FPS_OVERRIDE_OPTION, NoOptions, PlayerOptions, SequenceSource, URL_SCHEME,
    sequence_path_from_url,
};
pub use crate::player::events::MediaEvent;
pub use crate::player::sequence_player::{SequencePlayer, TrackType};
pub use crate::sequence::descriptor::{DEFAULT_FRAME_RATE, SequenceDescriptor, resolve_descriptor};
pub use crate::sequence::manifest::{SEQUENCE_EXTENSION, build_manifest};
