use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::foundation::core::{BufferMode, Dimensions, PixelFormat, PlayState};
use crate::foundation::error::{ExrSeqError, ExrSeqResult};
use crate::media::decode::{FrameDecoder, ImageFrameDecoder};
use crate::media::sink::{SharedSink, VideoSink, lock_sink};
use crate::media::source::{FPS_OVERRIDE_OPTION, PlayerOptions, sequence_path_from_url};
use crate::player::events::{EventBroadcaster, MediaEvent};
use crate::playback::clock::PlaybackClock;
use crate::playback::scheduler::tick_video;
use crate::playback::session::Session;
use crate::sequence::descriptor::resolve_descriptor;
use crate::sequence::manifest::build_manifest;

/// Kind of track addressed by the track accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TrackType {
    /// Audio tracks; this player never exposes any.
    Audio,
    /// Video tracks; exactly one exists while a session is open.
    Video,
}

/// Media player presenting an EXR image-sequence directory as a video
/// stream.
///
/// One mutual-exclusion lock guards the whole session, serializing the
/// control path (`open`, `close`, `seek`, `set_rate`, `set_sink`, track
/// queries) against the tick path (`tick`). A control call that lands
/// between two ticks is observed in full by the next tick, never torn.
///
/// Open-time validation failures report `false` and leave the player
/// `Closed` with no partial state; per-tick failures are logged, skip that
/// tick's presentation, and are retried on the next tick.
pub struct SequencePlayer {
    decoder: Box<dyn FrameDecoder>,
    session: Mutex<Session>,
    events: EventBroadcaster,
}

impl Default for SequencePlayer {
    fn default() -> Self {
        Self::new(Box::new(ImageFrameDecoder))
    }
}

impl Drop for SequencePlayer {
    fn drop(&mut self) {
        self.close();
    }
}

impl SequencePlayer {
    /// Create a player around an injected decoder capability.
    pub fn new(decoder: Box<dyn FrameDecoder>) -> Self {
        Self {
            decoder,
            session: Mutex::new(Session::default()),
            events: EventBroadcaster::default(),
        }
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        // A panic on the tick path only ever leaves a structurally valid
        // session behind, so a poisoned lock is recoverable.
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -- lifecycle ----------------------------------------------------------

    /// Open the image sequence at `url` (`exr://<directory>`).
    ///
    /// Any previously open media is closed first. Returns `false` on a
    /// malformed URL, an empty directory, or an invalid first frame; the
    /// player then stays `Closed` with all partial state discarded.
    pub fn open(&self, url: &str, options: &dyn PlayerOptions) -> bool {
        self.close();

        match self.try_open(url, options) {
            Ok(()) => {
                self.events.broadcast(MediaEvent::TracksChanged);
                self.events.broadcast(MediaEvent::MediaOpened);
                true
            }
            Err(err) => {
                tracing::warn!(url, %err, "failed to open image sequence");
                false
            }
        }
    }

    #[tracing::instrument(skip(self, options))]
    fn try_open(&self, url: &str, options: &dyn PlayerOptions) -> ExrSeqResult<()> {
        let directory = sequence_path_from_url(url)?;
        let frame_paths = build_manifest(&directory)?;
        let rate_override = options.media_option(FPS_OVERRIDE_OPTION, 0.0);
        let descriptor = resolve_descriptor(self.decoder.as_ref(), &frame_paths, rate_override)?;

        tracing::debug!(
            frames = frame_paths.len(),
            dimensions = %descriptor.dimensions,
            rate = descriptor.frame_rate,
            "opened image sequence"
        );

        let info = format!(
            "Image Sequence\n    Dimensions: {}\n    Frames: {}\n    FPS: {}\n",
            descriptor.dimensions,
            frame_paths.len(),
            descriptor.frame_rate
        );

        // All fallible work is done; commit the new session under the lock.
        let mut session = self.lock_session();
        session.url = url.to_owned();
        session.frame_paths = frame_paths;
        session.dimensions = descriptor.dimensions;
        session.frame_rate = descriptor.frame_rate;
        session.duration = descriptor.duration;
        session.clock = PlaybackClock::default();
        session.last_presented_frame = None;
        session.selected_video_track = None;
        session.info = info;

        Ok(())
    }

    /// Close the open media, if any.
    ///
    /// Idempotent: closing an already-closed player is a no-op. An actual
    /// close resets every session field atomically under the lock, shuts
    /// down the attached sink's buffer, drops the sink attachment (the sink
    /// object itself stays with the host), and then broadcasts
    /// [`MediaEvent::TracksChanged`] and [`MediaEvent::MediaClosed`].
    pub fn close(&self) {
        {
            let mut session = self.lock_session();
            if !session.is_open() {
                return;
            }
            tracing::debug!(url = %session.url, "closing image sequence");
            if let Some(sink) = attached(&session.sink) {
                lock_sink(&sink).shutdown();
            }
            *session = Session::default();
        }

        self.events.broadcast(MediaEvent::TracksChanged);
        self.events.broadcast(MediaEvent::MediaClosed);
    }

    // -- playback -----------------------------------------------------------

    /// Advance playback by `delta_time` seconds of wall time and present at
    /// most one frame into the attached sink.
    ///
    /// A no-op when closed. Never reports failure: decode errors and sink
    /// refusals are logged and retried on the next tick.
    pub fn tick(&self, delta_time: f64) {
        let mut session = self.lock_session();
        if !session.is_open() {
            return;
        }
        let duration = session.duration;
        session.clock.advance(delta_time, duration);
        tick_video(&mut session, self.decoder.as_ref());
    }

    /// Jump to `time` seconds. The time is stored verbatim (no clamping) and
    /// the next tick re-presents the frame it maps to.
    ///
    /// Fails (returns `false`, no state change) when no media is open.
    pub fn seek(&self, time: f64) -> bool {
        let mut session = self.lock_session();
        if let Err(err) = require_open(&session, "seek") {
            tracing::debug!(%err, "seek ignored");
            return false;
        }
        session.clock.seek(time);
        session.last_presented_frame = None;
        true
    }

    /// Set the signed playback rate multiplier; 0 pauses.
    ///
    /// Fails (returns `false`) when no media is open.
    pub fn set_rate(&self, rate: f64) -> bool {
        let mut session = self.lock_session();
        if let Err(err) = require_open(&session, "set_rate") {
            tracing::debug!(%err, "set_rate ignored");
            return false;
        }
        session.clock.rate = rate;
        true
    }

    /// Current playback rate; 0.0 when closed.
    pub fn rate(&self) -> f64 {
        let session = self.lock_session();
        if session.is_open() { session.clock.rate } else { 0.0 }
    }

    /// Enable or disable looping at the duration boundary.
    pub fn set_looping(&self, looping: bool) -> bool {
        self.lock_session().clock.looping = looping;
        true
    }

    /// Return `true` when playback wraps at the duration boundary.
    pub fn is_looping(&self) -> bool {
        self.lock_session().clock.looping
    }

    /// Derived playback state: `Closed`, else `Paused` iff the rate is zero,
    /// else `Playing`.
    pub fn state(&self) -> PlayState {
        self.lock_session().play_state()
    }

    /// Total duration in seconds; 0.0 when closed.
    pub fn duration(&self) -> f64 {
        self.lock_session().duration
    }

    /// Current playback position in seconds; 0.0 when closed.
    pub fn time(&self) -> f64 {
        self.lock_session().clock.current_time
    }

    /// URL of the open media; empty when closed.
    pub fn url(&self) -> String {
        self.lock_session().url.clone()
    }

    /// Human-readable summary of the open media; empty when closed.
    pub fn info(&self) -> String {
        self.lock_session().info.clone()
    }

    /// Rates accepted by [`SequencePlayer::set_rate`].
    pub fn supported_rates(&self) -> RangeInclusive<f64> {
        0.0..=100_000.0
    }

    /// This player always supports seeking.
    pub fn supports_seeking(&self) -> bool {
        true
    }

    /// This player always supports scrubbing.
    pub fn supports_scrubbing(&self) -> bool {
        true
    }

    // -- sink ---------------------------------------------------------------

    /// Attach `sink` as the destination for decoded frames.
    ///
    /// Re-attaching the currently attached sink is a no-op. Otherwise the
    /// old sink (if any) is told to shut down its buffer and the new sink is
    /// initialized to the session's current dimensions (zero-sized when no
    /// media is open; the first tick after open resizes it).
    ///
    /// The player keeps only a weak reference: the host owns the sink and
    /// may drop it at any time, which the player treats as a detached sink.
    pub fn set_sink(&self, sink: SharedSink) {
        let mut session = self.lock_session();

        if let Some(current) = attached(&session.sink)
            && Arc::ptr_eq(&current, &sink)
        {
            return;
        }

        if let Some(old) = attached(&session.sink) {
            lock_sink(&old).shutdown();
        }

        let dimensions = session.dimensions;
        if !lock_sink(&sink).initialize(dimensions, PixelFormat::FloatRgba, BufferMode::Unbuffered) {
            tracing::warn!(%dimensions, "sink refused its initial buffer");
        }
        session.sink = Some(Arc::downgrade(&sink));
    }

    /// Detach the current sink, shutting down its buffer. The sink object
    /// itself stays with the host.
    pub fn clear_sink(&self) {
        let mut session = self.lock_session();
        if let Some(old) = attached(&session.sink) {
            lock_sink(&old).shutdown();
        }
        session.sink = None;
    }

    // -- events -------------------------------------------------------------

    /// Register an observer for open/close notifications.
    ///
    /// Observers are invoked synchronously, in registration order, on the
    /// thread performing the transition.
    pub fn on_event(&self, callback: impl FnMut(MediaEvent) + Send + 'static) {
        self.events.subscribe(callback);
    }

    // -- tracks -------------------------------------------------------------

    /// Number of tracks of `kind`: one video track while open, zero
    /// otherwise.
    pub fn track_count(&self, kind: TrackType) -> usize {
        let session = self.lock_session();
        if session.is_open() && kind == TrackType::Video {
            1
        } else {
            0
        }
    }

    /// Index of the selected track of `kind`, if any.
    pub fn selected_track(&self, kind: TrackType) -> Option<usize> {
        let session = self.lock_session();
        if session.is_open() && kind == TrackType::Video {
            session.selected_video_track
        } else {
            None
        }
    }

    /// Select the track at `index`. Only the video track at index 0 exists;
    /// anything else fails.
    pub fn select_track(&self, kind: TrackType, index: usize) -> bool {
        let mut session = self.lock_session();
        if !session.is_open() || kind != TrackType::Video || index != 0 {
            return false;
        }
        session.selected_video_track = Some(index);
        true
    }

    /// Internal name of the track at `index`; empty when unavailable.
    pub fn track_name(&self, kind: TrackType, index: usize) -> String {
        if self.has_track(kind, index) {
            "VideoTrack".to_owned()
        } else {
            String::new()
        }
    }

    /// Display name of the track at `index`; empty when unavailable.
    pub fn track_display_name(&self, kind: TrackType, index: usize) -> String {
        if self.has_track(kind, index) {
            "Video Track".to_owned()
        } else {
            String::new()
        }
    }

    /// ISO 639 language of the track at `index`; image sequences carry no
    /// language, so the open video track reports `"und"`.
    pub fn track_language(&self, kind: TrackType, index: usize) -> String {
        if self.has_track(kind, index) {
            "und".to_owned()
        } else {
            String::new()
        }
    }

    /// Pixel dimensions of the video track at `index`.
    pub fn video_track_dimensions(&self, index: usize) -> Option<Dimensions> {
        let session = self.lock_session();
        (session.is_open() && index == 0).then_some(session.dimensions)
    }

    /// Frame rate of the video track at `index`.
    pub fn video_track_frame_rate(&self, index: usize) -> Option<f64> {
        let session = self.lock_session();
        (session.is_open() && index == 0).then_some(session.frame_rate)
    }

    /// Nominal data rate of the video track at `index`, in bytes per frame
    /// of one float plane.
    pub fn video_track_bit_rate(&self, index: usize) -> Option<u64> {
        let session = self.lock_session();
        (session.is_open() && index == 0)
            .then(|| session.dimensions.pixel_count() as u64 * size_of::<f32>() as u64)
    }

    fn has_track(&self, kind: TrackType, index: usize) -> bool {
        let session = self.lock_session();
        session.is_open() && kind == TrackType::Video && index == 0
    }
}

fn attached(sink: &Option<Weak<Mutex<dyn VideoSink + Send>>>) -> Option<SharedSink> {
    sink.as_ref().and_then(Weak::upgrade)
}

fn require_open(session: &Session, op: &str) -> ExrSeqResult<()> {
    if session.is_open() {
        Ok(())
    } else {
        Err(ExrSeqError::closed(format!(
            "{op} requires an open session"
        )))
    }
}
