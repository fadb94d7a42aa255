use std::path::PathBuf;
use std::sync::{Mutex, Weak};

use crate::foundation::core::{Dimensions, PlayState};
use crate::media::sink::VideoSink;
use crate::playback::clock::PlaybackClock;

/// Complete state of one open media instance.
///
/// A session is populated wholesale inside `open` and reset wholesale inside
/// `close`; no partially open state is ever observable. All access goes
/// through the player's single session lock.
#[derive(Default)]
pub(crate) struct Session {
    /// Source URL; empty iff the session is closed.
    pub(crate) url: String,
    /// Lexically sorted frame paths; immutable after open.
    pub(crate) frame_paths: Vec<PathBuf>,
    /// Pixel dimensions from the first frame; validates every other frame
    /// and sizes the sink.
    pub(crate) dimensions: Dimensions,
    /// Resolved frames per second; never zero while the session is open.
    pub(crate) frame_rate: f64,
    /// Total duration in seconds; zero iff no frames are loaded.
    pub(crate) duration: f64,
    /// Position, rate, and loop flag.
    pub(crate) clock: PlaybackClock,
    /// Last frame index actually decoded and presented; drives the
    /// redundant-tick guard. Reset on open, close, and seek.
    pub(crate) last_presented_frame: Option<usize>,
    /// Selected video track; `None` until the host selects track 0.
    pub(crate) selected_video_track: Option<usize>,
    /// Human-readable media summary built at open.
    pub(crate) info: String,
    /// Borrowed sink reference; the host owns the sink, the session only
    /// observes it while attached.
    pub(crate) sink: Option<Weak<Mutex<dyn VideoSink + Send>>>,
}

impl Session {
    pub(crate) fn is_open(&self) -> bool {
        !self.url.is_empty()
    }

    pub(crate) fn frame_count(&self) -> usize {
        self.frame_paths.len()
    }

    /// Derived playback state; never stored separately.
    pub(crate) fn play_state(&self) -> PlayState {
        if !self.is_open() {
            PlayState::Closed
        } else if self.clock.rate == 0.0 {
            PlayState::Paused
        } else {
            PlayState::Playing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_is_closed() {
        let session = Session::default();
        assert!(!session.is_open());
        assert_eq!(session.play_state(), PlayState::Closed);
        assert_eq!(session.frame_count(), 0);
        assert_eq!(session.duration, 0.0);
    }

    #[test]
    fn play_state_derives_from_url_and_rate() {
        let mut session = Session {
            url: "exr:///seq".to_owned(),
            ..Default::default()
        };
        assert_eq!(session.play_state(), PlayState::Paused);

        session.clock.rate = -1.0;
        assert_eq!(session.play_state(), PlayState::Playing);

        session.url.clear();
        assert_eq!(session.play_state(), PlayState::Closed);
    }
}
