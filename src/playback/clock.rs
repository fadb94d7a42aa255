/// Wall-clock-driven playback position.
///
/// Pure time keeping; no decoding happens here. The clock is advanced once
/// per tick by `rate * delta` and wraps into `[0, duration)` only when
/// looping. Without looping the position is left unclamped and out-of-range
/// values flow to the scheduler, which holds the boundary frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct PlaybackClock {
    /// Current playback position in seconds.
    pub(crate) current_time: f64,
    /// Signed playback rate multiplier; 0 means paused.
    pub(crate) rate: f64,
    /// Wrap at the duration boundary instead of running past it.
    pub(crate) looping: bool,
}

impl PlaybackClock {
    /// Advance by `delta` seconds of wall time.
    ///
    /// `duration` must be positive for the looping wrap to apply; callers
    /// guard the closed (`duration == 0`) case by not ticking at all.
    pub(crate) fn advance(&mut self, delta: f64, duration: f64) {
        self.current_time += self.rate * delta;
        if self.looping && duration > 0.0 {
            self.current_time = self.current_time.rem_euclid(duration);
        }
    }

    /// Set the position verbatim; no clamping is applied.
    pub(crate) fn seek(&mut self, time: f64) {
        self.current_time = time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_scales_by_rate() {
        let mut clock = PlaybackClock {
            rate: 2.0,
            ..Default::default()
        };
        clock.advance(0.25, 10.0);
        assert_eq!(clock.current_time, 0.5);
    }

    #[test]
    fn zero_rate_holds_position() {
        let mut clock = PlaybackClock {
            current_time: 1.5,
            ..Default::default()
        };
        clock.advance(5.0, 10.0);
        assert_eq!(clock.current_time, 1.5);
    }

    #[test]
    fn looping_wraps_into_duration() {
        let mut clock = PlaybackClock {
            rate: 1.0,
            looping: true,
            ..Default::default()
        };
        clock.advance(2.5, 2.0);
        assert!((clock.current_time - 0.5).abs() < 1e-12);
    }

    #[test]
    fn looping_wraps_negative_time_from_the_end() {
        let mut clock = PlaybackClock {
            rate: -1.0,
            looping: true,
            ..Default::default()
        };
        clock.advance(0.5, 2.0);
        assert!((clock.current_time - 1.5).abs() < 1e-12);
    }

    #[test]
    fn non_looping_overrun_is_not_clamped() {
        let mut clock = PlaybackClock {
            rate: 1.0,
            ..Default::default()
        };
        clock.advance(3.5, 2.0);
        assert_eq!(clock.current_time, 3.5);
    }

    #[test]
    fn seek_stores_time_verbatim() {
        let mut clock = PlaybackClock::default();
        clock.seek(-4.25);
        assert_eq!(clock.current_time, -4.25);
        clock.seek(99.0);
        assert_eq!(clock.current_time, 99.0);
    }
}
