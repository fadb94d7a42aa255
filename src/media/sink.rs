use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::foundation::core::{BufferMode, Dimensions, PixelFormat};

/// Destination for decoded pixel buffers, owned by the host.
///
/// The player never owns a sink: it observes one through a [`SharedSink`]
/// handle and calls these methods only while holding its own session lock,
/// so one tick's acquire/write/release/present sequence is never interleaved
/// with another.
pub trait VideoSink: Send {
    /// Resize the sink's buffer to `dim`. Returns `false` when the sink
    /// cannot provide a buffer of that shape.
    fn initialize(&mut self, dim: Dimensions, format: PixelFormat, mode: BufferMode) -> bool;

    /// Dimensions the sink is currently configured for.
    fn dimensions(&self) -> Dimensions;

    /// Borrow the write buffer for one frame, or `None` when no buffer is
    /// available right now.
    fn acquire_buffer(&mut self) -> Option<&mut [f32]>;

    /// Return the buffer acquired by [`VideoSink::acquire_buffer`].
    fn release_buffer(&mut self);

    /// Display the released buffer at the given playback timestamp.
    fn present(&mut self, timestamp: f64);

    /// Tear down the sink's buffer. The sink object itself stays usable and
    /// may be re-initialized later.
    fn shutdown(&mut self);
}

/// Shared handle under which a host hands its sink to the player.
///
/// The sink is externally synchronized behind this mutex; the player keeps
/// only a `Weak` reference and treats a dead handle as a detached sink.
pub type SharedSink = Arc<Mutex<dyn VideoSink + Send>>;

/// Wrap a sink implementation into a shared handle.
///
/// The returned handle keeps the concrete sink type, so the host can still
/// reach the sink's own methods; a clone coerces to [`SharedSink`] when
/// passed to the player.
pub fn shared_sink<S: VideoSink + 'static>(sink: S) -> Arc<Mutex<S>> {
    Arc::new(Mutex::new(sink))
}

/// Lock a sink handle, recovering from poisoning.
///
/// A panic in host code while the sink lock was held leaves the sink in
/// whatever state the host produced; per-tick sink failures are non-fatal to
/// the player either way.
pub(crate) fn lock_sink<'a>(
    sink: &'a Mutex<dyn VideoSink + Send + 'static>,
) -> MutexGuard<'a, dyn VideoSink + Send + 'static> {
    sink.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory sink for tests, demos, and headless hosts.
///
/// Records initialize/present/shutdown activity and retains the pixels of
/// the last written frame.
#[derive(Debug, Default)]
pub struct InMemorySink {
    dim: Dimensions,
    buffer: Vec<f32>,
    refusing: bool,
    acquired: bool,
    presented: Vec<f64>,
    initialize_calls: usize,
    shutdown_calls: usize,
}

impl InMemorySink {
    /// Create a new, zero-sized sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make [`VideoSink::acquire_buffer`] return `None` until reset.
    pub fn set_refusing(&mut self, refusing: bool) {
        self.refusing = refusing;
    }

    /// Pixels of the last written frame (empty before the first present).
    pub fn frame_data(&self) -> &[f32] {
        &self.buffer
    }

    /// Timestamps passed to [`VideoSink::present`], in call order.
    pub fn presented(&self) -> &[f64] {
        &self.presented
    }

    /// Number of frames presented so far.
    pub fn present_count(&self) -> usize {
        self.presented.len()
    }

    /// Number of [`VideoSink::initialize`] calls observed.
    pub fn initialize_count(&self) -> usize {
        self.initialize_calls
    }

    /// Number of [`VideoSink::shutdown`] calls observed.
    pub fn shutdown_count(&self) -> usize {
        self.shutdown_calls
    }
}

impl VideoSink for InMemorySink {
    fn initialize(&mut self, dim: Dimensions, _format: PixelFormat, _mode: BufferMode) -> bool {
        self.initialize_calls += 1;
        self.dim = dim;
        self.buffer = vec![0.0; dim.float_len()];
        true
    }

    fn dimensions(&self) -> Dimensions {
        self.dim
    }

    fn acquire_buffer(&mut self) -> Option<&mut [f32]> {
        if self.refusing || self.acquired || self.dim.is_empty() {
            return None;
        }
        self.acquired = true;
        Some(&mut self.buffer)
    }

    fn release_buffer(&mut self) {
        self.acquired = false;
    }

    fn present(&mut self, timestamp: f64) {
        self.presented.push(timestamp);
    }

    fn shutdown(&mut self) {
        self.shutdown_calls += 1;
        self.dim = Dimensions::ZERO;
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_sizes_buffer_and_shutdown_clears_it() {
        let mut sink = InMemorySink::new();
        assert!(sink.initialize(
            Dimensions::new(2, 2),
            PixelFormat::FloatRgba,
            BufferMode::Unbuffered
        ));
        assert_eq!(sink.dimensions(), Dimensions::new(2, 2));
        assert_eq!(sink.frame_data().len(), 16);

        sink.shutdown();
        assert_eq!(sink.dimensions(), Dimensions::ZERO);
        assert!(sink.frame_data().is_empty());
        assert_eq!(sink.shutdown_count(), 1);
    }

    #[test]
    fn acquire_refuses_when_unconfigured_or_refusing() {
        let mut sink = InMemorySink::new();
        assert!(sink.acquire_buffer().is_none());

        sink.initialize(
            Dimensions::new(1, 1),
            PixelFormat::FloatRgba,
            BufferMode::Unbuffered,
        );
        assert!(sink.acquire_buffer().is_some());
        sink.release_buffer();

        sink.set_refusing(true);
        assert!(sink.acquire_buffer().is_none());
    }

    #[test]
    fn present_records_timestamps_in_order() {
        let mut sink = InMemorySink::new();
        sink.present(0.5);
        sink.present(1.0);
        assert_eq!(sink.presented(), &[0.5, 1.0]);
        assert_eq!(sink.present_count(), 2);
    }
}
