/// Pixel dimensions of a frame or sink surface.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// The zero-sized dimensions of a closed session.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create dimensions from a width/height pair.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Number of `f32` components in one RGBA frame of these dimensions.
    pub fn float_len(self) -> usize {
        self.pixel_count().saturating_mul(4)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Playback state derived from the session.
///
/// This is never stored: a player is `Closed` when no session is open,
/// otherwise `Paused` iff the rate is exactly zero, else `Playing`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub enum PlayState {
    /// No media is open.
    #[default]
    Closed,
    /// Media is open and the playback rate is zero.
    Paused,
    /// Media is open and the playback rate is non-zero.
    Playing,
}

/// Pixel layout of buffers exchanged with a sink.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum PixelFormat {
    /// Interleaved RGBA, one `f32` per component, row-major, tightly packed.
    #[default]
    FloatRgba,
}

/// Buffering behavior requested from a sink.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub enum BufferMode {
    /// Frames are written directly into the sink's display buffer.
    #[default]
    Unbuffered,
    /// The sink double-buffers internally.
    Buffered,
}
