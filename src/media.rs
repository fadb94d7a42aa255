/// Decoder capability and the built-in `image`-backed implementation.
pub mod decode;
/// Pixel-buffer sink capability and the in-memory implementation.
pub mod sink;
/// Sequence-source configuration, options bag, and URL handling.
pub mod source;
