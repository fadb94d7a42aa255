/// First-frame resolution of dimensions, frame rate, and duration.
pub mod descriptor;
/// Directory enumeration into an ordered frame manifest.
pub mod manifest;
