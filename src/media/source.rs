use std::path::PathBuf;

use crate::foundation::error::{ExrSeqError, ExrSeqResult};

/// URL scheme accepted by the player.
pub const URL_SCHEME: &str = "exr://";

/// Option key for overriding the frame rate stored in the EXR files.
pub const FPS_OVERRIDE_OPTION: &str = "FramesPerSecondOverride";

/// Read-only key/value bag queried once at open time.
pub trait PlayerOptions {
    /// Value for `key`, or `default` when the option is unset.
    fn media_option(&self, key: &str, default: f64) -> f64 {
        let _ = key;
        default
    }
}

/// Empty options bag.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOptions;

impl PlayerOptions for NoOptions {}

/// Configuration describing one EXR image-sequence directory.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceSource {
    /// Directory containing the sequence's frame files.
    pub sequence_path: PathBuf,
    /// Overrides the frame rate embedded in the EXR files (0.0 = no override).
    pub frames_per_second_override: f64,
}

impl SequenceSource {
    /// Describe the sequence stored in `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            sequence_path: path.into(),
            frames_per_second_override: 0.0,
        }
    }

    /// Set a frame-rate override for this source.
    pub fn with_frame_rate_override(mut self, frames_per_second: f64) -> Self {
        self.frames_per_second_override = frames_per_second;
        self
    }

    /// Playback URL for this source.
    pub fn url(&self) -> String {
        format!("{URL_SCHEME}{}", self.sequence_path.display())
    }

    /// Return `true` when the sequence directory exists.
    pub fn validate(&self) -> bool {
        self.sequence_path.is_dir()
    }
}

impl PlayerOptions for SequenceSource {
    fn media_option(&self, key: &str, default: f64) -> f64 {
        if key == FPS_OVERRIDE_OPTION {
            self.frames_per_second_override
        } else {
            default
        }
    }
}

/// Extract the sequence directory from a playback URL.
///
/// Fails with [`ExrSeqError::MalformedUrl`] when the URL is empty or does not
/// start with [`URL_SCHEME`]; no state is touched in that case.
pub fn sequence_path_from_url(url: &str) -> ExrSeqResult<PathBuf> {
    let Some(path) = url.strip_prefix(URL_SCHEME) else {
        return Err(ExrSeqError::malformed_url(format!(
            "'{url}' does not start with '{URL_SCHEME}'"
        )));
    };
    if path.is_empty() {
        return Err(ExrSeqError::malformed_url(format!(
            "'{url}' carries no directory path"
        )));
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_builds_scheme_url() {
        let source = SequenceSource::new("/shots/fx_010/plates");
        assert_eq!(source.url(), "exr:///shots/fx_010/plates");
        assert_eq!(
            sequence_path_from_url(&source.url()).unwrap(),
            PathBuf::from("/shots/fx_010/plates")
        );
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        for url in ["", "file:///tmp", "/plain/path", "exr:/missing-slash"] {
            let err = sequence_path_from_url(url).unwrap_err();
            assert!(matches!(err, ExrSeqError::MalformedUrl(_)), "{url}");
        }
    }

    #[test]
    fn url_with_empty_path_is_rejected() {
        assert!(matches!(
            sequence_path_from_url("exr://").unwrap_err(),
            ExrSeqError::MalformedUrl(_)
        ));
    }

    #[test]
    fn options_expose_only_the_override_key() {
        let source = SequenceSource::new("/seq").with_frame_rate_override(30.0);
        assert_eq!(source.media_option(FPS_OVERRIDE_OPTION, 0.0), 30.0);
        assert_eq!(source.media_option("SomethingElse", 7.0), 7.0);
        assert_eq!(NoOptions.media_option(FPS_OVERRIDE_OPTION, 0.0), 0.0);
    }
}
