/// Crate-wide result alias.
pub type ExrSeqResult<T> = Result<T, ExrSeqError>;

/// Errors produced while opening or playing an image sequence.
///
/// Open-time kinds (`MalformedUrl`, `NoMatchingFiles`, `InvalidDataWindow`)
/// abort the open and leave the player closed. Per-tick kinds
/// (`DecodeFailure`, `SinkUnavailable`) are logged and the tick is skipped.
/// None of them are fatal to the process.
#[derive(thiserror::Error, Debug)]
pub enum ExrSeqError {
    /// The URL is empty or does not carry the `exr://` scheme.
    #[error("malformed url: {0}")]
    MalformedUrl(String),

    /// The sequence directory contains no frame files of the expected extension.
    #[error("no matching files: {0}")]
    NoMatchingFiles(String),

    /// The first frame reports a non-positive data window.
    #[error("invalid data window: {0}")]
    InvalidDataWindow(String),

    /// A frame's pixel data could not be read.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// The sink did not provide a pixel buffer.
    #[error("sink unavailable: {0}")]
    SinkUnavailable(String),

    /// A control call was issued with no session open.
    #[error("invalid operation while closed: {0}")]
    InvalidOperationWhenClosed(String),

    /// Wrapped I/O or codec error from a capability implementation.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExrSeqError {
    /// Construct a [`ExrSeqError::MalformedUrl`].
    pub fn malformed_url(msg: impl Into<String>) -> Self {
        Self::MalformedUrl(msg.into())
    }

    /// Construct a [`ExrSeqError::NoMatchingFiles`].
    pub fn no_matching_files(msg: impl Into<String>) -> Self {
        Self::NoMatchingFiles(msg.into())
    }

    /// Construct a [`ExrSeqError::InvalidDataWindow`].
    pub fn invalid_data_window(msg: impl Into<String>) -> Self {
        Self::InvalidDataWindow(msg.into())
    }

    /// Construct a [`ExrSeqError::DecodeFailure`].
    pub fn decode_failure(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Construct a [`ExrSeqError::SinkUnavailable`].
    pub fn sink_unavailable(msg: impl Into<String>) -> Self {
        Self::SinkUnavailable(msg.into())
    }

    /// Construct a [`ExrSeqError::InvalidOperationWhenClosed`].
    pub fn closed(msg: impl Into<String>) -> Self {
        Self::InvalidOperationWhenClosed(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ExrSeqError::malformed_url("x")
                .to_string()
                .contains("malformed url:")
        );
        assert!(
            ExrSeqError::no_matching_files("x")
                .to_string()
                .contains("no matching files:")
        );
        assert!(
            ExrSeqError::invalid_data_window("x")
                .to_string()
                .contains("invalid data window:")
        );
        assert!(
            ExrSeqError::decode_failure("x")
                .to_string()
                .contains("decode failure:")
        );
        assert!(
            ExrSeqError::sink_unavailable("x")
                .to_string()
                .contains("sink unavailable:")
        );
        assert!(
            ExrSeqError::closed("x")
                .to_string()
                .contains("invalid operation while closed:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ExrSeqError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
