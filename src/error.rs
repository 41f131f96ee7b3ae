/// Crate-wide result alias.
pub type FrameryResult<T> = Result<T, FrameryError>;

/// Error kinds surfaced by the mockup pipeline.
///
/// `Configuration` is fatal to a run and reported before any processing
/// starts; `Decode` is recovered per item by the batch loop; `NoInput` ends a
/// run with nothing produced.
#[derive(thiserror::Error, Debug)]
pub enum FrameryError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("no input error: {0}")]
    NoInput(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameryError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn no_input(msg: impl Into<String>) -> Self {
        Self::NoInput(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            FrameryError::configuration("x")
                .to_string()
                .contains("configuration error:")
        );
        assert!(
            FrameryError::decode("x")
                .to_string()
                .contains("decode error:")
        );
        assert!(
            FrameryError::no_input("x")
                .to_string()
                .contains("no input error:")
        );
        assert!(
            FrameryError::render("x")
                .to_string()
                .contains("render error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = FrameryError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
