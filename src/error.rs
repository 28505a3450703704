use std::path::PathBuf;

/// Errors raised while assembling a carousel.
///
/// Navigation itself never fails; these only cover loading and construction.
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    #[error("a carousel needs at least one slide")]
    EmptyDeck,

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("failed to read directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no image files found in directory: {0:?}")]
    NoImages(PathBuf),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
