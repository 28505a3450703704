use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{CarouselError, Result};

/// One display unit. Its identity is its position in the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub background: Option<PathBuf>,
}

impl Slide {
    pub fn new(background: impl Into<PathBuf>) -> Self {
        Self { background: Some(background.into()) }
    }

    pub fn blank() -> Self {
        Self { background: None }
    }

    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Vec<Slide> {
        paths.into_iter().map(Slide::new).collect()
    }
}

fn is_image(path: &Path) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg" | "bmp" | "gif"),
        None => false,
    }
}

/// Lists the images of a directory, sorted by file name.
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |source| CarouselError::ReadDir { path: dir_path.to_path_buf(), source };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        Err(CarouselError::NoImages(dir_path.to_path_buf()))
    } else {
        tracing::info!(count = paths.len(), dir = ?dir_path, "found slide images");
        Ok(paths)
    }
}
