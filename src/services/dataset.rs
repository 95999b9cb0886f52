use crate::models::dataset_dto::{DatasetImage, DatasetSummary};
use std::fs;
use std::io;
use std::path::{Component, Path};

pub const DATASET_SPLITS: [&str; 4] = ["trainA", "trainB", "testA", "testB"];
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];
pub const MAX_LISTED_IMAGES: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Invalid dataset name")]
    InvalidName,
    #[error("Could not read dataset: {0}")]
    Io(#[from] io::Error),
}

// to prevent directory traversal the name has to be exactly one normal
// component
pub fn name_is_valid(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

pub fn is_image_name(name: &str) -> bool {
    let Some(ext) = Path::new(name).extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    IMAGE_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}

fn count_images(dir: &Path) -> usize {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_str().is_some_and(is_image_name))
            .count(),
        Err(_) => 0,
    }
}

/// Image count of every standard split. Missing or unreadable splits count as
/// zero.
pub fn summarize(root: &Path) -> Vec<DatasetSummary> {
    DATASET_SPLITS
        .iter()
        .map(|name| DatasetSummary {
            name: name.to_string(),
            count: count_images(&root.join(name)),
        })
        .collect()
}

/// First `MAX_LISTED_IMAGES` images of `name` in file name order. A dataset
/// that does not exist lists no images.
pub fn list_images(root: &Path, name: &str) -> Result<Vec<DatasetImage>, DatasetError> {
    if !name_is_valid(name) {
        return Err(DatasetError::InvalidName);
    }

    let dir = root.join(name);
    if !dir.is_dir() {
        return Ok(vec![]);
    }

    let mut filenames: Vec<String> = fs::read_dir(&dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|filename| is_image_name(filename))
        .collect();
    filenames.sort();

    Ok(filenames
        .into_iter()
        .take(MAX_LISTED_IMAGES)
        .map(|filename| DatasetImage {
            url: format!("/dataset_files/{name}/{filename}"),
            filename,
        })
        .collect())
}
