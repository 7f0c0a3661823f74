use crate::utils::error::{Result, TarotError};
use std::path::{Path, PathBuf};

/// Derive the artwork filename for a card: lowercase, spaces and hyphens
/// removed, fixed `.jpg` extension. "The Fool" -> "thefool.jpg".
pub fn image_filename(card_name: &str) -> String {
    let normalized: String = card_name
        .to_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();
    format!("{}.jpg", normalized)
}

/// Locate a card's artwork under `images_dir`.
///
/// Absence is a per-card degradation, not a reading failure: callers render
/// the `AssetMissingError` as a placeholder notice.
pub fn find_card_image(images_dir: &str, card_name: &str) -> Result<PathBuf> {
    let path = Path::new(images_dir).join(image_filename(card_name));
    if path.is_file() {
        Ok(path)
    } else {
        Err(TarotError::AssetMissingError {
            path: path.display().to_string(),
        })
    }
}
