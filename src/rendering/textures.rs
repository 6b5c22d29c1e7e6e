//! PNG textures loaded by name from the textures directory.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tiny_skia::Pixmap;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("Texture not found: {0}")]
    NotFound(String),

    #[error("Failed to load texture {name}: {reason}")]
    Unreadable { name: String, reason: String },
}

/// Read-only view of the textures directory. `name` resolves to
/// `<dir>/<name>.png`.
#[derive(Debug, Clone)]
pub struct TextureStore {
    dir: PathBuf,
}

impl TextureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Texture names available in the directory, sorted.
    pub fn list(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        names.sort();
        names
    }

    /// Decode a texture. Names that could escape the directory count as
    /// missing.
    pub fn load(&self, name: &str) -> Result<Pixmap, TextureError> {
        if !is_plain_name(name) {
            return Err(TextureError::NotFound(name.to_string()));
        }
        let path = self.dir.join(format!("{name}.png"));
        if !path.is_file() {
            return Err(TextureError::NotFound(name.to_string()));
        }

        let data = std::fs::read(&path).map_err(|e| TextureError::Unreadable {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        let pixmap = Pixmap::decode_png(&data).map_err(|e| TextureError::Unreadable {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(
            texture = name,
            width = pixmap.width(),
            height = pixmap.height(),
            "Loaded texture"
        );
        Ok(pixmap)
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str) {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 255));
        pixmap.save_png(dir.join(format!("{name}.png"))).unwrap();
    }

    #[test]
    fn test_load_existing_texture() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "brick");
        let store = TextureStore::new(dir.path());

        let pixmap = store.load("brick").unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (2, 2));
        assert_eq!(store.list(), vec!["brick".to_string()]);
    }

    #[test]
    fn test_missing_texture() {
        let dir = tempfile::tempdir().unwrap();
        let store = TextureStore::new(dir.path());
        assert!(matches!(store.load("nope"), Err(TextureError::NotFound(_))));
    }

    #[test]
    fn test_unreadable_texture() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();
        let store = TextureStore::new(dir.path());
        assert!(matches!(
            store.load("broken"),
            Err(TextureError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_path_like_names_are_missing() {
        let dir = tempfile::tempdir().unwrap();
        let inner = dir.path().join("textures");
        std::fs::create_dir(&inner).unwrap();
        write_png(dir.path(), "secret");
        let store = TextureStore::new(&inner);

        for name in ["../secret", "a/b", "a\\b", ""] {
            assert!(
                matches!(store.load(name), Err(TextureError::NotFound(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let store = TextureStore::new("/definitely/not/here");
        assert!(store.list().is_empty());
    }
}
