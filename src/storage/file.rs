use std::{fs, io, path::PathBuf};

use super::Storage;

const EXTENSION: &str = "json";

/// Stores each key as its own file within a directory. The directory is
/// created lazily, on first write.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// The default location: `<data dir>/jokester`, if the platform has
    /// such a thing
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("jokester"))
    }

    #[cfg(test)]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let sanitized: String = key
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.{}", sanitized, EXTENSION))
    }

    fn try_set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        // NOTE: readers should never see a half-written value
        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{}.tmp", EXTENSION));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                crate::warn!("Unable to read {}: {}", path.to_string_lossy(), e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: String) {
        if let Err(e) = self.try_set(key, &value) {
            crate::warn!("Unable to save {}: {}", key, e);
        }
    }

    fn remove(&mut self, key: &str) {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => crate::warn!("Unable to remove {}: {}", path.to_string_lossy(), e),
        }
    }
}
