use std::path::{Path, PathBuf};

use log::debug;

use crate::{Language, Result};

/// Downloadable notes file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesFile {
    pub file_name: &'static str,
    pub data: Vec<u8>,
}

impl NotesFile {
    /// Encode rendered notes as UTF-8 under the file name for `language`
    pub fn new(content: &str, language: Language) -> Self {
        Self {
            file_name: language.file_name(),
            data: content.as_bytes().to_vec(),
        }
    }

    /// Write into `dir`, replacing any previous file of the same name
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name);
        std::fs::write(&path, &self.data)?;
        debug!("Wrote {} bytes to {}", self.data.len(), path.display());
        Ok(path)
    }
}
