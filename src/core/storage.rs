//=========================================================================
// Storage
//=========================================================================
//
// File-backed inputs and outputs of a session.
//
// Formats:
//   reference file   digits, possibly split across lines
//   best file        one integer on the first line
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::config::Settings;
use crate::core::error::{GameError, GameResult};
use crate::core::game::ReferenceDigits;

//=== FileStore ===========================================================

/// Reads the reference digits and reads/writes the best score.
#[derive(Debug, Clone)]
pub struct FileStore {
    digits_path: PathBuf,
    best_path: PathBuf,
}

impl FileStore {
    pub fn new(digits_path: impl Into<PathBuf>, best_path: impl Into<PathBuf>) -> Self {
        Self {
            digits_path: digits_path.into(),
            best_path: best_path.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.digits_path, &settings.best_path)
    }

    pub fn best_path(&self) -> &Path {
        &self.best_path
    }

    //--- Reference --------------------------------------------------------

    /// Loads the reference digits.
    ///
    /// # Errors
    ///
    /// [`GameError::PersistenceUnavailable`] if the file cannot be read,
    /// otherwise whatever [`ReferenceDigits::from_lines`] rejects.
    pub fn load_reference(&self) -> GameResult<ReferenceDigits> {
        let text = fs::read_to_string(&self.digits_path).map_err(|source| {
            GameError::PersistenceUnavailable {
                path: self.digits_path.clone(),
                source,
            }
        })?;
        let reference = ReferenceDigits::from_lines(&text)?;
        info!(
            target: "storage",
            "Loaded {} reference digits from {}",
            reference.len(),
            self.digits_path.display()
        );
        Ok(reference)
    }

    //--- Best Score -------------------------------------------------------

    /// Reads the best score.
    ///
    /// An unparseable file counts as 0.
    ///
    /// # Errors
    ///
    /// [`GameError::PersistenceUnavailable`] if the file cannot be read.
    pub fn load_best(&self) -> GameResult<usize> {
        let text = fs::read_to_string(&self.best_path).map_err(|source| {
            GameError::PersistenceUnavailable {
                path: self.best_path.clone(),
                source,
            }
        })?;

        let first = text.lines().next().unwrap_or("").trim();
        match first.parse() {
            Ok(best) => Ok(best),
            Err(_) => {
                warn!(
                    target: "storage",
                    "Unparseable best score {:?} in {}, using 0",
                    first,
                    self.best_path.display()
                );
                Ok(0)
            }
        }
    }

    /// Reads the best score, falling back to 0 on any failure.
    pub fn load_best_or_default(&self) -> usize {
        self.load_best().unwrap_or_else(|e| {
            warn!(target: "storage", "{}; starting with best 0", e);
            0
        })
    }

    /// Overwrites the best file with `best`.
    ///
    /// # Errors
    ///
    /// [`GameError::PersistenceUnavailable`] on any I/O failure.
    pub fn save_best(&self, best: usize) -> GameResult<()> {
        let unavailable = |source| GameError::PersistenceUnavailable {
            path: self.best_path.clone(),
            source,
        };

        if let Some(parent) = self.best_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }
        fs::write(&self.best_path, format!("{}\n", best)).map_err(unavailable)?;

        info!(target: "storage", "Saved best {} to {}", best, self.best_path.display());
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
