use crate::error::ConvertError;
use std::env;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where inputs are looked up and outputs go when nothing else is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPaths {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
}

impl DefaultPaths {
    pub fn new(input_root: impl Into<PathBuf>) -> Self {
        let input_root = input_root.into();
        let output_root = input_root.join("output");
        Self {
            input_root,
            output_root,
        }
    }

    /// Defaults rooted at the directory holding the running executable.
    pub fn beside_executable() -> io::Result<Self> {
        let exe = env::current_exe()?;
        let dir = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::new(dir))
    }

    pub fn create_dirs(&self) -> Result<(), ConvertError> {
        for dir in [&self.input_root, &self.output_root] {
            fs::create_dir_all(dir).map_err(|source| match source.kind() {
                ErrorKind::PermissionDenied => ConvertError::PermissionDenied {
                    path: dir.clone(),
                    source,
                },
                _ => ConvertError::Io(source),
            })?;
        }
        Ok(())
    }

    /// Relative paths are looked up under the default input root first and
    /// only then taken as given. A path found in neither place is an error.
    pub fn resolve_input(&self, input: Option<&Path>) -> Result<PathBuf, ConvertError> {
        let Some(input) = input else {
            return Ok(self.input_root.clone());
        };
        if input.is_relative() {
            let candidate = self.input_root.join(input);
            if candidate.exists() {
                info!("Resolved path: {} -> {}", input.display(), candidate.display());
                return Ok(candidate);
            }
        }
        if input.exists() {
            return Ok(input.to_path_buf());
        }
        Err(ConvertError::InputNotFound(input.to_path_buf()))
    }

    /// Relative output paths are placed under the default output root.
    pub fn resolve_output(&self, output: Option<&Path>) -> PathBuf {
        match output {
            None => self.output_root.clone(),
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.output_root.join(path),
        }
    }
}
