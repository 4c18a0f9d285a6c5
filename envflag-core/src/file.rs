use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Header placed at the top of every generated file.
pub fn generated_header(source_file: &str) -> String {
    format!("// Code generated by envflag from {source_file}. DO NOT EDIT.")
}

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path
    fn path(&self) -> PathBuf;

    /// Render the file content
    fn render(&self) -> Result<String>;

    /// Render and write the file to disk, creating parent directories.
    ///
    /// The file is left untouched when its content would not change, so
    /// build tools watching the target do not see a spurious modification.
    fn write(&self) -> Result<WriteResult> {
        let path = self.path();
        let content = self.render()?;

        if std::fs::read_to_string(&path).is_ok_and(|existing| existing == content) {
            log::debug!("{} is up to date", path.display());
            return Ok(WriteResult::Unchanged);
        }

        write_file(&path, &content)?;
        log::info!("wrote {}", path.display());
        Ok(WriteResult::Written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("cannot make target path {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("cannot create target file {}", path.display()))?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had the rendered content
    Unchanged,
}

/// An already rendered file
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

impl GeneratedFile for File {
    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn render(&self) -> Result<String> {
        Ok(self.content.clone())
    }
}
