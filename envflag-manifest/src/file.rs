use std::path::{Path, PathBuf};

use log::info;

use crate::{Format, Result, Source, parse::parse_source};

/// A flag source file and its decoded source.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    format: Format,
    source: Source,
}

impl SourceFile {
    /// Open and parse a flag source file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let format = Format::from_path(&path);
        let source = parse_source(&content, &path.display().to_string(), format)?;
        info!(
            "loaded {} ({format}, {} flags)",
            path.display(),
            source.flags.len()
        );

        Ok(Self {
            path,
            format,
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Get the decoded source.
    pub fn source(&self) -> &Source {
        &self.source
    }
}
