use std::path::{Path, PathBuf};

use envflag_core::{File, GeneratedFile, WriteResult};
use envflag_manifest::Source;
use eyre::Result;

use crate::{TemplateContext, TemplateEngine};

/// Renders the configuration module of a [`Source`].
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    source: &'a Source,
    module: String,
    source_file: String,
    template: Option<PathBuf>,
}

impl<'a> Generator<'a> {
    pub fn new(source: &'a Source) -> Self {
        Self {
            source,
            module: "config".to_string(),
            source_file: "config.yaml".to_string(),
            template: None,
        }
    }

    /// Name of the generated module, used in its documentation.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Source file named in the generated header.
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    /// Render with a custom template instead of the built-in one.
    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    pub fn context(&self) -> Result<TemplateContext> {
        Ok(TemplateContext::new(
            self.source,
            &self.module,
            &self.source_file,
        )?)
    }

    /// Render the module without writing it.
    pub fn preview(&self) -> Result<String> {
        let context = self.context()?;
        let engine = match &self.template {
            Some(path) => TemplateEngine::from_file(path)?,
            None => TemplateEngine::new()?,
        };
        engine.render(&context)
    }

    /// Render the module and write it to `target`.
    pub fn generate(&self, target: impl AsRef<Path>) -> Result<WriteResult> {
        File::new(target.as_ref(), self.preview()?).write()
    }
}
