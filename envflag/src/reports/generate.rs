//! Generate command report data structures.

use std::path::PathBuf;

use envflag_core::WriteResult;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    pub app_name: String,
    pub environments: Vec<String>,
    pub flag_count: usize,
    /// File the module is written to.
    pub target: PathBuf,
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// The module was written, or already up to date.
    Written(WriteResult),
    /// Dry-run preview of the module.
    Preview(String),
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        let target = self.target.display().to_string();
        match &self.result {
            GenerationResult::Preview(content) => {
                out.banner(&target);
                out.text(content);
            }
            GenerationResult::Written(written) => {
                out.field("app", &self.app_name);
                out.field("environments", &self.environments.join(", "));
                out.field("flags", &self.flag_count.to_string());
                out.blank();
                match written {
                    WriteResult::Written => out.text(&format!("Wrote {target}")),
                    WriteResult::Unchanged => out.text(&format!("{target} is up to date")),
                }
            }
        }
    }
}
