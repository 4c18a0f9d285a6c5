//! Check operation - source validation.

use envflag_codegen::{TemplateContext, literal};
use envflag_manifest::SourceFile;
use log::debug;

use crate::reports::{CheckReport, EnvDefault, FlagSummary};

/// Execute the check operation.
///
/// Renders the default of every flag for every environment, collecting
/// each failure instead of stopping at the first one. When all defaults
/// render, the generated identifiers are checked as well.
pub fn check(file: &SourceFile) -> CheckReport {
    let source = file.source();
    let mut errors = Vec::new();
    let mut flags = Vec::with_capacity(source.flags.len());

    for flag in &source.flags {
        let mut defaults = Vec::new();
        for env in &source.app.env {
            match literal::default_literal(flag, env.as_str()) {
                Ok(value) => defaults.push(EnvDefault {
                    env: env.to_string(),
                    value,
                }),
                Err(e) => {
                    // A mistyped scalar fails the same way in every environment.
                    let message = e.to_string();
                    if !errors.contains(&message) {
                        errors.push(message);
                    }
                }
            }
        }

        flags.push(FlagSummary {
            name: flag.name.clone(),
            kind: flag.kind.to_string(),
            required: flag.required,
            env_vars: literal::env_vars(flag, &source.app.name),
            defaults,
        });
    }

    if errors.is_empty() {
        let source_file = file.path().display().to_string();
        if let Err(e) = TemplateContext::new(source, "config", &source_file) {
            errors.push(e.to_string());
        }
    }

    debug!(
        "checked {} flags of {}, {} errors",
        flags.len(),
        file.path().display(),
        errors.len()
    );

    CheckReport {
        source_path: file.path().to_path_buf(),
        format: file.format().to_string(),
        valid: errors.is_empty(),
        app_name: source.app.name.clone(),
        environments: source.app.env.iter().map(ToString::to_string).collect(),
        flags,
        errors,
    }
}
