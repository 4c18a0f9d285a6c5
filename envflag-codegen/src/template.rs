//! Handlebars rendering of the generated module.

use std::path::Path;

use envflag_core::{to_pascal_case, to_screaming_snake_case, to_snake_case};
use eyre::{Context, Result};
use handlebars::{Handlebars, handlebars_helper, no_escape};

use crate::{TemplateContext, literal};

/// Template used when no custom template is given.
pub const BUILTIN_TEMPLATE: &str = include_str!("../templates/config.rs.hbs");

const TEMPLATE_NAME: &str = "config.rs";

handlebars_helper!(pascal: |s: str| to_pascal_case(s));
handlebars_helper!(snake: |s: str| to_snake_case(s));
handlebars_helper!(screaming: |s: str| to_screaming_snake_case(s));
handlebars_helper!(quote: |s: str| literal::quote(s));

/// A compiled output template.
///
/// The registry runs in strict mode, so a template naming a field the
/// context does not have fails to render instead of printing nothing.
/// Output is Rust source, HTML escaping is disabled.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl TemplateEngine {
    /// Engine for the built-in template.
    pub fn new() -> Result<Self> {
        Self::with_template(BUILTIN_TEMPLATE)
    }

    /// Engine for a template given as text.
    pub fn with_template(template: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_helper("pascal", Box::new(pascal));
        registry.register_helper("snake", Box::new(snake));
        registry.register_helper("screaming", Box::new(screaming));
        registry.register_helper("quote", Box::new(quote));

        registry
            .register_template_string(TEMPLATE_NAME, template)
            .wrap_err("invalid output template")?;

        Ok(Self { registry })
    }

    /// Engine for a template file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let template = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read template {}", path.display()))?;
        log::debug!("using template {}", path.display());
        Self::with_template(&template)
            .wrap_err_with(|| format!("invalid template {}", path.display()))
    }

    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        self.registry
            .render(TEMPLATE_NAME, context)
            .wrap_err("cannot render output template")
    }
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine").finish_non_exhaustive()
    }
}
