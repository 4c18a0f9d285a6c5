use std::path::PathBuf;

use clap::Args;
use envflag_codegen::Generator;
use envflag_manifest::SourceFile;
use eyre::{Context, Result};
use log::info;

use super::UnwrapOrExit;
use crate::reports::{GenerateReport, GenerationResult, Report, TerminalOutput};

#[derive(Args)]
pub struct GenerateCommand {
    /// Flag source file, TOML when it ends in .toml and YAML otherwise
    #[arg(short, long, visible_alias = "src", default_value = "./config.yaml")]
    pub source: PathBuf,

    /// File the module is written to
    #[arg(short, long, default_value = "./src/config.rs")]
    pub target: PathBuf,

    /// Name of the generated module
    #[arg(short = 'p', long, visible_alias = "pkg", default_value = "config")]
    pub module: String,

    /// Handlebars template to use instead of the built-in one
    #[arg(long, visible_alias = "tpl")]
    pub template: Option<PathBuf>,

    /// Print the generated module without writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let file = SourceFile::open(&self.source).unwrap_or_exit();
        let source = file.source();

        let mut generator = Generator::new(source)
            .with_module(&self.module)
            .with_source_file(self.source.display().to_string());
        if let Some(template) = &self.template {
            info!("using template {}", template.display());
            generator = generator.with_template(template);
        }

        let result = if self.dry_run {
            GenerationResult::Preview(generator.preview().wrap_err("Failed to generate code")?)
        } else {
            GenerationResult::Written(
                generator
                    .generate(&self.target)
                    .wrap_err("Failed to generate code")?,
            )
        };

        let report = GenerateReport {
            app_name: source.app.name.clone(),
            environments: source.app.env.iter().map(ToString::to_string).collect(),
            flag_count: source.flags.len(),
            target: self.target.clone(),
            result,
        };
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
