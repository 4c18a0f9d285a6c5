use std::path::PathBuf;

use clap::Args;
use envflag_manifest::SourceFile;
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Flag source file, TOML when it ends in .toml and YAML otherwise
    #[arg(short, long, visible_alias = "src", default_value = "./config.yaml")]
    pub source: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let file = SourceFile::open(&self.source).unwrap_or_exit();
        let report = ops::check(&file);

        if self.json {
            let json = serde_json::to_string_pretty(&report).wrap_err("Failed to encode report")?;
            println!("{json}");
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
