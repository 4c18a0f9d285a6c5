//! Check command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from source validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the source file.
    pub source_path: PathBuf,
    /// Encoding of the source, `YAML` or `TOML`.
    pub format: String,
    pub valid: bool,
    pub app_name: String,
    pub environments: Vec<String>,
    pub flags: Vec<FlagSummary>,
    /// Error messages, one per failed default or name clash.
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FlagSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub env_vars: Vec<String>,
    /// Rendered default of every environment that rendered.
    pub defaults: Vec<EnvDefault>,
}

#[derive(Debug, Serialize)]
pub struct EnvDefault {
    pub env: String,
    pub value: String,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        if !self.is_valid() {
            return;
        }

        out.text(&format!("✓ {} is valid", self.source_path.display()));
        out.blank();
        out.field("format", &self.format);
        out.field("app", &self.app_name);
        out.field("environments", &self.environments.join(", "));
        out.blank();

        out.heading(&format!(
            "{} flag{}",
            self.flags.len(),
            if self.flags.len() == 1 { "" } else { "s" }
        ));
        for flag in &self.flags {
            let mut line = format!("{} ({})", flag.name, flag.kind);
            if flag.required {
                line.push_str(" required");
            }
            if !flag.env_vars.is_empty() {
                line.push_str(&format!(" [{}]", flag.env_vars.join(", ")));
            }
            out.flag(&line);
            for default in &flag.defaults {
                out.env_default(&default.env, &default.value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordedOutput;

    fn report(errors: Vec<String>) -> CheckReport {
        CheckReport {
            source_path: PathBuf::from("config.yaml"),
            format: "YAML".to_string(),
            valid: errors.is_empty(),
            app_name: "demo".to_string(),
            environments: vec!["dev".to_string(), "prod".to_string()],
            flags: vec![FlagSummary {
                name: "port".to_string(),
                kind: "int".to_string(),
                required: true,
                env_vars: vec!["DEMO_PORT".to_string()],
                defaults: vec![
                    EnvDefault {
                        env: "dev".to_string(),
                        value: "8080_isize".to_string(),
                    },
                    EnvDefault {
                        env: "prod".to_string(),
                        value: "80_isize".to_string(),
                    },
                ],
            }],
            errors,
        }
    }

    #[test]
    fn test_render_valid() {
        let mut out = RecordedOutput::default();
        report(Vec::new()).render(&mut out);

        assert_eq!(
            out.lines,
            [
                "✓ config.yaml is valid",
                "",
                "format: YAML",
                "app: demo",
                "environments: dev, prod",
                "",
                "1 flag:",
                "  - port (int) required [DEMO_PORT]",
                "      dev: 8080_isize",
                "      prod: 80_isize",
            ]
        );
    }

    #[test]
    fn test_render_errors_only() {
        let mut out = RecordedOutput::default();
        report(vec!["bad default [flag=port type=int]".to_string()]).render(&mut out);

        assert_eq!(out.lines, ["stderr: error: bad default [flag=port type=int]"]);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(report(Vec::new())).unwrap();

        assert_eq!(json["valid"], true);
        assert_eq!(json["flags"][0]["type"], "int");
        assert_eq!(json["flags"][0]["defaults"][1]["value"], "80_isize");
        assert_eq!(json["source_path"], "config.yaml");
        assert_eq!(json["format"], "YAML");
    }
}
