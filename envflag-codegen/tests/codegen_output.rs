//! Tests of the rendered configuration module.
//!
//! `generated/demo_config.rs` is the output for `fixtures/demo.yaml` and is
//! compiled and exercised by `generated_config.rs`. Regenerate it with
//! `envflag generate -s tests/fixtures/demo.yaml -t tests/generated/demo_config.rs -p demo_config`
//! when the template changes on purpose.

use envflag_codegen::{ContextError, Generator};
use envflag_core::WriteResult;
use envflag_manifest::Source;

const DEMO_SOURCE: &str = include_str!("fixtures/demo.yaml");
const DEMO_MODULE: &str = include_str!("generated/demo_config.rs");

fn render(yaml: &str) -> String {
    let source: Source = yaml.parse().expect("Failed to parse source");
    Generator::new(&source)
        .preview()
        .expect("Failed to render module")
}

/// Lines with content, so the comparison does not depend on blank lines.
fn code_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect()
}

#[test]
fn test_demo_module_is_up_to_date() {
    let source: Source = DEMO_SOURCE.parse().unwrap();
    let rendered = Generator::new(&source)
        .with_module("demo_config")
        .with_source_file("demo.yaml")
        .preview()
        .unwrap();

    assert_eq!(code_lines(&rendered), code_lines(DEMO_MODULE));
}

#[test]
fn test_header_and_environments() {
    let code = render("app:\n  name: shop\n  env: [local, staging-eu]\n");

    assert!(code.starts_with("// Code generated by envflag from config.yaml. DO NOT EDIT.\n"));
    assert!(code.contains("pub const APP_ENV: &str = \"SHOP_ENV\";"));
    assert!(code.contains("pub const ENV_LOCAL: EnvName = EnvName::new(\"local\");"));
    assert!(code.contains("pub const ENV_STAGING_EU: EnvName = EnvName::new(\"staging-eu\");"));
    assert!(code.contains("clap::Command::new(\"shop\")"));
}

#[test]
fn test_module_without_flags() {
    let code = render("app:\n  name: shop\n  env: [dev]\n");

    assert!(code.contains("use envflag_runtime::{EnvName, Error, FlagInfo};"));
    assert!(!code.contains("pub mod flags"));
    assert!(code.contains("let _ = matches;"));
    assert!(!code.contains("pub use envflag_runtime::Timestamp;"));
}

#[test]
fn test_slice_and_float_defaults() {
    let code = render(concat!(
        "app:\n  name: shop\n  env: [dev, prod]\n",
        "flags:\n",
        "  weights:\n    type: float64Slice\n    value:\n      dev: [0.25, 1]\n",
        "  ids:\n    type: uint64Slice\n    value: [1, 2]\n",
    ));

    assert!(code.contains(".set_float64_slice(ENV_DEV, &[0.25_f64,1_f64])"));
    assert!(code.contains(".set_float64_slice(ENV_PROD, &[]),"));
    assert!(code.contains(".set_uint64_slice(ENV_PROD, &[1,2]),"));
    assert!(code.contains("pub fn weights(&self) -> Option<Vec<f64>> {"));
    assert!(code.contains("pub fn ids(&self) -> Option<Vec<u64>> {"));
}

#[test]
fn test_keyword_flag_is_escaped() {
    let code = render("app:\n  name: shop\n  env: [dev]\nflags:\n  type:\n    type: string\n");

    assert!(code.contains("r#type: Value,"));
    assert!(code.contains("pub fn r#type(&self) -> String {"));
    assert!(code.contains("pub fn type_value(&self) -> &Value {"));
    assert!(code.contains("flags::TYPE.resolve(&self.r#type, matches)?;"));
}

#[test]
fn test_invalid_default_is_reported() {
    let source: Source = concat!(
        "app:\n  name: shop\n  env: [dev, prod]\n",
        "flags:\n  mode:\n    type: enum\n    enum: [a, b]\n    value:\n      dev: a\n",
    )
    .parse()
    .unwrap();

    let err = Generator::new(&source).preview().unwrap_err();
    let context_err = err.downcast_ref::<ContextError>().unwrap();
    assert_eq!(
        context_err.to_string(),
        "undefined value for env \"prod\" [flag=mode type=enum]"
    );
}

#[test]
fn test_custom_template() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("flags.hbs");
    std::fs::write(
        &template,
        "{{#each flags}}{{screaming ../app_name}}_{{const_name}}={{kind}}\n{{/each}}",
    )
    .unwrap();

    let source: Source = DEMO_SOURCE.parse().unwrap();
    let code = Generator::new(&source)
        .with_template(&template)
        .preview()
        .unwrap();

    assert!(code.contains("ENVFLAG_DEMO_PORT=Int64\n"));
    assert!(code.contains("ENVFLAG_DEMO_HOSTS=StringSlice\n"));
}

#[test]
fn test_generate_writes_once() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("src").join("config.rs");
    let source: Source = DEMO_SOURCE.parse().unwrap();
    let generator = Generator::new(&source);

    assert_eq!(generator.generate(&target).unwrap(), WriteResult::Written);
    assert_eq!(generator.generate(&target).unwrap(), WriteResult::Unchanged);

    let written = std::fs::read_to_string(&target).unwrap();
    assert_eq!(written, generator.preview().unwrap());
}
