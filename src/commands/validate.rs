// src/commands/validate.rs

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

use crate::{
    core::{config::{RunnerConfig, TestSpec}, generator},
    infra::{fs as infra_fs, t},
};

/// Dry run: generate and list the cases of every specification without
/// touching the result directories or invoking any tool.
///
/// 试运行：生成并列出每个规格的用例，
/// 不触碰结果目录，也不调用任何工具。
pub fn execute(specs: Vec<PathBuf>, config: PathBuf, base_dir: PathBuf) -> Result<()> {
    let cfg = RunnerConfig::load(&config)?;
    rust_i18n::set_locale(&cfg.language);

    let base_dir = infra_fs::absolute_path(&base_dir)?;
    let spec_files = super::run::collect_spec_files(&specs)?;
    if spec_files.is_empty() {
        anyhow::bail!(t!("run.no_specs").to_string());
    }

    let mut total = 0usize;
    for spec_file in &spec_files {
        let name = spec_file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .with_context(|| t!("run.bad_spec_path", path = spec_file.display()).to_string())?;
        let spec = TestSpec::load(spec_file)?;
        let cases = generator::generate_cases(&spec, &base_dir, &cfg)
            .with_context(|| t!("run.case_generation_failed", name = name).to_string())?;

        println!(
            "{}",
            t!(
                "validate.test_header",
                name = name.yellow(),
                kind = spec.test_type,
                count = cases.len()
            )
            .bold()
        );
        for (index, case) in cases.iter().enumerate() {
            println!("    {:04}  {}", index + 1, case.describe());
        }
        total += cases.len();
    }

    println!("\n{}", t!("validate.ok", count = total).green().bold());
    Ok(())
}
