// src/commands/run.rs

use anyhow::{Context, Result};
use colored::*;
use std::{fs, path::PathBuf};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{config::RunnerConfig, execution::Test},
    infra::{fs as infra_fs, t, tools::ToolRunner},
    reporting::{console, html, json},
};

pub async fn execute(
    specs: Vec<PathBuf>,
    config: PathBuf,
    base_dir: PathBuf,
    json_path: Option<PathBuf>,
    html_path: Option<PathBuf>,
) -> Result<()> {
    let cfg = RunnerConfig::load(&config)?;
    rust_i18n::set_locale(&cfg.language);

    let base_dir = infra_fs::absolute_path(&base_dir)?;
    let spec_files = collect_spec_files(&specs)?;

    println!("{}", t!("run.loading_config", path = config.display()));
    println!("{}", t!("run.base_dir", path = base_dir.display()).cyan());
    println!(
        "{}",
        t!("run.samples_folder", path = cfg.samples_dir().display()).cyan()
    );

    if spec_files.is_empty() {
        anyhow::bail!(t!("run.no_specs").to_string());
    }

    let stop_token = setup_signal_handler()?;

    let mut reports = Vec::new();
    for spec_file in &spec_files {
        if stop_token.is_cancelled() {
            println!("{}", t!("run.interrupted").yellow());
            break;
        }

        let runner = ToolRunner::new(&cfg)?;
        let test = Test::from_file(spec_file, &base_dir, &cfg, runner)?;
        println!(
            "{}",
            t!(
                "run.running_test",
                name = test.name.yellow(),
                count = test.case_count()
            )
            .bold()
        );

        let report = test.run().await?;
        let (total, passed) = report.aggregate();
        if report.all_passed() {
            println!(
                "{}",
                t!("run.test_finished", name = &test.name, passed = passed, total = total).green()
            );
        } else {
            println!(
                "{}",
                t!("run.test_finished", name = &test.name, passed = passed, total = total).red()
            );
        }
        reports.push(report);
    }

    console::print_summary(&reports);

    if let Some(path) = &json_path {
        json::write_json_report(&reports, path)?;
        println!("{}", t!("run.json_written", path = path.display()));
    }
    if let Some(path) = &html_path {
        if let Err(e) = html::generate_html_report(&reports, path) {
            eprintln!("{} {}", t!("run.html_failed").red(), e);
        } else {
            println!("{}", t!("run.html_written", path = path.display()));
        }
    }

    if reports.iter().any(|report| !report.all_passed()) {
        console::print_failure_details(&reports);
        anyhow::bail!(t!("run.tests_failed").to_string());
    }

    println!("\n{}", t!("run.all_tests_passed").green().bold());
    Ok(())
}

/// Expands the spec arguments into a flat file list: files stay as given,
/// directories contribute their `*.json` entries in name order.
///
/// 将规格参数展开为扁平文件列表：文件保持原样，
/// 目录按名称顺序贡献其中的 `*.json` 条目。
pub(crate) fn collect_spec_files(specs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in specs {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(path)
                .with_context(|| t!("run.spec_dir_read_failed", path = path.display()).to_string())?
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|candidate| {
                    candidate.is_file()
                        && candidate.extension().and_then(|ext| ext.to_str()) == Some("json")
                })
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn setup_signal_handler() -> Result<CancellationToken> {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        signal::ctrl_c().await.expect("Failed to listen for Ctrl-C");
        println!("\n{}", t!("run.shutdown_signal").yellow());
        token_clone.cancel();
    });

    Ok(token)
}
