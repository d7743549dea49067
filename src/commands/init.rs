//! # Runner Initialization Module / 运行器初始化模块
//!
//! This module provides functionality for initializing a new runner setup
//! through an interactive command-line wizard. It helps users create a
//! `SampleRunner.toml` file plus example test specifications for the
//! selected test types.
//!
//! 此模块通过交互式命令行向导提供初始化新运行器设置的功能。
//! 它帮助用户创建 `SampleRunner.toml` 文件，以及所选测试类型的
//! 示例测试规格。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, MultiSelect, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::{RunnerConfig, StreamConfig};
use crate::core::models::TestType;
use crate::infra::t;

const CONFIG_FILE: &str = "SampleRunner.toml";

/// Runs the interactive wizard to generate a `SampleRunner.toml` file and
/// example test specifications.
///
/// 运行交互式向导以生成 `SampleRunner.toml` 文件和示例测试规格。
pub fn run_init_wizard(language: &str, non_interactive: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE);
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!("\n{}", t!("init.wizard_welcome").cyan().bold());
        println!("{}", t!("init.wizard_description"));
    }

    if config_path.exists() && !non_interactive {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", path = CONFIG_FILE).to_string())
            .default(false)
            .interact()
            .context(t!("init.user_confirmation_failed").to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted"));
            return Ok(());
        }
    }

    if non_interactive {
        let cfg = default_config(language);
        write_config(config_path, &cfg)?;
        write_example_spec(TestType::Decode)?;
        return Ok(());
    }

    let samples_folder: String = Input::with_theme(&theme)
        .with_prompt(t!("init.samples_prompt").to_string())
        .default("~/mediasdk/bin".to_string())
        .interact_text()?;
    let streams_folder: String = Input::with_theme(&theme)
        .with_prompt(t!("init.streams_prompt").to_string())
        .default("streams".to_string())
        .interact_text()?;

    let mut cfg = default_config(language);
    cfg.samples_folder = samples_folder;
    cfg.streams_folder = Some(streams_folder);

    let options: Vec<(TestType, String)> = TestType::ALL
        .iter()
        .map(|kind| (*kind, t!("init.template", kind = kind).to_string()))
        .collect();
    let selections = MultiSelect::with_theme(&theme)
        .with_prompt(t!("init.template_selection_prompt").to_string())
        .items(&options.iter().map(|o| o.1.clone()).collect::<Vec<_>>())
        .interact()
        .context(t!("init.user_confirmation_failed").to_string())?;

    if selections.is_empty() {
        println!("{}", t!("init.no_templates_selected").yellow());
    }

    write_config(config_path, &cfg)?;
    for index in selections {
        write_example_spec(options[index].0)?;
    }

    Ok(())
}

/// A starter configuration with two example streams: a raw CIF sequence for
/// encode/VPP templates and an H.264 elementary stream for decode templates.
///
/// 一个入门配置，包含两个示例流：用于 encode/VPP 模板的原始 CIF 序列，
/// 以及用于 decode 模板的 H.264 基本流。
fn default_config(language: &str) -> RunnerConfig {
    let mut cfg = RunnerConfig {
        language: language.to_string(),
        samples_folder: "~/mediasdk/bin".to_string(),
        streams_folder: Some("streams".to_string()),
        ..RunnerConfig::default()
    };
    cfg.streams.insert(
        "foreman_cif".to_string(),
        StreamConfig {
            path: "foreman_cif.yuv".into(),
            codec: None,
            width: Some(352),
            height: Some(288),
        },
    );
    cfg.streams.insert(
        "bbb_1080p_h264".to_string(),
        StreamConfig {
            path: "bbb_1080p.264".into(),
            codec: Some("h264".to_string()),
            width: Some(1920),
            height: Some(1080),
        },
    );
    cfg
}

fn write_config(path: &Path, cfg: &RunnerConfig) -> Result<()> {
    let toml_string =
        toml::to_string_pretty(cfg).context(t!("init.serialize_failed").to_string())?;

    fs::write(path, toml_string)
        .with_context(|| t!("init.write_failed", path = path.display()).to_string())?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init.success_created", path = path.display()).bold()
    );
    println!("{}", t!("init.usage_hint"));

    Ok(())
}

/// Writes an example specification file for one test type; the transcode
/// template also gets the par file it references.
///
/// 为一种测试类型写入示例规格文件；transcode 模板还会得到它引用的
/// par 文件。
fn write_example_spec(kind: TestType) -> Result<()> {
    // Written as literal text so the field order in the file matches the
    // axis declaration order the generator will use.
    let text = match kind {
        TestType::Decode => {
            "{\n  \"type\": \"decode\",\n  \"stream\": \"bbb_1080p_h264\"\n}\n"
        }
        TestType::Encode => {
            "{\n  \"type\": \"encode\",\n  \"stream\": \"foreman_cif\",\n  \"codec\": \"h264\",\n  \"bitrate\": [1000, 2000],\n  \"target_usage\": \"balanced\"\n}\n"
        }
        TestType::Transcode => {
            "{\n  \"type\": \"transcode\",\n  \"parfile\": \"example_transcode.par\"\n}\n"
        }
        TestType::Vpp => {
            "{\n  \"type\": \"vpp\",\n  \"stream\": \"foreman_cif\"\n}\n"
        }
    };

    let spec_path = format!("example_{kind}.json");
    fs::write(&spec_path, text)
        .with_context(|| t!("init.write_failed", path = &spec_path).to_string())?;

    if kind == TestType::Transcode {
        let par_path = "example_transcode.par";
        let par_text = "-i::h264 streams/bbb_1080p.264 -o::h265 transcoded.265\n";
        fs::write(par_path, par_text)
            .with_context(|| t!("init.write_failed", path = par_path).to_string())?;
    }

    println!("  {} {}", "✔".green(), t!("init.example_written", path = spec_path));
    Ok(())
}
