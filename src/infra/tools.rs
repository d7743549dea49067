//! # Sample Tool Runner Module / 示例工具运行器模块
//!
//! The concrete `SampleRunner`: builds the command line for each external
//! sample tool from a resolved case, invokes it with the samples folder
//! prepended to `PATH`, and reports the artifacts the tool produced by
//! diffing the work directory around the invocation.
//!
//! 具体的 `SampleRunner`：从已解析的用例为每个外部示例工具构建命令行，
//! 在 `PATH` 前置示例文件夹的情况下调用它，并通过对比调用前后的
//! 工作目录来报告工具产生的产物。

use anyhow::{Context, Result, anyhow};
use std::collections::HashSet;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::config::RunnerConfig;
use crate::core::execution::{CaseLogger, SampleRunner};
use crate::core::models::{ArtifactInfo, ArtifactMap, Case, TestType};
use crate::infra::{command, t};

/// Drives the external sample tools. One instance per test run.
/// 驱动外部示例工具。每次测试运行一个实例。
pub struct ToolRunner {
    cfg: RunnerConfig,
    /// `PATH` with the samples folder prepended / 前置了示例文件夹的 `PATH`
    path_env: OsString,
}

impl ToolRunner {
    pub fn new(cfg: &RunnerConfig) -> Result<Self> {
        let mut paths = vec![cfg.samples_dir()];
        if let Some(current) = env::var_os("PATH") {
            paths.extend(env::split_paths(&current));
        }
        let path_env =
            env::join_paths(paths).context(t!("tools.path_env_failed").to_string())?;
        Ok(Self {
            cfg: cfg.clone(),
            path_env,
        })
    }

    fn output_name(case_id: usize, extension: &str) -> String {
        format!("{case_id:04}.{extension}")
    }

    /// Invokes one tool inside the work directory and collects the files it
    /// created. A non-zero exit or a timeout yields an empty artifact map
    /// (tool failure); a spawn failure is an infrastructure error.
    ///
    /// 在工作目录内调用一个工具并收集它创建的文件。
    /// 非零退出或超时产生空产物映射（工具失败）；
    /// 派生失败是基础设施错误。
    async fn invoke(
        &self,
        tool: TestType,
        mut args: Vec<OsString>,
        workdir: &Path,
        log: &CaseLogger,
    ) -> Result<ArtifactMap> {
        let binary = self.cfg.tool_binary(tool);
        args.extend(self.cfg.extra_args(tool)?.into_iter().map(OsString::from));

        let rendered: Vec<String> = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        log.log(&format!("> {} {}", binary, rendered.join(" ")))?;

        let before = snapshot(workdir)?;

        let mut cmd = tokio::process::Command::new(&binary);
        cmd.args(&args)
            .env("PATH", &self.path_env)
            .current_dir(workdir)
            .kill_on_drop(true);

        let capture = command::spawn_and_capture(cmd);
        let (status_result, output) = match self.cfg.timeout_secs {
            Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), capture).await {
                Ok(finished) => finished,
                Err(_) => {
                    log.log(&t!("tools.timeout", tool = binary.as_str(), secs = secs))?;
                    return Ok(ArtifactMap::new());
                }
            },
            None => capture.await,
        };

        if !output.is_empty() {
            log.log(output.trim_end())?;
        }

        let status = status_result
            .with_context(|| t!("tools.spawn_failed", tool = binary.as_str()).to_string())?;
        if !status.success() {
            log.log(&t!("tools.nonzero_exit", tool = binary.as_str(), status = status))?;
            return Ok(ArtifactMap::new());
        }

        collect_new_files(workdir, &before)
    }
}

impl SampleRunner for ToolRunner {
    async fn sample_decode(
        &self,
        case_id: usize,
        case: &Case,
        workdir: &Path,
        log: &CaseLogger,
    ) -> Result<ArtifactMap> {
        let stream = case
            .stream()
            .ok_or_else(|| anyhow!(t!("tools.missing_stream").to_string()))?;
        let codec = stream.codec.ok_or_else(|| {
            anyhow!(t!("tools.stream_codec_unknown", stream = &stream.name).to_string())
        })?;

        let mut args: Vec<OsString> = vec![
            codec.name().into(),
            "-i".into(),
            stream.path.clone().into_os_string(),
        ];
        args.push("-o".into());
        args.push(Self::output_name(case_id, "yuv").into());

        self.invoke(TestType::Decode, args, workdir, log).await
    }

    async fn sample_encode(
        &self,
        case_id: usize,
        case: &Case,
        workdir: &Path,
        log: &CaseLogger,
    ) -> Result<ArtifactMap> {
        let encoder = case
            .codec()
            .ok_or_else(|| anyhow!(t!("tools.missing_codec").to_string()))?;
        let stream = case
            .stream()
            .ok_or_else(|| anyhow!(t!("tools.missing_stream").to_string()))?;

        let mut args: Vec<OsString> = vec![
            encoder.codec.name().into(),
            "-i".into(),
            stream.path.clone().into_os_string(),
        ];
        if let Some(width) = stream.width {
            args.push("-w".into());
            args.push(width.to_string().into());
        }
        if let Some(height) = stream.height {
            args.push("-h".into());
            args.push(height.to_string().into());
        }
        args.push("-o".into());
        args.push(Self::output_name(case_id, encoder.codec.extension()).into());

        // Exactly one of bitrate/qp survives validation for non-JPEG codecs;
        // JPEG cases carry quality instead.
        if let Some(bitrate) = case.get("bitrate") {
            args.push("-b".into());
            args.push(bitrate.to_string().into());
        }
        if let Some(qp) = case.get("qp") {
            args.push("-qp".into());
            args.push(qp.to_string().into());
        }
        if let Some(quality) = case.get("quality") {
            args.push("-q".into());
            args.push(quality.to_string().into());
        }
        if let Some(usage) = case.target_usage() {
            args.push("-u".into());
            args.push(usage.value.to_string().into());
        }

        self.invoke(TestType::Encode, args, workdir, log).await
    }

    async fn sample_multi_transcode(
        &self,
        _case_id: usize,
        case: &Case,
        workdir: &Path,
        log: &CaseLogger,
    ) -> Result<ArtifactMap> {
        let par_file = case
            .par_file()
            .ok_or_else(|| anyhow!(t!("tools.missing_parfile").to_string()))?;

        let args: Vec<OsString> = vec![
            "-par".into(),
            par_file.path.clone().into_os_string(),
        ];

        self.invoke(TestType::Transcode, args, workdir, log).await
    }

    async fn sample_vpp(
        &self,
        case_id: usize,
        case: &Case,
        workdir: &Path,
        log: &CaseLogger,
    ) -> Result<ArtifactMap> {
        let stream = case
            .stream()
            .ok_or_else(|| anyhow!(t!("tools.missing_stream").to_string()))?;

        let mut args: Vec<OsString> = vec!["-i".into(), stream.path.clone().into_os_string()];
        if let Some(width) = stream.width {
            args.push("-sw".into());
            args.push(width.to_string().into());
        }
        if let Some(height) = stream.height {
            args.push("-sh".into());
            args.push(height.to_string().into());
        }
        args.push("-o".into());
        args.push(Self::output_name(case_id, "vpp.yuv").into());

        self.invoke(TestType::Vpp, args, workdir, log).await
    }
}

/// Names present in the work directory before a tool runs.
fn snapshot(dir: &Path) -> Result<HashSet<OsString>> {
    let mut names = HashSet::new();
    if dir.exists() {
        let entries = fs::read_dir(dir)
            .with_context(|| t!("fs.read_dir_failed", path = dir.display()).to_string())?;
        for entry in entries {
            let entry = entry
                .with_context(|| t!("fs.read_dir_failed", path = dir.display()).to_string())?;
            names.insert(entry.file_name());
        }
    }
    Ok(names)
}

/// Files that appeared in the work directory during the invocation, with
/// their sizes, in name order.
///
/// 调用期间出现在工作目录中的文件及其大小，按名称排序。
fn collect_new_files(dir: &Path, before: &HashSet<OsString>) -> Result<ArtifactMap> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .with_context(|| t!("fs.read_dir_failed", path = dir.display()).to_string())?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| t!("fs.read_dir_failed", path = dir.display()).to_string())?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut artifacts = ArtifactMap::new();
    for entry in entries {
        let name = entry.file_name();
        if before.contains(&name) {
            continue;
        }
        if !entry.file_type().map(|kind| kind.is_file()).unwrap_or(false) {
            continue;
        }
        let size = entry.metadata().map(|meta| meta.len()).unwrap_or(0);
        artifacts.insert(name.to_string_lossy().into_owned(), ArtifactInfo { size });
    }
    Ok(artifacts)
}
