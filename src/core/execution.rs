//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! This module provides the core functionality for executing generated
//! cases. It owns the per-test result directory, drives the cases strictly
//! sequentially through the tool dispatcher, keeps one log file per case and
//! collects the run report.
//!
//! 此模块为执行生成的用例提供核心功能。
//! 它拥有每个测试的结果目录，通过工具分派器严格顺序地驱动用例，
//! 为每个用例保留一个日志文件，并收集运行报告。

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use indexmap::IndexMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::config::{RunnerConfig, TestSpec};
use crate::core::generator;
use crate::core::models::{ArtifactMap, Case, CaseResult, CaseStatus, RunReport, TestType};
use crate::infra::{fs as infra_fs, t};

/// Timestamp format for the case-log header and footer lines.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// The external-tool collaborator: one operation per test type, each
/// returning the artifact mapping the tool produced. An empty mapping is a
/// tool failure; an `Err` is an infrastructure error and aborts the run.
///
/// 外部工具协作者：每个测试类型一个操作，每个操作返回工具产生的产物映射。
/// 空映射表示工具失败；`Err` 是基础设施错误并会中止运行。
#[allow(async_fn_in_trait)]
pub trait SampleRunner {
    async fn sample_decode(
        &self,
        case_id: usize,
        case: &Case,
        workdir: &Path,
        log: &CaseLogger,
    ) -> Result<ArtifactMap>;

    async fn sample_encode(
        &self,
        case_id: usize,
        case: &Case,
        workdir: &Path,
        log: &CaseLogger,
    ) -> Result<ArtifactMap>;

    async fn sample_multi_transcode(
        &self,
        case_id: usize,
        case: &Case,
        workdir: &Path,
        log: &CaseLogger,
    ) -> Result<ArtifactMap>;

    async fn sample_vpp(
        &self,
        case_id: usize,
        case: &Case,
        workdir: &Path,
        log: &CaseLogger,
    ) -> Result<ArtifactMap>;
}

/// Append-mode logger for a single case. Every line lands in the case's
/// `NNNN.log` file inside the test's result directory.
///
/// 单个用例的追加模式日志记录器。每一行都写入测试结果目录中
/// 该用例的 `NNNN.log` 文件。
pub struct CaseLogger {
    path: PathBuf,
    environment: IndexMap<String, String>,
}

impl CaseLogger {
    pub fn new(path: PathBuf, cfg: &RunnerConfig) -> Self {
        Self {
            path,
            environment: cfg.environment.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line to the case log.
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{message}")
    }

    /// Writes the environment description and the start timestamp.
    /// 写入环境描述和开始时间戳。
    pub fn dump_header(&self) -> io::Result<()> {
        for (key, value) in &self.environment {
            self.log(&format!("{key:>8}: {value}"))?;
        }
        self.log(&format!(
            " started: {}",
            Local::now().format(TIMESTAMP_FORMAT)
        ))
    }

    /// Writes the separator line between the header and the tool output.
    pub fn separator(&self) -> io::Result<()> {
        self.log(&"-".repeat(78))
    }
}

/// One loaded test: the generated case list plus everything needed to run
/// it. Owns `<base>/results/<name>/` exclusively for the duration of a run.
///
/// 一个已加载的测试：生成的用例列表加上运行它所需的一切。
/// 在一次运行期间独占 `<base>/results/<name>/`。
pub struct Test<R> {
    pub name: String,
    pub test_type: TestType,
    pub cases: Vec<Case>,
    results_dir: PathBuf,
    cfg: RunnerConfig,
    runner: R,
}

impl<R: SampleRunner> Test<R> {
    /// Builds a test from a parsed specification, generating and validating
    /// the full case list up front. Generation failure means zero cases are
    /// ever executed.
    ///
    /// 从解析的规格构建测试，预先生成并验证完整的用例列表。
    /// 生成失败意味着不会执行任何用例。
    pub fn new(
        name: &str,
        spec: &TestSpec,
        base_dir: &Path,
        cfg: &RunnerConfig,
        runner: R,
    ) -> Result<Self> {
        let cases = generator::generate_cases(spec, base_dir, cfg)
            .with_context(|| t!("run.case_generation_failed", name = name).to_string())?;
        Ok(Self {
            name: name.to_string(),
            test_type: spec.test_type,
            cases,
            results_dir: base_dir.join("results").join(name),
            cfg: cfg.clone(),
            runner,
        })
    }

    /// Loads a test from a JSON specification file; the test name is the
    /// file stem.
    pub fn from_file(
        path: &Path,
        base_dir: &Path,
        cfg: &RunnerConfig,
        runner: R,
    ) -> Result<Self> {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .with_context(|| t!("run.bad_spec_path", path = path.display()).to_string())?
            .to_string();
        let spec = TestSpec::load(path)?;
        Self::new(&name, &spec, base_dir, cfg, runner)
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// The injected tool-runner collaborator.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Removes prior result files (glob `*.*`, non-recursive) from the
    /// result directory, leaving the directory itself in place.
    ///
    /// 从结果目录中删除先前的结果文件（glob `*.*`，非递归），
    /// 保留目录本身。
    pub fn clear_results(&self) -> Result<()> {
        infra_fs::clear_results(&self.results_dir)
    }

    /// Dispatches one case to the tool matching the test type. The artifact
    /// mapping passes through untouched.
    ///
    /// 将一个用例分派给与测试类型匹配的工具。产物映射原样传递。
    async fn exec_test_tool(
        &self,
        case_id: usize,
        case: &Case,
        log: &CaseLogger,
    ) -> Result<ArtifactMap> {
        match self.test_type {
            TestType::Decode => {
                self.runner
                    .sample_decode(case_id, case, &self.results_dir, log)
                    .await
            }
            TestType::Encode => {
                self.runner
                    .sample_encode(case_id, case, &self.results_dir, log)
                    .await
            }
            TestType::Transcode => {
                self.runner
                    .sample_multi_transcode(case_id, case, &self.results_dir, log)
                    .await
            }
            TestType::Vpp => {
                self.runner
                    .sample_vpp(case_id, case, &self.results_dir, log)
                    .await
            }
        }
    }

    /// Runs every case in generation order and returns the run report.
    ///
    /// Per-case tool failures are recorded and the run continues;
    /// infrastructure errors propagate and abort the whole run.
    ///
    /// 按生成顺序运行每个用例并返回运行报告。
    ///
    /// 每用例的工具失败会被记录且运行继续；
    /// 基础设施错误会传播并中止整个运行。
    pub async fn run(&self) -> Result<RunReport> {
        self.clear_results()?;
        fs::create_dir_all(&self.results_dir).with_context(|| {
            t!("run.results_dir_create_failed", path = self.results_dir.display()).to_string()
        })?;

        let mut report = RunReport::new(&self.name);
        for (index, case) in self.cases.iter().enumerate() {
            let case_id = index + 1;
            let log = CaseLogger::new(
                self.results_dir.join(format!("{case_id:04}.log")),
                &self.cfg,
            );
            log.dump_header()
                .with_context(|| t!("run.case_log_failed", path = log.path().display()).to_string())?;

            print!("    {case_id:04}");
            io::stdout().flush().ok();

            let artifacts = self.exec_test_tool(case_id, case, &log).await?;
            log.separator()
                .with_context(|| t!("run.case_log_failed", path = log.path().display()).to_string())?;

            let status = if artifacts.is_empty() {
                println!("{}", " - FAIL".red());
                log.log("FAIL")?;
                CaseStatus::Fail
            } else {
                println!("{}", " - ok".green());
                log.log("PASS")?;
                self.remove_generated(&artifacts);
                CaseStatus::Pass
            };

            log.log(&format!(
                "\nfinished: {}",
                Local::now().format(TIMESTAMP_FORMAT)
            ))?;

            report.cases.push(CaseResult {
                id: format!("{case_id:04}"),
                status,
                artifacts,
            });
        }
        Ok(report)
    }

    /// Best-effort removal of the artifact files a passing case produced,
    /// so successive cases do not accumulate stale output. Failures are
    /// swallowed.
    ///
    /// 尽力删除通过用例产生的产物文件，以免后续用例累积过期输出。
    /// 失败会被吞掉。
    fn remove_generated(&self, artifacts: &ArtifactMap) {
        for name in artifacts.keys() {
            infra_fs::best_effort_remove(&self.results_dir.join(name));
        }
    }
}
