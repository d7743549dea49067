//! # Run Loop Integration Tests / 运行循环集成测试
//!
//! Drives the sequential case runner with a deterministic stub tool runner:
//! pass/fail bookkeeping, per-case logs, result-directory clearing and
//! artifact cleanup.
//!
//! 用确定性的桩工具运行器驱动顺序用例运行器：
//! 通过/失败记账、每用例日志、结果目录清理和产物清理。

mod common;

use anyhow::Result;
use common::{base_dir, sample_config, spec, write_par_file};
use sample_runner::core::execution::{CaseLogger, SampleRunner, Test};
use sample_runner::core::models::{ArtifactInfo, ArtifactMap, Case, CaseStatus};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Deterministic stand-in for the external tools: case N succeeds when
/// `outcomes[N-1]` is true, producing one artifact file in the work
/// directory; otherwise it fails with an empty mapping.
struct StubRunner {
    outcomes: Vec<bool>,
    calls: Mutex<Vec<&'static str>>,
}

impl StubRunner {
    fn new(outcomes: Vec<bool>) -> Self {
        Self {
            outcomes,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn always_pass() -> Self {
        Self::new(vec![true; 64])
    }

    fn finish(&self, tool: &'static str, case_id: usize, workdir: &Path) -> Result<ArtifactMap> {
        self.calls.lock().unwrap().push(tool);
        if self.outcomes[case_id - 1] {
            let name = format!("{case_id:04}_out.yuv");
            fs::write(workdir.join(&name), b"data")?;
            let mut artifacts = ArtifactMap::new();
            artifacts.insert(name, ArtifactInfo { size: 4 });
            Ok(artifacts)
        } else {
            Ok(ArtifactMap::new())
        }
    }
}

impl SampleRunner for StubRunner {
    async fn sample_decode(
        &self,
        case_id: usize,
        _case: &Case,
        workdir: &Path,
        _log: &CaseLogger,
    ) -> Result<ArtifactMap> {
        self.finish("decode", case_id, workdir)
    }

    async fn sample_encode(
        &self,
        case_id: usize,
        _case: &Case,
        workdir: &Path,
        _log: &CaseLogger,
    ) -> Result<ArtifactMap> {
        self.finish("encode", case_id, workdir)
    }

    async fn sample_multi_transcode(
        &self,
        case_id: usize,
        _case: &Case,
        workdir: &Path,
        _log: &CaseLogger,
    ) -> Result<ArtifactMap> {
        self.finish("transcode", case_id, workdir)
    }

    async fn sample_vpp(
        &self,
        case_id: usize,
        _case: &Case,
        workdir: &Path,
        _log: &CaseLogger,
    ) -> Result<ArtifactMap> {
        self.finish("vpp", case_id, workdir)
    }
}

#[tokio::test]
async fn test_mixed_outcomes_are_aggregated_in_order() {
    let dir = base_dir();
    let cfg = sample_config();
    let test_spec = spec(
        r#"{"type":"decode","stream":["foreman_cif","bbb_1080p_h264","foreman_cif"]}"#,
    );
    let test = Test::new(
        "smoke",
        &test_spec,
        dir.path(),
        &cfg,
        StubRunner::new(vec![true, false, true]),
    )
    .unwrap();

    let report = test.run().await.unwrap();

    assert_eq!(report.aggregate(), (3, 2));
    let statuses: Vec<CaseStatus> = report.cases.iter().map(|c| c.status).collect();
    assert_eq!(
        statuses,
        vec![CaseStatus::Pass, CaseStatus::Fail, CaseStatus::Pass]
    );
    let ids: Vec<&str> = report.cases.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["0001", "0002", "0003"]);
}

#[tokio::test]
async fn test_case_logs_are_written() {
    let dir = base_dir();
    let cfg = sample_config();
    let test_spec = spec(r#"{"type":"decode","stream":["foreman_cif","foreman_cif"]}"#);
    let test = Test::new(
        "logged",
        &test_spec,
        dir.path(),
        &cfg,
        StubRunner::new(vec![true, false]),
    )
    .unwrap();

    test.run().await.unwrap();

    let results = dir.path().join("results").join("logged");
    let pass_log = fs::read_to_string(results.join("0001.log")).unwrap();
    assert!(pass_log.contains("LIBVA_DRIVER_NAME: iHD"));
    assert!(pass_log.contains(" started: "));
    assert!(pass_log.contains(&"-".repeat(78)));
    assert!(pass_log.contains("PASS"));
    assert!(pass_log.contains("finished: "));

    let fail_log = fs::read_to_string(results.join("0002.log")).unwrap();
    assert!(fail_log.contains("FAIL"));
    assert!(!fail_log.contains("PASS"));
}

#[tokio::test]
async fn test_passing_case_artifacts_are_cleaned_up() {
    let dir = base_dir();
    let cfg = sample_config();
    let test_spec = spec(r#"{"type":"decode","stream":["foreman_cif","foreman_cif"]}"#);
    let test = Test::new(
        "cleanup",
        &test_spec,
        dir.path(),
        &cfg,
        StubRunner::new(vec![true, true]),
    )
    .unwrap();

    let report = test.run().await.unwrap();

    assert_eq!(report.aggregate(), (2, 2));
    // The stub created the artifacts; a passing case must delete them again.
    let results = dir.path().join("results").join("cleanup");
    assert!(!results.join("0001_out.yuv").exists());
    assert!(!results.join("0002_out.yuv").exists());
    // The recorded mapping still describes what was produced.
    assert_eq!(report.cases[0].artifacts.len(), 1);
    assert_eq!(
        report.cases[0].artifacts.get("0001_out.yuv"),
        Some(&ArtifactInfo { size: 4 })
    );
}

#[tokio::test]
async fn test_stale_results_cleared_before_run() {
    let dir = base_dir();
    let cfg = sample_config();
    let results = dir.path().join("results").join("stale");
    fs::create_dir_all(&results).unwrap();
    fs::write(results.join("0001.log"), "old").unwrap();
    fs::write(results.join("leftover.yuv"), "old").unwrap();

    let test_spec = spec(r#"{"type":"decode","stream":"foreman_cif"}"#);
    let test = Test::new(
        "stale",
        &test_spec,
        dir.path(),
        &cfg,
        StubRunner::always_pass(),
    )
    .unwrap();

    test.run().await.unwrap();

    assert!(!results.join("leftover.yuv").exists());
    let log = fs::read_to_string(results.join("0001.log")).unwrap();
    assert!(!log.contains("old"));
}

#[test]
fn test_clear_results_leaves_directory_and_unmatched_entries() {
    let dir = base_dir();
    let cfg = sample_config();
    let results = dir.path().join("results").join("globbed");
    fs::create_dir_all(results.join("nested")).unwrap();
    fs::write(results.join("0001.log"), "x").unwrap();
    fs::write(results.join("out.yuv"), "x").unwrap();
    fs::write(results.join("README"), "x").unwrap();
    fs::write(results.join("nested").join("inner.log"), "x").unwrap();

    let test_spec = spec(r#"{"type":"decode","stream":"foreman_cif"}"#);
    let test = Test::new(
        "globbed",
        &test_spec,
        dir.path(),
        &cfg,
        StubRunner::always_pass(),
    )
    .unwrap();

    test.clear_results().unwrap();

    assert!(results.is_dir());
    assert!(!results.join("0001.log").exists());
    assert!(!results.join("out.yuv").exists());
    assert!(results.join("README").exists());
    assert!(results.join("nested").join("inner.log").exists());
}

#[tokio::test]
async fn test_dispatch_matches_test_type() {
    let dir = base_dir();
    let cfg = sample_config();
    write_par_file(dir.path(), "session.par");

    let specs = [
        (r#"{"type":"decode","stream":"foreman_cif"}"#, "decode"),
        (
            r#"{"type":"encode","stream":"foreman_cif","codec":"h264","qp":28}"#,
            "encode",
        ),
        (r#"{"type":"transcode","parfile":"session.par"}"#, "transcode"),
        (r#"{"type":"vpp","stream":"foreman_cif"}"#, "vpp"),
    ];

    for (text, expected_tool) in specs {
        let test = Test::new(
            expected_tool,
            &spec(text),
            dir.path(),
            &cfg,
            StubRunner::always_pass(),
        )
        .unwrap();
        test.run().await.unwrap();

        let calls = test.runner().calls.lock().unwrap().clone();
        assert_eq!(calls, vec![expected_tool]);
    }
}

#[tokio::test]
async fn test_from_file_uses_stem_as_name() {
    let dir = base_dir();
    let cfg = sample_config();
    let spec_path = dir.path().join("decode_smoke.json");
    fs::write(
        &spec_path,
        r#"{"type":"decode","stream":["foreman_cif","bbb_1080p_h264"]}"#,
    )
    .unwrap();

    let test = Test::from_file(&spec_path, dir.path(), &cfg, StubRunner::always_pass()).unwrap();

    assert_eq!(test.name, "decode_smoke");
    assert_eq!(test.case_count(), 2);
    assert_eq!(
        test.results_dir(),
        dir.path().join("results").join("decode_smoke")
    );
}
