//! # JSON Reporting Module / JSON 报告模块
//!
//! Writes the structured details object for consumption by other tooling:
//! per-test case lists with ids, statuses and artifact mappings, plus the
//! overall aggregate counts.
//!
//! 写入供其他工具消费的结构化详情对象：
//! 每测试的用例列表（含标识符、状态和产物映射），以及总体聚合计数。

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::RunReport;
use crate::infra::t;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    total: usize,
    passed: usize,
    tests: &'a [RunReport],
}

/// Serializes all run reports into a pretty-printed JSON file.
/// 将所有运行报告序列化为格式化的 JSON 文件。
pub fn write_json_report(reports: &[RunReport], output_path: &Path) -> Result<()> {
    let (total, passed) = reports.iter().fold((0, 0), |acc, report| {
        let (t, p) = report.aggregate();
        (acc.0 + t, acc.1 + p)
    });

    let document = JsonReport {
        generated: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        total,
        passed,
        tests: reports,
    };

    let text = serde_json::to_string_pretty(&document)
        .context(t!("report.json_serialize_failed").to_string())?;
    fs::write(output_path, text)
        .with_context(|| t!("report.json_write_failed", path = output_path.display()).to_string())?;
    Ok(())
}
