//! # HTML Reporting Module / HTML 报告模块
//!
//! This module handles the generation of HTML test reports.
//! It creates a standalone HTML file with aggregate statistics, one results
//! table per test and collapsible case detail rows.
//!
//! 此模块处理 HTML 测试报告的生成。
//! 它创建一个独立的 HTML 文件，包含聚合统计、每个测试一个结果表格
//! 和可折叠的用例详情行。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::{CaseResult, RunReport};
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Embedded JavaScript for HTML report interactivity / HTML 报告交互性的嵌入式 JavaScript
const HTML_SCRIPT: &str = include_str!("assets/report.js");

/// Generates a standalone HTML report from the run reports.
///
/// # Arguments / 参数
/// * `reports` - The run reports to include / 要包含的运行报告
/// * `output_path` - The file path where the HTML report will be saved
///                   保存 HTML 报告的文件路径
pub fn generate_html_report(reports: &[RunReport], output_path: &Path) -> Result<()> {
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset='utf-8'><title>{}</title>",
        t!("html_report.title")
    ));
    html.push_str("<style>");
    html.push_str(HTML_STYLE);
    html.push_str("</style>");
    html.push_str("</head><body>");
    html.push_str(&format!("<h1>{}</h1>", t!("html_report.main_header")));

    // Aggregate statistics across all tests
    let total: usize = reports.iter().map(RunReport::total).sum();
    let passed: usize = reports.iter().map(RunReport::passed).sum();
    let failed = total - passed;

    html.push_str("<div class='summary-container'>");
    html.push_str(&format!(
        "<div class='summary-item'><span class='count'>{}</span><span class='label'>{}</span></div>",
        total,
        t!("html_report.summary.total")
    ));
    html.push_str(&format!(
        "<div class='summary-item'><span class='count passed-text'>{}</span><span class='label'>{}</span></div>",
        passed,
        t!("html_report.summary.passed")
    ));
    html.push_str(&format!(
        "<div class='summary-item'><span class='count failed-text'>{}</span><span class='label'>{}</span></div>",
        failed,
        t!("html_report.summary.failed")
    ));
    html.push_str("</div>");

    for (test_index, report) in reports.iter().enumerate() {
        html.push_str(&render_test_table(test_index, report));
    }

    html.push_str("<script>");
    html.push_str(HTML_SCRIPT);
    html.push_str("</script></body></html>");

    fs::write(output_path, html)
        .with_context(|| t!("report.html_write_failed", path = output_path.display()).to_string())?;
    Ok(())
}

/// One collapsible results table for a single test.
/// 单个测试的一个可折叠结果表格。
fn render_test_table(test_index: usize, report: &RunReport) -> String {
    let (total, passed) = report.aggregate();
    let header_class = if report.all_passed() {
        "test-header passed-text"
    } else {
        "test-header failed-text"
    };
    let table_id = format!("test-{test_index}");

    let mut html = String::new();
    html.push_str(&format!(
        "<h2 class='{}' onclick=\"toggleTable('{}')\">{} ({}/{})</h2>",
        header_class,
        table_id,
        escape_html(&report.test),
        passed,
        total
    ));
    html.push_str(&format!("<table id='{table_id}'><thead><tr>"));
    html.push_str(&format!("<th>{}</th>", t!("html_report.table.header.case")));
    html.push_str(&format!(
        "<th class='status-col'>{}</th>",
        t!("html_report.table.header.status")
    ));
    html.push_str(&format!(
        "<th>{}</th>",
        t!("html_report.table.header.artifacts")
    ));
    html.push_str("</tr></thead><tbody>");

    for case in &report.cases {
        html.push_str(&render_case_row(&report.test, case));
    }

    html.push_str("</tbody></table>");
    html
}

fn render_case_row(test: &str, case: &CaseResult) -> String {
    let status_class = if case.status.is_pass() {
        "status-cell status-Passed"
    } else {
        "status-cell status-Failed"
    };

    let artifacts = if case.artifacts.is_empty() {
        // Point failed cases at the per-case log instead of artifacts.
        format!(
            "<span class='log-hint'>results/{}/{}.log</span>",
            escape_html(test),
            escape_html(&case.id)
        )
    } else {
        case.artifacts
            .iter()
            .map(|(name, info)| format!("{} ({} B)", escape_html(name), info.size))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "<tr><td>{}</td><td class='status-col'><div class='{}'>{}</div></td><td>{}</td></tr>",
        escape_html(&case.id),
        status_class,
        case.status,
        artifacts
    )
}

/// Simple HTML escape function to replace special characters with their HTML entities
/// 简单的 HTML 转义函数，用 HTML 实体替换特殊字符
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
