//! # Console Reporting Module / 控制台报告模块
//!
//! This module handles the display of run reports in the console.
//! It prints a colored per-test summary table and, for failed tests, the
//! list of failed cases with their log locations.
//!
//! 此模块处理控制台中运行报告的显示。
//! 它打印彩色的每测试摘要表格，并为失败的测试列出失败用例及其日志位置。

use colored::*;

use crate::core::models::RunReport;
use crate::infra::t;

/// Prints a formatted summary of all run reports to the console.
/// One row per test: colored status, test name and passed/total counts.
///
/// 在控制台打印所有运行报告的格式化摘要。
/// 每个测试一行：彩色状态、测试名称和通过/总数计数。
///
/// # Output Format / 输出格式
/// ```text
/// --- Test Summary ---
///   - PASS | decode_h264                      |    4 / 4
///   - FAIL | encode_jpeg                      |    2 / 3
/// ```
pub fn print_summary(reports: &[RunReport]) {
    println!("\n{}", t!("report.summary_banner").bold());

    for report in reports {
        let (total, passed) = report.aggregate();
        let status = if report.all_passed() {
            t!("report.status_passed").green()
        } else {
            t!("report.status_failed").red()
        };
        println!(
            "  - {:<6} | {:<32} | {:>4} / {:<4}",
            status, report.test, passed, total
        );
    }
}

/// Prints the failed cases of every failed test, pointing at the per-case
/// log files for the tool output.
///
/// 打印每个失败测试的失败用例，并指向每用例日志文件以查看工具输出。
pub fn print_failure_details(reports: &[RunReport]) {
    let failed: Vec<&RunReport> = reports
        .iter()
        .filter(|report| !report.all_passed())
        .collect();
    if failed.is_empty() {
        return;
    }

    println!("\n{}", t!("report.failure_banner").red().bold());
    println!("{}", "-".repeat(80));

    for report in failed {
        for case in report.failed_cases() {
            // Log path rendered relative to the base directory, matching the
            // persisted results layout.
            println!(
                "  {} {}",
                report.test.cyan(),
                t!(
                    "report.failed_case",
                    id = &case.id,
                    log = format!("results/{}/{}.log", report.test, case.id)
                )
                .red()
            );
        }
    }
    println!("{}", "-".repeat(80));
}
