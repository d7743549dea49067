//! # Reporting Module / 报告模块
//!
//! This module handles the generation and display of test reports in
//! multiple formats: a colored console summary, a machine-readable JSON
//! details file and a standalone HTML report.
//!
//! 此模块处理多种格式的测试报告生成和显示：
//! 彩色控制台摘要、机器可读的 JSON 详情文件和独立的 HTML 报告。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{print_failure_details, print_summary};
pub use html::generate_html_report;
pub use json::write_json_report;
