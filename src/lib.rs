//! # Sample Runner Library / Sample Runner 库
//!
//! This library provides the core functionality for the Sample Runner tool,
//! a configuration-driven test executor for media SDK sample tools. It
//! expands compact JSON test matrices into concrete decode/encode/transcode/
//! VPP cases and drives the external sample tools against them.
//!
//! 此库为 Sample Runner 工具提供核心功能，
//! 这是一个配置驱动的媒体 SDK 示例工具测试执行器。它将紧凑的 JSON 测试矩阵
//! 展开为具体的 decode/encode/transcode/VPP 用例，并用这些用例驱动外部示例工具。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, case generation and the test execution engine
//! - `infra` - Infrastructure services like command execution and file system operations
//! - `reporting` - Test result reporting in console, JSON and HTML form
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、用例生成和测试执行引擎
//! - `infra` - 基础设施服务，如命令执行和文件系统操作
//! - `reporting` - 控制台、JSON 和 HTML 形式的测试结果报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::execution;
pub use crate::core::models;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    // Detect system locale and set it for i18n.
    // Fallback to "en" if detection fails.
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    // Try to match the full locale first (e.g., "zh-CN")
    // Then try to match the language part only (e.g., "en" from "en-US")
    // Finally, fall back to "en"
    let lang = if available_locales.contains(&locale.as_str()) {
        &locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
