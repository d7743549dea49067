//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Sample Runner,
//! including external command execution, file system operations and the
//! concrete sample-tool runner.
//!
//! 此模块为 Sample Runner 提供基础设施服务，
//! 包括外部命令执行、文件系统操作和具体的示例工具运行器。

pub mod command;
pub mod fs;
pub mod tools;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
