//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Sample Runner,
//! including data models, configuration, case generation and the test
//! execution engine.
//!
//! 此模块包含 Sample Runner 的核心功能，
//! 包括数据模型、配置、用例生成和测试执行引擎。

pub mod config;
pub mod execution;
pub mod generator;
pub mod models;
pub mod objects;

// Re-exports
pub use config::{RunnerConfig, TestSpec};
pub use execution::{SampleRunner, Test};
pub use generator::generate_cases;
pub use models::{RunReport, TestType};
pub use objects::ValidationError;
