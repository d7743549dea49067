//! # Commands Module / 命令模块
//!
//! Implementations of the CLI subcommands: `run`, `validate` and `init`.
//! 命令行子命令的实现：`run`、`validate` 和 `init`。

pub mod init;
pub mod run;
pub mod validate;
