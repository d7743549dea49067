//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as clearing result directories and best-effort artifact removal.
//!
//! 此模块提供文件系统操作的实用功能，
//! 如清理结果目录和尽力而为的产物删除。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::t;

/// Removes every plain file matching the `*.*` glob from a result
/// directory, non-recursively. The directory itself (and any
/// subdirectories or extensionless files) is left in place; a missing
/// directory is not an error.
///
/// 从结果目录中非递归地删除与 `*.*` glob 匹配的每个普通文件。
/// 目录本身（以及任何子目录或无扩展名文件）保留在原处；
/// 目录不存在不算错误。
pub fn clear_results(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }
    let entries = fs::read_dir(dir)
        .with_context(|| t!("fs.read_dir_failed", path = dir.display()).to_string())?;
    for entry in entries {
        let entry =
            entry.with_context(|| t!("fs.read_dir_failed", path = dir.display()).to_string())?;
        let path = entry.path();
        let dotted = entry.file_name().to_string_lossy().contains('.');
        if dotted && path.is_file() {
            fs::remove_file(&path).with_context(|| {
                t!("fs.remove_failed", path = path.display()).to_string()
            })?;
        }
    }
    Ok(())
}

/// Deletes a file without surfacing errors; returns whether the delete
/// succeeded.
///
/// 删除文件而不暴露错误；返回删除是否成功。
pub fn best_effort_remove(path: &Path) -> bool {
    fs::remove_file(path).is_ok()
}

/// Gets the absolute path from a potentially relative path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path)
        .with_context(|| t!("fs.resolve_failed", path = path.display()).to_string())
}
