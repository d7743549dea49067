//! # Command Execution Module / 命令执行模块
//!
//! Spawning of external tool processes with combined stdout/stderr capture.
//! The capture is line-based so the output can be appended to a case log as
//! it would appear on a console.
//!
//! 外部工具进程的派生，带有合并的 stdout/stderr 捕获。
//! 捕获是基于行的，因此输出可以像在控制台上显示的那样附加到用例日志中。

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Spawns a command and captures its stdout and stderr.
/// The two streams are read concurrently; the combined text is returned as
/// one string, stdout first.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
///
/// 派生一个命令并捕获其 stdout 和 stderr。
/// 两个流被并发读取；合并的文本作为一个字符串返回，stdout 在前。
///
/// # Arguments
/// * `cmd` - 要执行的 `tokio::process::Command`。
///
/// # Returns
/// 一个元组，包含：
/// - 进程的 `ExitStatus`（包装在 `io::Result` 中）。
/// - 合并的 stdout 和 stderr，为一个 `String`。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<std::process::ExitStatus>, String) {
    let mut child = match cmd
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            // If spawning fails, we return the error and an empty string for the output.
            // 如果派生失败，我们返回错误和空字符串作为输出。
            return (Err(e), String::new());
        }
    };

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Read both streams while waiting for the process, so a tool writing
    // more than a pipe buffer of output cannot deadlock the wait.
    // 在等待进程的同时读取两个流，这样写出超过管道缓冲区输出的工具
    // 不会使等待死锁。
    let (status, stdout_text, stderr_text) = tokio::join!(
        child.wait(),
        read_lines(stdout),
        read_lines(stderr),
    );

    let mut output = stdout_text;
    output.push_str(&stderr_text);
    (status, output)
}

/// Collects a stream line by line into a newline-terminated string.
/// 将流逐行收集为以换行结尾的字符串。
async fn read_lines<R: AsyncRead + Unpin>(source: Option<R>) -> String {
    let Some(source) = source else {
        return String::new();
    };
    let mut text = String::new();
    let mut lines = BufReader::new(source).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        text.push_str(&line);
        text.push('\n');
    }
    text
}
