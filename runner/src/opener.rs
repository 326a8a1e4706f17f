use std::process::{Command, Stdio};

use common::{ExecutionFailure, Result};
use tracing::info;

/// ocrmypdf 文档地址
pub const DOCS_URL: &str = "https://ocrmypdf.readthedocs.io/en/latest/";

#[cfg(target_os = "windows")]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", target]);
    command
}

#[cfg(target_os = "macos")]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(target);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(target);
    command
}

/// 使用系统默认程序打开文件或链接
///
/// # 参数
///
/// * `target` - 文件路径或链接
pub fn open_path(target: &str) -> Result<()> {
    let mut command = opener_command(target);
    let program = command.get_program().to_string_lossy().into_owned();

    let status = command
        .stdin(Stdio::null())
        .status()
        .map_err(|e| ExecutionFailure::NotStarted {
            program: program.clone(),
            diagnostics: e.to_string(),
        })?;
    if !status.success() {
        return Err(ExecutionFailure::NonZeroExit {
            code: status.code(),
            diagnostics: format!("{} 无法打开 {}", program, target),
        }
        .into());
    }

    info!("已打开: {}", target);
    Ok(())
}
