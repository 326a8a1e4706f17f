use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use command::Arguments;
use common::ExecutionFailure;
use tracing::{debug, info, warn};

use crate::runner::{ExecutionResult, Runner};

/// 默认 OCR 工具
pub const DEFAULT_PROGRAM: &str = "ocrmypdf";

/// 基于 ocrmypdf 命令行的执行器
#[derive(Debug, Clone)]
pub struct OcrMyPdf {
    program: PathBuf,
}

impl Default for OcrMyPdf {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl OcrMyPdf {
    /// 创建执行器
    ///
    /// # 参数
    ///
    /// * `program` - ocrmypdf 可执行文件名称或路径
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// 在 PATH 中查找 ocrmypdf
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.program).ok()
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// 整理进程输出, 去除首尾空白
fn collect_output(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

impl Runner for OcrMyPdf {
    fn run(&self, args: &Arguments) -> ExecutionResult {
        info!("执行: {} {}", self.program.display(), args);
        let start = Instant::now();

        let output = Command::new(&self.program)
            .args(args.as_slice())
            .stdin(Stdio::null())
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                let diagnostics = if e.kind() == ErrorKind::NotFound {
                    format!(
                        "未找到 {}, 请先安装 (pip install ocrmypdf) 或通过参数指定路径",
                        self.program.display()
                    )
                } else {
                    e.to_string()
                };
                warn!("启动 OCR 工具失败: {}", diagnostics);
                return ExecutionResult::Failed(ExecutionFailure::NotStarted {
                    program: self.program_name(),
                    diagnostics,
                });
            }
        };

        let stderr = collect_output(&output.stderr);
        debug!(
            "OCR 工具退出, 状态: {}, 耗时: {} ms",
            output.status,
            start.elapsed().as_millis()
        );

        if output.status.success() {
            return ExecutionResult::Succeeded {
                output: args.output().to_path_buf(),
                diagnostics: stderr,
            };
        }

        let diagnostics = if !stderr.is_empty() {
            stderr
        } else {
            let stdout = collect_output(&output.stdout);
            if stdout.is_empty() {
                format!("{} 异常退出, 无输出 ({})", self.program.display(), output.status)
            } else {
                stdout
            }
        };
        ExecutionResult::Failed(ExecutionFailure::NonZeroExit {
            code: output.status.code(),
            diagnostics,
        })
    }
}
