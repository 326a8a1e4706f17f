use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use command::Arguments;
use common::ExecutionFailure;
use tracing::debug;

/// 执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// 执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Succeeded {
        output: PathBuf,
        diagnostics: String,
    },
    Failed(ExecutionFailure),
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Succeeded { .. })
    }

    /// 捕获的诊断输出
    pub fn diagnostics(&self) -> &str {
        match self {
            ExecutionResult::Succeeded { diagnostics, .. } => diagnostics,
            ExecutionResult::Failed(failure) => failure.diagnostics(),
        }
    }

    /// 结果对应的最终状态
    pub fn state(&self) -> RunState {
        if self.is_success() {
            RunState::Succeeded
        } else {
            RunState::Failed
        }
    }
}

/// 外部 OCR 工具执行接口
pub trait Runner: Send + Sync {
    /// 执行外部 OCR 命令, 阻塞直到进程退出
    ///
    /// # 参数
    ///
    /// * `args` - 命令参数
    fn run(&self, args: &Arguments) -> ExecutionResult;
}

/// 在后台线程执行外部 OCR 命令, 完成后调用回调
///
/// # 参数
///
/// * `runner` - 执行器
/// * `args` - 命令参数
/// * `on_complete` - 完成回调, 在后台线程中调用
pub fn spawn<F>(
    runner: Arc<dyn Runner>,
    args: Arguments,
    on_complete: F,
) -> io::Result<JoinHandle<()>>
where
    F: FnOnce(ExecutionResult) + Send + 'static,
{
    thread::Builder::new()
        .name("ocr-worker".to_string())
        .spawn(move || {
            debug!("后台执行 OCR 命令: {}", args);
            let result = runner.run(&args);
            debug!("OCR 命令执行结束, 状态: {:?}", result.state());
            on_complete(result);
        })
}
