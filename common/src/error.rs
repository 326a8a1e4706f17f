use std::path::PathBuf;

use thiserror::Error;

/// 执行失败原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionFailure {
    #[error("无法启动 OCR 工具 '{program}': {diagnostics}")]
    NotStarted {
        program: String,
        diagnostics: String,
    },
    #[error("OCR 工具退出码 {code:?}: {diagnostics}")]
    NonZeroExit {
        code: Option<i32>,
        diagnostics: String,
    },
}

impl ExecutionFailure {
    /// 捕获的诊断输出
    pub fn diagnostics(&self) -> &str {
        match self {
            ExecutionFailure::NotStarted { diagnostics, .. } => diagnostics,
            ExecutionFailure::NonZeroExit { diagnostics, .. } => diagnostics,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("选项 '{key}' 的值无效: {reason}")]
    InvalidOptionValue { key: String, reason: String },
    #[error("配置无效 ({option}): {reason}")]
    InvalidConfiguration { option: String, reason: String },
    #[error("加载设置文件 {path} 失败: {reason}")]
    SettingsLoad { path: PathBuf, reason: String },
    #[error("保存设置文件 {path} 失败: {reason}")]
    SettingsSave { path: PathBuf, reason: String },
    #[error(transparent)]
    Execution(#[from] ExecutionFailure),
    #[error("OCR 运行中, 无法{action}")]
    Busy { action: String },
}

impl Error {
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidOptionValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_config(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
