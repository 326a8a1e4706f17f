use std::fmt::{self, Display};
use std::path::Path;

/// 外部 OCR 命令参数序列
///
/// 最后两个参数固定为输入文件与输出文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments(Vec<String>);

impl Arguments {
    pub(crate) fn new(args: Vec<String>) -> Self {
        debug_assert!(args.len() >= 2);
        Self(args)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// 输入文件
    pub fn input(&self) -> &Path {
        Path::new(&self.0[self.0.len() - 2])
    }

    /// 输出文件
    pub fn output(&self) -> &Path {
        Path::new(&self.0[self.0.len() - 1])
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl AsRef<[String]> for Arguments {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(|arg| {
                if arg.is_empty() || arg.contains(char::is_whitespace) {
                    format!("\"{}\"", arg)
                } else {
                    arg.clone()
                }
            })
            .collect::<Vec<_>>();
        f.write_str(&rendered.join(" "))
    }
}
