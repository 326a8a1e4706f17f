use std::path::{Path, PathBuf};

mod error;

pub use error::{Error, ExecutionFailure, Result};

/// 输出文件名后缀
pub const OUTPUT_SUFFIX: &str = "_OCRed";

/// 是否为 PDF 文件 (按扩展名判断, 忽略大小写)
///
/// # 参数
///
/// - `path` - 文件路径
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// 依据输入文件生成默认输出文件路径
///
/// `dir/name.pdf` => `dir/name_OCRed.pdf`
///
/// # 参数
///
/// - `input` - 输入文件路径
pub fn default_output_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{}{}.pdf", stem, OUTPUT_SUFFIX);
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// 统一路径分隔符为 `/`
///
/// # 参数
///
/// - `path` - 路径
pub fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
