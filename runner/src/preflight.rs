use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use common::{Error, ExecutionFailure, Result, is_pdf};
use options::{OcrOptions, OptionKey, language_codes};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// 默认 Tesseract 可执行文件
pub const DEFAULT_TESSERACT: &str = "tesseract";

/// 解析 `tesseract --list-langs` 输出
///
/// 首行为标题 (`List of available languages ... :`), 其余每行一个语言代码
///
/// # 参数
///
/// * `output` - 命令输出
pub fn parse_language_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.ends_with(':') && !line.contains(' '))
        .map(String::from)
        .collect()
}

/// 查询已安装的 Tesseract 语言
///
/// # 参数
///
/// * `tesseract` - tesseract 可执行文件名称或路径
pub fn supported_languages(tesseract: &Path) -> Result<Vec<String>> {
    let output = Command::new(tesseract)
        .arg("--list-langs")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            let diagnostics = if e.kind() == ErrorKind::NotFound {
                format!("未找到 {} (apt install tesseract-ocr)", tesseract.display())
            } else {
                e.to_string()
            };
            ExecutionFailure::NotStarted {
                program: tesseract.to_string_lossy().into_owned(),
                diagnostics,
            }
        })?;

    if !output.status.success() {
        return Err(ExecutionFailure::NonZeroExit {
            code: output.status.code(),
            diagnostics: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    // 旧版本 tesseract 将列表输出到 stderr
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push('\n');
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    let languages = parse_language_list(&text);
    debug!("已安装语言: {:?}", languages);
    Ok(languages)
}

/// 输出文件是否指向输入文件 (输出文件可能尚不存在)
///
/// # 参数
///
/// * `input` - 输入文件, 已确认存在
/// * `parent` - 输出目录, 已确认存在
/// * `output` - 输出文件
fn same_file(input: &Path, parent: &Path, output: &Path) -> bool {
    let Ok(input) = fs::canonicalize(input) else {
        return false;
    };
    let output = match fs::canonicalize(output) {
        Ok(output) => output,
        Err(_) => match (fs::canonicalize(parent), output.file_name()) {
            (Ok(dir), Some(name)) => dir.join(name),
            _ => return false,
        },
    };
    input == output
}

/// 启动外部命令前检查文件系统与语言
///
/// # 参数
///
/// * `options` - OCR 选项
/// * `supported` - 已安装的语言, 未知时为 `None`
pub fn preflight(options: &OcrOptions, supported: Option<&[String]>) -> Result<()> {
    let input = Path::new(options.input_file.trim());
    match fs::metadata(input) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            return Err(Error::invalid_config(
                OptionKey::InputFile.name(),
                format!("{} 不是文件", input.display()),
            ));
        }
        Err(e) => {
            return Err(Error::invalid_config(
                OptionKey::InputFile.name(),
                format!("无法读取 {}: {}", input.display(), e),
            ));
        }
    }
    if !is_pdf(input) {
        warn!("输入文件 {} 不是 PDF 扩展名", input.display());
    }

    let output = Path::new(options.output_file.trim());
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match fs::metadata(parent) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(Error::invalid_config(
                OptionKey::OutputFile.name(),
                format!("{} 不是目录", parent.display()),
            ));
        }
        Err(e) => {
            return Err(Error::invalid_config(
                OptionKey::OutputFile.name(),
                format!("输出目录 {} 不存在: {}", parent.display(), e),
            ));
        }
    }
    // 权限位不反映当前用户, 以实际创建文件为准
    NamedTempFile::new_in(parent).map_err(|e| {
        Error::invalid_config(
            OptionKey::OutputFile.name(),
            format!("输出目录 {} 不可写: {}", parent.display(), e),
        )
    })?;

    if same_file(input, parent, output) {
        return Err(Error::invalid_config(
            OptionKey::OutputFile.name(),
            format!("输出文件 {} 与输入文件相同", output.display()),
        ));
    }

    if let (Some(language), Some(supported)) = (&options.language, supported) {
        for code in language_codes(language) {
            if !supported.iter().any(|s| s == code) {
                return Err(Error::invalid_config(
                    OptionKey::Language.name(),
                    format!("OCR 引擎未安装语言 '{}'", code),
                ));
            }
        }
    }
    Ok(())
}
