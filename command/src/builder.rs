use common::{Error, Result};
use options::{OcrOptions, OptionKey, is_valid_language};
use tracing::debug;

use crate::arguments::Arguments;
use crate::{END_OF_OPTIONS, EXCLUSIVE_FLAGS, FLAG_TOKENS, LANGUAGE_TOKEN};

/// 检查 OCR 选项组合
///
/// # 参数
///
/// * `options` - OCR 选项
fn validate(options: &OcrOptions) -> Result<()> {
    if options.input_file.trim().is_empty() {
        return Err(Error::invalid_config(
            OptionKey::InputFile.name(),
            "未选择输入文件",
        ));
    }
    if options.output_file.trim().is_empty() {
        return Err(Error::invalid_config(
            OptionKey::OutputFile.name(),
            "未选择输出文件",
        ));
    }
    if options.input_file.trim() == options.output_file.trim() {
        return Err(Error::invalid_config(
            OptionKey::OutputFile.name(),
            "输出文件不能与输入文件相同",
        ));
    }

    if let Some(language) = &options.language {
        if language.trim().is_empty() {
            return Err(Error::invalid_config(
                OptionKey::Language.name(),
                "已启用语言选项但未填写语言代码",
            ));
        }
        if !is_valid_language(language) {
            return Err(Error::invalid_config(
                OptionKey::Language.name(),
                format!("'{}' 不是有效的语言代码", language),
            ));
        }
    }

    for (a, b) in EXCLUSIVE_FLAGS {
        if enabled(options, a) && enabled(options, b) {
            return Err(Error::invalid_config(
                b.name(),
                format!("'{}' 与 '{}' 不能同时启用", a, b),
            ));
        }
    }
    Ok(())
}

fn enabled(options: &OcrOptions, key: OptionKey) -> bool {
    options.enabled_options().contains(&key)
}

/// 将 OCR 选项转换为外部命令参数
///
/// 参数顺序固定: 布尔选项 (按 `FLAG_TOKENS` 顺序), 语言, 输入文件, 输出文件
///
/// 文件名以 `-` 开头时在文件前插入 `--`, 避免被当作选项
///
/// # 参数
///
/// * `options` - OCR 选项
pub fn build(options: &OcrOptions) -> Result<Arguments> {
    validate(options)?;

    let mut args = Vec::new();
    for (key, token) in FLAG_TOKENS {
        if enabled(options, key) {
            args.push(token.to_string());
        }
    }
    if let Some(language) = &options.language {
        args.push(LANGUAGE_TOKEN.to_string());
        args.push(language.trim().to_string());
    }
    let input = options.input_file.trim();
    let output = options.output_file.trim();
    if input.starts_with('-') || output.starts_with('-') {
        args.push(END_OF_OPTIONS.to_string());
    }
    args.push(input.to_string());
    args.push(output.to_string());

    let args = Arguments::new(args);
    debug!("构建 OCR 命令参数: {}", args);
    Ok(args)
}
