use common::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::key::{OptionKey, OptionKind, OptionValue};
use crate::language::{DEFAULT_LANGUAGE, is_valid_language};

/// OCR 选项集合
///
/// 设置文件中缺失的字段使用默认值
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct OcrOptions {
    #[schemars(title = "输入 PDF 文件")]
    pub input_file: String,
    #[schemars(title = "输出 PDF 文件")]
    pub output_file: String,
    #[schemars(title = "校正倾斜页面")]
    pub deskew: bool,
    #[schemars(title = "自动旋转页面")]
    pub rotate_pages: bool,
    #[schemars(title = "强制 OCR")]
    pub force_ocr: bool,
    #[schemars(title = "跳过已有文本的页面")]
    pub skip_text: bool,
    #[schemars(title = "移除背景")]
    pub remove_background: bool,
    #[schemars(title = "清理最终输出")]
    pub clean_final: bool,
    #[schemars(title = "识别语言 (如 eng, chi_sim, eng+deu)")]
    pub language: Option<String>,
    #[schemars(title = "完成后打开输出文件")]
    pub open_output: bool,
    #[schemars(title = "保存设置")]
    pub save_settings: bool,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            input_file: String::new(),
            output_file: String::new(),
            deskew: false,
            rotate_pages: false,
            force_ocr: false,
            skip_text: false,
            remove_background: false,
            clean_final: false,
            language: Some(DEFAULT_LANGUAGE.to_string()),
            open_output: false,
            save_settings: false,
        }
    }
}

impl OcrOptions {
    fn flag(&self, key: OptionKey) -> Option<&bool> {
        match key {
            OptionKey::Deskew => Some(&self.deskew),
            OptionKey::RotatePages => Some(&self.rotate_pages),
            OptionKey::ForceOcr => Some(&self.force_ocr),
            OptionKey::SkipText => Some(&self.skip_text),
            OptionKey::RemoveBackground => Some(&self.remove_background),
            OptionKey::CleanFinal => Some(&self.clean_final),
            OptionKey::OpenOutput => Some(&self.open_output),
            OptionKey::SaveSettings => Some(&self.save_settings),
            _ => None,
        }
    }

    fn flag_mut(&mut self, key: OptionKey) -> Option<&mut bool> {
        match key {
            OptionKey::Deskew => Some(&mut self.deskew),
            OptionKey::RotatePages => Some(&mut self.rotate_pages),
            OptionKey::ForceOcr => Some(&mut self.force_ocr),
            OptionKey::SkipText => Some(&mut self.skip_text),
            OptionKey::RemoveBackground => Some(&mut self.remove_background),
            OptionKey::CleanFinal => Some(&mut self.clean_final),
            OptionKey::OpenOutput => Some(&mut self.open_output),
            OptionKey::SaveSettings => Some(&mut self.save_settings),
            _ => None,
        }
    }

    /// 获取选项值
    ///
    /// # 参数
    ///
    /// * `key` - 选项
    pub fn get(&self, key: OptionKey) -> OptionValue {
        match key {
            OptionKey::InputFile => OptionValue::Text(self.input_file.clone()),
            OptionKey::OutputFile => OptionValue::Text(self.output_file.clone()),
            OptionKey::Language => match &self.language {
                Some(language) => OptionValue::Text(language.clone()),
                None => OptionValue::Unset,
            },
            _ => match self.flag(key) {
                Some(value) => OptionValue::Bool(*value),
                None => OptionValue::Unset,
            },
        }
    }

    /// 设置选项值, 值类型与选项不符时返回 `InvalidOptionValue`
    ///
    /// # 参数
    ///
    /// * `key` - 选项
    /// * `value` - 选项值
    pub fn set(&mut self, key: OptionKey, value: OptionValue) -> Result<()> {
        debug!("设置选项 {} = {}", key, value);
        match (key.kind(), value) {
            (OptionKind::Bool, OptionValue::Bool(value)) => {
                if let Some(flag) = self.flag_mut(key) {
                    *flag = value;
                }
            }
            (OptionKind::Path, OptionValue::Text(path)) => {
                let path = path.trim().to_string();
                if key == OptionKey::InputFile {
                    self.input_file = path;
                } else {
                    self.output_file = path;
                }
            }
            (OptionKind::Path, OptionValue::Unset) => {
                if key == OptionKey::InputFile {
                    self.input_file.clear();
                } else {
                    self.output_file.clear();
                }
            }
            (OptionKind::Text, OptionValue::Text(language)) => {
                if !is_valid_language(&language) {
                    return Err(Error::invalid_value(
                        key.name(),
                        format!("'{}' 不是有效的语言代码", language),
                    ));
                }
                self.language = Some(language);
            }
            (OptionKind::Text, OptionValue::Unset) => self.language = None,
            (OptionKind::Bool, value) => {
                return Err(Error::invalid_value(
                    key.name(),
                    format!("需要布尔值, 实际为 '{}'", value),
                ));
            }
            (_, OptionValue::Bool(value)) => {
                return Err(Error::invalid_value(
                    key.name(),
                    format!("需要文本, 实际为布尔值 {}", value),
                ));
            }
        }
        Ok(())
    }

    /// 通过文本设置选项值
    ///
    /// # 参数
    ///
    /// * `name` - 选项名称
    /// * `raw` - 文本形式的选项值, 空文本表示清除
    pub fn set_str(&mut self, name: &str, raw: &str) -> Result<()> {
        let key: OptionKey = name.parse()?;
        let value = match key.kind() {
            OptionKind::Bool => OptionValue::parse_bool(raw).map(OptionValue::Bool).ok_or_else(
                || Error::invalid_value(key.name(), format!("'{}' 不是布尔值", raw)),
            )?,
            _ if raw.trim().is_empty() => OptionValue::Unset,
            _ => OptionValue::Text(raw.trim().to_string()),
        };
        self.set(key, value)
    }

    /// 已启用且影响外部命令的选项
    pub fn enabled_options(&self) -> Vec<OptionKey> {
        OptionKey::ALL
            .into_iter()
            .filter(|key| key.affects_command())
            .filter(|key| match self.get(*key) {
                OptionValue::Bool(value) => value,
                OptionValue::Text(text) => !text.is_empty(),
                OptionValue::Unset => false,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let options = OcrOptions::default();
        assert_eq!(options.language.as_deref(), Some("eng"));
        assert!(!options.deskew);
        assert!(options.enabled_options().contains(&OptionKey::Language));
    }

    #[test]
    fn test_get_set() {
        let mut options = OcrOptions::default();
        options.set(OptionKey::Deskew, OptionValue::Bool(true)).unwrap();
        options
            .set(OptionKey::InputFile, OptionValue::Text(" a.pdf ".to_string()))
            .unwrap();
        options
            .set(OptionKey::Language, OptionValue::Text("eng+deu".to_string()))
            .unwrap();

        assert_eq!(options.get(OptionKey::Deskew), OptionValue::Bool(true));
        assert_eq!(
            options.get(OptionKey::InputFile),
            OptionValue::Text("a.pdf".to_string())
        );
        assert_eq!(
            options.get(OptionKey::Language),
            OptionValue::Text("eng+deu".to_string())
        );

        options.set(OptionKey::Language, OptionValue::Unset).unwrap();
        assert_eq!(options.get(OptionKey::Language), OptionValue::Unset);
    }

    #[test]
    fn test_set_rejects_wrong_shape() {
        let mut options = OcrOptions::default();
        let before = options.clone();

        let err = options
            .set(OptionKey::Deskew, OptionValue::Text("yes".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOptionValue { ref key, .. } if key == "deskew"));

        let err = options
            .set(OptionKey::Language, OptionValue::Bool(true))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOptionValue { .. }));

        let err = options
            .set(OptionKey::Language, OptionValue::Text("en g".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOptionValue { .. }));

        assert_eq!(options, before);
    }

    #[test]
    fn test_set_str() {
        let mut options = OcrOptions::default();
        options.set_str("rotate-pages", "yes").unwrap();
        options.set_str("output_file", "out.pdf").unwrap();
        options.set_str("language", "").unwrap();

        assert!(options.rotate_pages);
        assert_eq!(options.output_file, "out.pdf");
        assert_eq!(options.language, None);

        assert!(options.set_str("deskew", "sometimes").is_err());
        assert!(options.set_str("unknown", "true").is_err());
    }

    #[test]
    fn test_enabled_options() {
        let mut options = OcrOptions::default();
        options.input_file = "a.pdf".to_string();
        options.force_ocr = true;
        options.open_output = true;

        assert_eq!(
            options.enabled_options(),
            vec![OptionKey::InputFile, OptionKey::ForceOcr, OptionKey::Language]
        );
    }
}
