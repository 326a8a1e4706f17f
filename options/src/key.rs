use std::fmt::{self, Display};
use std::str::FromStr;

use common::Error;

/// 选项值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Text,
    Path,
}

/// 可识别的选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    InputFile,
    OutputFile,
    Deskew,
    RotatePages,
    ForceOcr,
    SkipText,
    RemoveBackground,
    CleanFinal,
    Language,
    OpenOutput,
    SaveSettings,
}

impl OptionKey {
    /// 所有选项, 顺序与设置文件一致
    pub const ALL: [OptionKey; 11] = [
        OptionKey::InputFile,
        OptionKey::OutputFile,
        OptionKey::Deskew,
        OptionKey::RotatePages,
        OptionKey::ForceOcr,
        OptionKey::SkipText,
        OptionKey::RemoveBackground,
        OptionKey::CleanFinal,
        OptionKey::Language,
        OptionKey::OpenOutput,
        OptionKey::SaveSettings,
    ];

    /// 选项名称
    pub fn name(&self) -> &'static str {
        match self {
            OptionKey::InputFile => "input_file",
            OptionKey::OutputFile => "output_file",
            OptionKey::Deskew => "deskew",
            OptionKey::RotatePages => "rotate_pages",
            OptionKey::ForceOcr => "force_ocr",
            OptionKey::SkipText => "skip_text",
            OptionKey::RemoveBackground => "remove_background",
            OptionKey::CleanFinal => "clean_final",
            OptionKey::Language => "language",
            OptionKey::OpenOutput => "open_output",
            OptionKey::SaveSettings => "save_settings",
        }
    }

    /// 选项值类型
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionKey::InputFile | OptionKey::OutputFile => OptionKind::Path,
            OptionKey::Language => OptionKind::Text,
            _ => OptionKind::Bool,
        }
    }

    /// 选项说明
    pub fn description(&self) -> &'static str {
        match self {
            OptionKey::InputFile => "输入 PDF 文件",
            OptionKey::OutputFile => "输出 PDF 文件",
            OptionKey::Deskew => "校正倾斜页面",
            OptionKey::RotatePages => "自动旋转页面",
            OptionKey::ForceOcr => "强制 OCR (栅格化已有文本)",
            OptionKey::SkipText => "跳过已有文本的页面",
            OptionKey::RemoveBackground => "移除背景",
            OptionKey::CleanFinal => "清理最终输出 (需要 unpaper)",
            OptionKey::Language => "识别语言, 多个语言以 '+' 连接",
            OptionKey::OpenOutput => "完成后打开输出文件",
            OptionKey::SaveSettings => "运行后及退出时保存设置",
        }
    }

    /// 是否影响外部 OCR 命令 (界面选项不影响)
    pub fn affects_command(&self) -> bool {
        !matches!(self, OptionKey::OpenOutput | OptionKey::SaveSettings)
    }
}

impl Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().replace('-', "_");
        OptionKey::ALL
            .into_iter()
            .find(|key| key.name() == name)
            .ok_or_else(|| Error::invalid_value(s, "未知的选项"))
    }
}

/// 选项值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
    Unset,
}

impl OptionValue {
    /// 解析文本形式的布尔值
    ///
    /// # 参数
    ///
    /// * `raw` - 文本
    pub fn parse_bool(raw: &str) -> Option<bool> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Text(s) => write!(f, "{}", s),
            OptionValue::Unset => f.write_str("<未设置>"),
        }
    }
}
