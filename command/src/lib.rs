use options::OptionKey;

mod arguments;
mod builder;
mod parse;

pub use arguments::Arguments;
pub use builder::build;
pub use parse::parse;

/// 布尔选项与 ocrmypdf 命令行参数的对应关系, 按输出顺序排列
///
/// 需与已安装的 ocrmypdf 版本保持一致 (ocrmypdf >= 13)
pub const FLAG_TOKENS: [(OptionKey, &str); 6] = [
    (OptionKey::Deskew, "--deskew"),
    (OptionKey::RotatePages, "--rotate-pages"),
    (OptionKey::ForceOcr, "--force-ocr"),
    (OptionKey::SkipText, "--skip-text"),
    (OptionKey::RemoveBackground, "--remove-background"),
    (OptionKey::CleanFinal, "--clean-final"),
];

/// 语言参数
pub const LANGUAGE_TOKEN: &str = "--language";

/// 语言参数简写
pub const LANGUAGE_SHORT_TOKEN: &str = "-l";

/// 选项结束标记, 之后的参数均为文件
pub const END_OF_OPTIONS: &str = "--";

/// 互斥选项
pub const EXCLUSIVE_FLAGS: [(OptionKey, OptionKey); 1] =
    [(OptionKey::ForceOcr, OptionKey::SkipText)];
