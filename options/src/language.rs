/// 默认识别语言
pub const DEFAULT_LANGUAGE: &str = "eng";

/// 常用识别语言
pub const COMMON_LANGUAGES: [&str; 10] = [
    "deu", "eng", "fra", "spa", "ita", "nld", "por", "rus", "chi_sim", "jpn",
];

/// 拆分语言参数, `eng+deu` => `["eng", "deu"]`
///
/// # 参数
///
/// * `language` - 语言参数
pub fn language_codes(language: &str) -> Vec<&str> {
    language.split('+').collect()
}

/// 检查语言参数格式
///
/// 每个语言代码由小写字母、数字和下划线组成, 多个语言以 `+` 连接
///
/// # 参数
///
/// * `language` - 语言参数
pub fn is_valid_language(language: &str) -> bool {
    !language.is_empty()
        && language_codes(language).iter().all(|code| {
            !code.is_empty()
                && code
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        })
}
