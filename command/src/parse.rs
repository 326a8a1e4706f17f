use common::{Error, Result};
use options::{OcrOptions, OptionKey, OptionValue};
use tracing::debug;

use crate::{END_OF_OPTIONS, FLAG_TOKENS, LANGUAGE_SHORT_TOKEN, LANGUAGE_TOKEN};

/// 将外部命令参数解析回 OCR 选项
///
/// 仅恢复影响外部命令的选项, 界面选项保持默认值, 未指定语言时语言为空
///
/// # 参数
///
/// * `args` - 命令参数
pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<OcrOptions> {
    let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
    debug!("解析 OCR 命令参数: {:?}", args);

    let mut options = OcrOptions {
        language: None,
        ..Default::default()
    };
    let mut positional = Vec::new();
    let mut iter = args.iter().copied();

    while let Some(arg) = iter.next() {
        if arg == END_OF_OPTIONS {
            positional.extend(iter.by_ref());
            break;
        }
        if let Some((key, _)) = FLAG_TOKENS.iter().find(|(_, token)| *token == arg) {
            options.set(*key, OptionValue::Bool(true))?;
        } else if arg == LANGUAGE_TOKEN || arg == LANGUAGE_SHORT_TOKEN {
            let language = iter.next().ok_or_else(|| {
                Error::invalid_config(OptionKey::Language.name(), "缺少语言代码")
            })?;
            set_language(&mut options, language)?;
        } else if let Some(language) = arg.strip_prefix("--language=") {
            set_language(&mut options, language)?;
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(Error::invalid_config(arg, "不支持的参数"));
        } else {
            positional.push(arg);
        }
    }

    match positional.as_slice() {
        [input, output] => {
            options.input_file = input.to_string();
            options.output_file = output.to_string();
        }
        _ => {
            return Err(Error::invalid_config(
                OptionKey::InputFile.name(),
                format!("需要输入和输出两个文件, 实际为 {} 个", positional.len()),
            ));
        }
    }
    Ok(options)
}

fn set_language(options: &mut OcrOptions, language: &str) -> Result<()> {
    options
        .set(OptionKey::Language, OptionValue::Text(language.to_string()))
        .map_err(|e| Error::invalid_config(OptionKey::Language.name(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;

    #[test]
    fn test_parse() {
        let options = parse(&["-l", "deu", "--rotate-pages", "in.pdf", "out.pdf"]).unwrap();
        assert!(options.rotate_pages);
        assert_eq!(options.language.as_deref(), Some("deu"));
        assert_eq!(options.input_file, "in.pdf");
        assert_eq!(options.output_file, "out.pdf");

        let options = parse(&["--language=eng+fra", "in.pdf", "out.pdf"]).unwrap();
        assert_eq!(options.language.as_deref(), Some("eng+fra"));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse(&["--jbig2-lossy", "in.pdf", "out.pdf"]).is_err());
        assert!(parse(&["in.pdf"]).is_err());
        assert!(parse(&["in.pdf", "out.pdf", "extra.pdf"]).is_err());
        assert!(parse(&["in.pdf", "out.pdf", "--language"]).is_err());
    }

    #[test]
    fn test_parse_end_of_options() {
        let options = parse(&["--skip-text", "--", "-scan.pdf", "--out.pdf"]).unwrap();
        assert!(options.skip_text);
        assert_eq!(options.input_file, "-scan.pdf");
        assert_eq!(options.output_file, "--out.pdf");

        assert!(parse(&["--", "in.pdf", "out.pdf", "--deskew"]).is_err());
    }

    #[test]
    fn test_build_then_parse_dash_paths() {
        for (input, output) in [("-scan.pdf", "out.pdf"), ("in.pdf", "-out.pdf"), ("-", "-o.pdf")] {
            let options = OcrOptions {
                input_file: input.to_string(),
                output_file: output.to_string(),
                language: None,
                deskew: true,
                ..Default::default()
            };
            let args = build(&options).unwrap();
            assert_eq!(parse(args.as_slice()).unwrap(), options);
        }
    }

    #[test]
    fn test_build_then_parse() {
        let flags = FLAG_TOKENS.map(|(key, _)| key);
        let languages = [None, Some("eng"), Some("chi_sim+eng")];

        for mask in 0u32..(1 << flags.len()) {
            for language in languages {
                let mut options = OcrOptions {
                    input_file: "scans/in.pdf".to_string(),
                    output_file: "scans/out.pdf".to_string(),
                    language: language.map(String::from),
                    ..Default::default()
                };
                for (i, key) in flags.iter().enumerate() {
                    options
                        .set(*key, OptionValue::Bool(mask & (1 << i) != 0))
                        .unwrap();
                }

                let Ok(args) = build(&options) else {
                    assert!(options.force_ocr && options.skip_text);
                    continue;
                };
                let parsed = parse(args.as_slice()).unwrap();
                assert_eq!(parsed.enabled_options(), options.enabled_options());
                assert_eq!(parsed, options);
            }
        }
    }
}
