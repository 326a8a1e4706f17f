use std::path::PathBuf;

use clap::Parser;
use options::DEFAULT_SETTINGS_FILE;
use runner::{DEFAULT_PROGRAM, DEFAULT_TESSERACT};
use tracing::Level;

/// 解析 `KEY=VALUE` 形式的选项
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| format!("'{}' 不是 KEY=VALUE 格式", s))
}

/// OCRmyPDF SimpleGUI, 选择 PDF 文件与 OCR 选项, 调用 ocrmypdf 生成可搜索的 PDF
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// 拖放的文件, 取第一个 PDF 作为输入文件 (并设置默认输出文件)
    pub files: Vec<PathBuf>,

    /// 输入 PDF 文件 (并设置默认输出文件 <名称>_OCRed.pdf)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 输出 PDF 文件
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 设置选项, 可重复 (如 -s deskew=true -s language=eng+deu)
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,

    /// 设置文件路径
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings_file: PathBuf,

    /// ocrmypdf 可执行文件
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    pub ocrmypdf: PathBuf,

    /// tesseract 可执行文件 (用于查询已安装语言)
    #[arg(long, default_value = DEFAULT_TESSERACT)]
    pub tesseract: PathBuf,

    /// 退出时保存设置
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// 仅显示将要执行的命令, 不执行
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// 显示所有可用的选项及当前值
    #[arg(long, default_value_t = false)]
    pub list_options: bool,

    /// 显示 OCR 引擎已安装的语言
    #[arg(long, default_value_t = false)]
    pub list_languages: bool,

    /// 在浏览器中打开 ocrmypdf 文档
    #[arg(long, default_value_t = false)]
    pub open_docs: bool,

    /// 日志等级 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: Level,

    /// 日志文件路径
    #[arg(long, default_value = "ocrgui.log")]
    pub log_file: String,

    /// 追加日志到文件
    #[arg(long, default_value_t = false)]
    pub append_log: bool,
}

impl Args {
    /// 创建命令行参数解析器
    pub fn new() -> Self {
        Self::parse()
    }
}
