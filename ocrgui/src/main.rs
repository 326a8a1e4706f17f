use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use options::{OptionKey, SettingsStore};
use runner::{DOCS_URL, ExecutionResult, OcrMyPdf, RunState, open_path, supported_languages};
use tracing::{error, info, warn};

use crate::app::{App, RunOutcome};
use crate::args::Args;
use crate::log::init_log;

mod app;
mod args;
mod log;

/// 显示所有选项及当前值
fn list_options(app: &App) {
    info!("可用的选项:");
    for key in OptionKey::ALL {
        info!(
            "  - {:<18} = {:<24} {}",
            key.name(),
            app.options().get(key).to_string(),
            key.description()
        );
    }
}

/// 等待后台 OCR 结束, 期间显示忙碌状态
fn wait_for_result(rx: Receiver<ExecutionResult>) -> Result<ExecutionResult> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")?);
    spinner.set_message("OCR 处理中");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = rx.recv().context("OCR 后台线程异常退出");
    spinner.finish_and_clear();
    result
}

/// 程序入口
fn application() -> Result<()> {
    let args = Args::new();

    init_log(&args)?;

    info!("欢迎使用 OCRmyPDF SimpleGUI");

    if args.open_docs {
        open_path(DOCS_URL)?;
        return Ok(());
    }

    if args.list_languages {
        info!("已安装的语言:");
        for language in supported_languages(&args.tesseract)? {
            info!("  - {}", language);
        }
        return Ok(());
    }

    let runner = OcrMyPdf::new(&args.ocrmypdf);
    match runner.locate() {
        Some(path) => info!("使用 OCR 工具: {}", path.display()),
        None => warn!("未在 PATH 中找到 {}", runner.program().display()),
    }

    let mut app = App::new(
        SettingsStore::new(&args.settings_file),
        Arc::new(runner.clone()),
        &args.tesseract,
    );

    let state = handle_events(&mut app, &args, &runner);
    // 无论处理是否出错, 退出前都按需保存设置
    let closed = finish(&app, &args);
    if let (Err(_), Err(e)) = (&state, &closed) {
        error!("{}", e);
    }
    match state? {
        RunState::Failed => {
            closed?;
            bail!("OCR 处理失败");
        }
        _ => closed,
    }
}

/// 依据命令行参数依次触发界面事件
///
/// # 参数
///
/// * `app` - 应用
/// * `args` - 命令行参数
/// * `runner` - OCR 执行器
fn handle_events(app: &mut App, args: &Args, runner: &OcrMyPdf) -> Result<RunState> {
    if !args.files.is_empty() {
        app.on_files_dropped(&args.files)?;
    }
    if let Some(input) = &args.input {
        app.on_input_selected(input)?;
    }
    if let Some(output) = &args.output {
        app.on_output_selected(output)?;
    }
    for (key, value) in &args.set {
        app.on_edit(key, value)?;
    }

    if args.list_options {
        list_options(app);
        return Ok(app.state());
    }

    if args.dry_run {
        let command = command::build(app.options())?;
        info!("{} {}", runner.program().display(), command);
        return Ok(app.state());
    }

    let state = match app.on_run()? {
        RunOutcome::Started(rx) => {
            let result = wait_for_result(rx)?;
            app.on_finished(&result)
        }
        RunOutcome::Busy => app.state(),
    };
    Ok(state)
}

/// 退出前按需保存设置, `--save` 时总是保存
fn finish(app: &App, args: &Args) -> Result<()> {
    if args.save {
        app.save()?;
    } else {
        app.on_close()?;
    }
    Ok(())
}

fn main() {
    match application() {
        Ok(_) => {
            info!("程序已执行完毕");
        }
        Err(e) => {
            error!("程序存在异常: {}", e);
            std::process::exit(1);
        }
    }
}
