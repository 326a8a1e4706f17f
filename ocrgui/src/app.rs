use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use common::{Error, ExecutionFailure, Result, default_output_for, is_pdf, normalize_separators};
use options::{OcrOptions, OptionKey, SettingsStore};
use runner::{
    ExecutionResult, RunState, Runner, open_path, preflight, spawn, supported_languages,
};
use tracing::{debug, error, info, warn};

/// 打开文件的方式
type Opener = Box<dyn Fn(&str) -> Result<()>>;

/// 触发运行的结果
pub enum RunOutcome {
    /// 已在后台启动, 完成后从通道接收结果
    Started(Receiver<ExecutionResult>),
    /// 已有任务在运行, 本次触发被忽略
    Busy,
}

/// 界面事件处理, 与具体界面工具包无关
///
/// 持有 OCR 选项、设置存储与执行器, 运行期间拒绝修改选项
pub struct App {
    options: OcrOptions,
    store: SettingsStore,
    runner: Arc<dyn Runner>,
    tesseract: PathBuf,
    state: RunState,
    opener: Opener,
}

impl App {
    /// 创建应用, 从设置存储加载选项, 加载失败时使用默认选项
    ///
    /// # 参数
    ///
    /// * `store` - 设置存储
    /// * `runner` - OCR 执行器
    /// * `tesseract` - tesseract 可执行文件, 用于查询已安装语言
    pub fn new(store: SettingsStore, runner: Arc<dyn Runner>, tesseract: impl Into<PathBuf>) -> Self {
        let options = match store.load() {
            Ok(options) => options,
            Err(e) => {
                error!("{}, 使用默认设置", e);
                OcrOptions::default()
            }
        };
        if options.input_file.is_empty() {
            info!("请选择输入文件");
        }
        Self {
            options,
            store,
            runner,
            tesseract: tesseract.into(),
            state: RunState::Idle,
            opener: Box::new(open_path),
        }
    }

    /// 替换打开文件的方式
    pub fn with_opener(mut self, opener: impl Fn(&str) -> Result<()> + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    pub fn options(&self) -> &OcrOptions {
        &self.options
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn ensure_idle(&self, key: &str) -> Result<()> {
        if self.state == RunState::Running {
            return Err(Error::Busy {
                action: format!("修改选项 '{}'", key),
            });
        }
        Ok(())
    }

    /// 选择输入文件, 同时设置默认输出文件
    ///
    /// # 参数
    ///
    /// * `path` - 输入文件
    pub fn on_input_selected(&mut self, path: &Path) -> Result<()> {
        self.ensure_idle(OptionKey::InputFile.name())?;
        let output = normalize_separators(&default_output_for(path));
        self.options.input_file = normalize_separators(path);
        info!("已选择输入文件: {}", self.options.input_file);
        self.options.output_file = output;
        info!("默认输出文件: {}", self.options.output_file);
        Ok(())
    }

    /// 选择输出文件
    ///
    /// # 参数
    ///
    /// * `path` - 输出文件
    pub fn on_output_selected(&mut self, path: &Path) -> Result<()> {
        self.ensure_idle(OptionKey::OutputFile.name())?;
        self.options.output_file = normalize_separators(path);
        info!("已选择输出文件: {}", self.options.output_file);
        Ok(())
    }

    /// 拖放文件, 取第一个 PDF 作为输入文件
    ///
    /// # 参数
    ///
    /// * `paths` - 拖放的文件列表
    pub fn on_files_dropped(&mut self, paths: &[PathBuf]) -> Result<bool> {
        match paths.iter().find(|path| is_pdf(path)) {
            Some(path) => {
                self.on_input_selected(path)?;
                Ok(true)
            }
            None => {
                warn!("拖放的文件中没有 PDF 文件");
                Ok(false)
            }
        }
    }

    /// 修改选项
    ///
    /// # 参数
    ///
    /// * `name` - 选项名称
    /// * `raw` - 文本形式的选项值
    pub fn on_edit(&mut self, name: &str, raw: &str) -> Result<()> {
        self.ensure_idle(name)?;
        self.options.set_str(name, raw)
    }

    /// 触发 OCR, 构建并检查命令参数后在后台执行
    ///
    /// 运行期间再次触发将被忽略, 配置无效时不启动任何进程
    pub fn on_run(&mut self) -> Result<RunOutcome> {
        if self.state == RunState::Running {
            warn!("OCR 正在运行, 忽略本次触发");
            return Ok(RunOutcome::Busy);
        }

        let args = command::build(&self.options)?;
        let supported = match supported_languages(&self.tesseract) {
            Ok(languages) => Some(languages),
            Err(e) => {
                warn!("无法查询已安装语言, 跳过语言检查: {}", e);
                None
            }
        };
        preflight(&self.options, supported.as_deref())?;

        let (tx, rx) = mpsc::channel();
        let handle = spawn(Arc::clone(&self.runner), args, move |result| {
            // 接收端已关闭时结果无人处理
            let _ = tx.send(result);
        });
        match handle {
            Ok(_) => {
                self.state = RunState::Running;
                info!("OCR 处理中...");
                Ok(RunOutcome::Started(rx))
            }
            Err(e) => Err(ExecutionFailure::NotStarted {
                program: "ocr-worker".to_string(),
                diagnostics: e.to_string(),
            }
            .into()),
        }
    }

    /// OCR 结束
    ///
    /// # 参数
    ///
    /// * `result` - 执行结果
    pub fn on_finished(&mut self, result: &ExecutionResult) -> RunState {
        self.state = result.state();
        match result {
            ExecutionResult::Succeeded {
                output,
                diagnostics,
            } => {
                for line in diagnostics.lines() {
                    debug!("{}", line);
                }
                info!("OCR 处理完成: {}", output.display());
                if self.options.open_output {
                    if let Err(e) = (self.opener)(&output.to_string_lossy()) {
                        error!("打开输出文件失败: {}", e);
                    }
                }
            }
            ExecutionResult::Failed(failure) => {
                error!("OCR 处理失败: {}", failure);
            }
        }

        if self.options.save_settings {
            if let Err(e) = self.save() {
                error!("{}", e);
            }
        }
        self.state
    }

    /// 保存设置
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.options)
    }

    /// 退出, 启用保存设置时保存
    pub fn on_close(&self) -> Result<()> {
        if self.options.save_settings {
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;

    use command::Arguments;
    use tempfile::{TempDir, tempdir};

    struct FakeRunner(bool);

    impl Runner for FakeRunner {
        fn run(&self, args: &Arguments) -> ExecutionResult {
            if self.0 {
                ExecutionResult::Succeeded {
                    output: args.output().to_path_buf(),
                    diagnostics: String::new(),
                }
            } else {
                ExecutionResult::Failed(ExecutionFailure::NonZeroExit {
                    code: Some(2),
                    diagnostics: "input file is not a valid PDF".to_string(),
                })
            }
        }
    }

    fn app(dir: &TempDir, success: bool) -> App {
        let store = SettingsStore::new(dir.path().join("settings.yaml"));
        App::new(
            store,
            Arc::new(FakeRunner(success)),
            "tesseract-does-not-exist-7f3a",
        )
    }

    fn input_in(dir: &TempDir) -> PathBuf {
        let input = dir.path().join("scan.pdf");
        fs::write(&input, b"%PDF-1.4").unwrap();
        input
    }

    #[test]
    fn test_files_dropped() {
        let dir = tempdir().unwrap();
        let mut app = app(&dir, true);

        let dropped = app
            .on_files_dropped(&[PathBuf::from("notes.txt"), PathBuf::from("docs/Report.PDF")])
            .unwrap();
        assert!(dropped);
        assert_eq!(app.options().input_file, "docs/Report.PDF");
        assert_eq!(app.options().output_file, "docs/Report_OCRed.pdf");

        assert!(!app.on_files_dropped(&[PathBuf::from("a.png")]).unwrap());
        assert_eq!(app.options().input_file, "docs/Report.PDF");
    }

    #[test]
    fn test_run_invalid_configuration() {
        let dir = tempdir().unwrap();
        let mut app = app(&dir, true);

        let err = app.on_run().err().unwrap();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
        assert_eq!(app.state(), RunState::Idle);
    }

    #[test]
    fn test_run_success_opens_output_and_saves() {
        let dir = tempdir().unwrap();
        let input = input_in(&dir);
        let opened = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&opened);
        let mut app = app(&dir, true).with_opener(move |target| {
            recorder.borrow_mut().push(target.to_string());
            Ok(())
        });

        app.on_input_selected(&input).unwrap();
        app.on_edit("open_output", "true").unwrap();
        app.on_edit("save_settings", "true").unwrap();
        app.on_edit("deskew", "true").unwrap();

        let RunOutcome::Started(rx) = app.on_run().unwrap() else {
            panic!("OCR 未启动");
        };
        assert_eq!(app.state(), RunState::Running);
        assert!(matches!(app.on_run().unwrap(), RunOutcome::Busy));
        let err = app.on_edit("deskew", "false").unwrap_err();
        assert!(matches!(err, Error::Busy { .. }));
        assert!(matches!(
            app.on_input_selected(Path::new("other.pdf")).unwrap_err(),
            Error::Busy { .. }
        ));

        let result = rx.recv().unwrap();
        assert_eq!(app.on_finished(&result), RunState::Succeeded);
        assert_eq!(opened.borrow().as_slice(), [app.options().output_file.clone()]);

        let saved = SettingsStore::new(dir.path().join("settings.yaml"))
            .load()
            .unwrap();
        assert_eq!(&saved, app.options());
        assert!(saved.deskew);
    }

    #[test]
    fn test_run_failure_keeps_options() {
        let dir = tempdir().unwrap();
        let input = input_in(&dir);
        let mut app = app(&dir, false);
        app.on_input_selected(&input).unwrap();
        let before = app.options().clone();

        let RunOutcome::Started(rx) = app.on_run().unwrap() else {
            panic!("OCR 未启动");
        };
        let result = rx.recv().unwrap();
        assert_eq!(app.on_finished(&result), RunState::Failed);
        assert!(!result.diagnostics().is_empty());
        assert_eq!(app.options(), &before);

        // 未启用保存设置
        assert!(!dir.path().join("settings.yaml").exists());
        app.on_close().unwrap();
        assert!(!dir.path().join("settings.yaml").exists());
    }

    #[test]
    fn test_close_saves_after_invalid_configuration() {
        let dir = tempdir().unwrap();
        let mut app = app(&dir, true);
        app.on_edit("save_settings", "yes").unwrap();
        app.on_edit("rotate_pages", "yes").unwrap();

        let err = app.on_run().err().unwrap();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
        assert!(app.on_edit("language", "ENG").is_err());

        app.on_close().unwrap();
        let saved = SettingsStore::new(dir.path().join("settings.yaml"))
            .load()
            .unwrap();
        assert_eq!(&saved, app.options());
        assert!(saved.rotate_pages);
        assert!(saved.save_settings);
    }

    #[test]
    fn test_close_reports_save_failure() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("missing").join("settings.yaml"));
        let mut app = App::new(store, Arc::new(FakeRunner(true)), "tesseract-does-not-exist-7f3a");
        app.on_edit("save_settings", "true").unwrap();

        let err = app.on_close().unwrap_err();
        assert!(matches!(err, Error::SettingsSave { .. }));
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("settings.yaml"), "language: [").unwrap();
        let app = app(&dir, true);
        assert_eq!(app.options(), &OcrOptions::default());
    }
}
