use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use common::{Error, Result};
use tracing::{debug, info};

use crate::ocr_options::OcrOptions;

/// 默认设置文件 (位于当前工作目录)
pub const DEFAULT_SETTINGS_FILE: &str = ".ocrgui.yaml";

/// 设置存储, 以 YAML 格式持久化 OCR 选项
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(DEFAULT_SETTINGS_FILE)
    }
}

impl SettingsStore {
    /// 创建设置存储
    ///
    /// # 参数
    ///
    /// * `path` - 设置文件路径
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载设置
    ///
    /// 文件不存在时返回默认选项, 文件损坏时返回 `SettingsLoad`
    pub fn load(&self) -> Result<OcrOptions> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("设置文件 {} 不存在, 使用默认设置", self.path.display());
                return Ok(OcrOptions::default());
            }
            Err(e) => return Err(self.load_error(e)),
        };

        if data.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(self.load_error("文件为空"));
        }

        let options = serde_yaml::from_slice::<OcrOptions>(&data)
            .map_err(|e| self.load_error(format!("解析失败, 请检查格式是否正确: {}", e)))?;
        info!("已加载设置: {}", self.path.display());
        Ok(options)
    }

    /// 保存设置
    ///
    /// # 参数
    ///
    /// * `options` - OCR 选项
    pub fn save(&self, options: &OcrOptions) -> Result<()> {
        let data = serde_yaml::to_string(options).map_err(|e| self.save_error(e))?;
        fs::write(&self.path, data).map_err(|e| self.save_error(e))?;
        info!("已保存设置: {}", self.path.display());
        Ok(())
    }

    fn load_error(&self, reason: impl ToString) -> Error {
        Error::SettingsLoad {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn save_error(&self, reason: impl ToString) -> Error {
        Error::SettingsSave {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("missing.yaml"));
        assert_eq!(store.load().unwrap(), OcrOptions::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.yaml"));

        let mut options = OcrOptions::default();
        options.input_file = "scans/a.pdf".to_string();
        options.output_file = "scans/a_OCRed.pdf".to_string();
        options.deskew = true;
        options.clean_final = true;
        options.language = Some("chi_sim+eng".to_string());
        options.save_settings = true;

        store.save(&options).unwrap();
        assert_eq!(store.load().unwrap(), options);

        options.language = None;
        store.save(&options).unwrap();
        assert_eq!(store.load().unwrap(), options);
        assert_eq!(store.load().unwrap(), store.load().unwrap());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "deskew: true\n").unwrap();

        let options = SettingsStore::new(&path).load().unwrap();
        assert!(options.deskew);
        assert_eq!(options.language.as_deref(), Some("eng"));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.yaml");

        fs::write(&path, "deskew: [1, 2\n").unwrap();
        let err = SettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::SettingsLoad { .. }));

        fs::write(&path, "deskew: perhaps\n").unwrap();
        let err = SettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::SettingsLoad { .. }));

        fs::write(&path, "").unwrap();
        let err = SettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::SettingsLoad { .. }));
    }

    #[test]
    fn test_save_unwritable_location() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("no-such-dir").join("settings.yaml"));
        let err = store.save(&OcrOptions::default()).unwrap_err();
        assert!(matches!(err, Error::SettingsSave { .. }));
    }
}
