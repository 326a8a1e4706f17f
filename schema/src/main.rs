use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use options::OcrOptions;
use schemars::schema_for;

const VSCODE_DIR: &str = ".vscode";

/// 生成设置文件的 JSON Schema, 供编辑器校验 `.ocrgui.yaml`
fn main() -> Result<()> {
    let output_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(VSCODE_DIR));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("创建目录 {} 失败", output_dir.display()))?;

    let settings_schema = serde_json::to_string_pretty(&schema_for!(OcrOptions))?;
    let path = output_dir.join("settings.schema.json");
    fs::write(&path, settings_schema)?;
    println!("已生成 {}", path.display());
    Ok(())
}
