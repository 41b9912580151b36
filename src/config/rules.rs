// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::domain::models::rule::RuleConfig;
use crate::utils::errors::RulesFileError;

/// 规则文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesFormat {
    Json,
    Yaml,
}

impl RulesFormat {
    /// 根据扩展名判断格式，`.yaml` / `.yml` 为YAML，其余按JSON处理
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                RulesFormat::Yaml
            }
            _ => RulesFormat::Json,
        }
    }
}

/// 从读取器加载规则列表
///
/// 读取失败会返回错误，不会静默返回空列表
pub fn load_rules<R: Read>(mut reader: R, format: RulesFormat) -> Result<Vec<RuleConfig>, RulesFileError> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    let rules = match format {
        RulesFormat::Json => serde_json::from_slice(&buffer)?,
        RulesFormat::Yaml => serde_yaml::from_slice(&buffer)?,
    };
    Ok(rules)
}

/// 将规则列表写入写入器
pub fn save_rules<W: Write>(
    mut writer: W,
    rules: &[RuleConfig],
    format: RulesFormat,
) -> Result<(), RulesFileError> {
    match format {
        RulesFormat::Json => serde_json::to_writer_pretty(&mut writer, rules)?,
        RulesFormat::Yaml => serde_yaml::to_writer(&mut writer, rules)?,
    }
    writer.flush()?;
    Ok(())
}

/// 从文件加载规则列表
pub fn load_rules_file(path: &Path) -> Result<Vec<RuleConfig>, RulesFileError> {
    let file = File::open(path)?;
    let rules = load_rules(BufReader::new(file), RulesFormat::from_path(path))?;
    info!("Loaded {} scrape rules from {}", rules.len(), path.display());
    Ok(rules)
}

/// 将规则列表保存到文件
pub fn save_rules_file(path: &Path, rules: &[RuleConfig]) -> Result<(), RulesFileError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    save_rules(BufWriter::new(file), rules, RulesFormat::from_path(path))
}

/// 加载规则文件，文件不存在时写入空示例并返回 `ExampleCreated`
pub fn load_or_create_rules(path: &Path) -> Result<Vec<RuleConfig>, RulesFileError> {
    if path.exists() {
        return load_rules_file(path);
    }

    save_rules_file(path, &[])?;
    warn!("Rules file {} did not exist, an example has been written", path.display());
    Err(RulesFileError::ExampleCreated(path.to_path_buf()))
}
