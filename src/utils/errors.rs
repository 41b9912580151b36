// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::models::message::Message;
use crate::engines::traits::FetchError;

pub const URL_BUILD_FAILED: &str = "An error when building the url.";
pub const RETRIEVAL_FAILED: &str = "An error occurred retrieving the webpage.";
pub const PROCESSING_FAILED: &str = "An error occurred when processing the webpage.";
pub const PAGE_NOT_FOUND: &str = "Webpage not found at";
pub const TITLE_NOT_FOUND: &str = "There was an error retrieving information from the webpage.";
pub const BODY_NOT_FOUND: &str = "Could not extract data from the webpage.";

/// 规则构建错误
///
/// 在规则编译时（而非首次使用时）检测
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("无效的触发正则表达式 `{pattern}`: {source}")]
    InvalidTrigger {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("无效的捕获正则表达式 `{pattern}`: {source}")]
    InvalidCapture {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("无效的CSS选择器 `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// 规则文件错误
#[derive(Error, Debug)]
pub enum RulesFileError {
    #[error("读写规则文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON规则格式错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML规则格式错误: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("规则文件 {0} 不存在，已写入示例文件")]
    ExampleCreated(PathBuf),
}

/// URL构建错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlBuildError {
    #[error("URL template needs {expected} captures but only {supplied} were supplied")]
    MissingCaptures { expected: usize, supplied: usize },
}

/// 提取失败的捕获所处的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRole {
    Title,
    Body,
}

/// 单次抓取调用中可能出现的失败
///
/// 所有失败都在检测点转换为面向用户的消息，不会向调用方传播
#[derive(Error, Debug)]
pub enum ScrapeFailure {
    #[error("url build failed: {0}")]
    UrlBuild(#[from] UrlBuildError),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("page at {0} was empty")]
    EmptyPage(String),

    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no selector matched for {0:?}")]
    ExtractionEmpty(CaptureRole),
}

impl ScrapeFailure {
    /// 面向用户的文本
    pub fn user_message(&self) -> String {
        match self {
            ScrapeFailure::UrlBuild(_) => URL_BUILD_FAILED.to_string(),
            ScrapeFailure::Fetch(e) if e.is_read_failure() => PROCESSING_FAILED.to_string(),
            ScrapeFailure::Fetch(_) => RETRIEVAL_FAILED.to_string(),
            ScrapeFailure::EmptyPage(url) => format!("{} {}", PAGE_NOT_FOUND, url),
            ScrapeFailure::Decode(_) => PROCESSING_FAILED.to_string(),
            ScrapeFailure::ExtractionEmpty(CaptureRole::Title) => TITLE_NOT_FOUND.to_string(),
            ScrapeFailure::ExtractionEmpty(CaptureRole::Body) => BODY_NOT_FOUND.to_string(),
        }
    }

    /// 转换为回复消息，传输失败和空页面会带上尝试的URL
    pub fn to_message(&self, url: Option<&str>) -> Message {
        let message = Message::text(self.user_message());
        match (self, url) {
            (ScrapeFailure::Fetch(e), Some(url)) if !e.is_read_failure() => message.with_url(url),
            (ScrapeFailure::EmptyPage(_), Some(url)) => message.with_url(url),
            _ => message,
        }
    }

    /// 指标标签
    pub fn outcome(&self) -> &'static str {
        match self {
            ScrapeFailure::UrlBuild(_) => "url_error",
            ScrapeFailure::Fetch(e) if e.is_read_failure() => "read_error",
            ScrapeFailure::Fetch(_) => "fetch_error",
            ScrapeFailure::EmptyPage(_) => "empty_page",
            ScrapeFailure::Decode(_) => "decode_error",
            ScrapeFailure::ExtractionEmpty(_) => "extraction_empty",
        }
    }
}
