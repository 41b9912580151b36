// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::domain::models::rule::{CaptureSpec, ContentFormat, MultiplicityPolicy};
use crate::domain::services::random_source::RandomSource;
use crate::domain::services::template_service::TemplateService;
use crate::utils::errors::{CaptureRole, RuleError, ScrapeFailure};

/// 单次调用获取到的内容
///
/// 仅属于一次调用，组装完消息后丢弃
pub enum FetchedContent {
    /// 解析后的HTML文档树
    Html(Html),
    /// 解码后的JSON值
    Json(Value),
}

impl FetchedContent {
    /// 按规则声明的格式解析响应体
    ///
    /// HTML解析是宽容的，只有JSON解码会失败
    pub fn parse(format: ContentFormat, body: &[u8]) -> Result<Self, serde_json::Error> {
        match format {
            ContentFormat::Html => Ok(FetchedContent::Html(Html::parse_document(
                &String::from_utf8_lossy(body),
            ))),
            ContentFormat::Json => serde_json::from_slice(body).map(FetchedContent::Json),
        }
    }
}

impl MultiplicityPolicy {
    /// 从有序匹配列表中选出一个值
    ///
    /// 对任意长度的列表都有定义，空列表返回 `None`
    pub fn pick<T>(self, mut matches: Vec<T>, random: &dyn RandomSource) -> Option<T> {
        if matches.is_empty() {
            return None;
        }

        let last = matches.len() - 1;
        let index = match self {
            MultiplicityPolicy::First => 0,
            MultiplicityPolicy::Last => last,
            MultiplicityPolicy::Random => random.pick(matches.len()).min(last),
        };
        Some(matches.swap_remove(index))
    }
}

/// 编译后的选择器列表
enum SelectorSet {
    Css(Vec<Selector>),
    Keys(Vec<String>),
}

/// 捕获解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 选择器匹配成功，已应用替换和模板
    Value(String),
    /// 没有匹配，模板不含占位符，原样使用
    Literal(String),
    /// 没有匹配且模板需要值
    Missing,
}

/// 编译后的捕获规格
///
/// CSS选择器在规则构建时解析，无效选择器在此时报错
pub struct CompiledCapture {
    spec: CaptureSpec,
    selectors: SelectorSet,
}

impl CompiledCapture {
    pub fn compile(spec: &CaptureSpec, format: ContentFormat) -> Result<Self, RuleError> {
        let selectors = match format {
            ContentFormat::Html => SelectorSet::Css(
                spec.selectors
                    .iter()
                    .map(|s| {
                        Selector::parse(s).map_err(|e| RuleError::InvalidSelector {
                            selector: s.clone(),
                            reason: e.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            ContentFormat::Json => SelectorSet::Keys(spec.selectors.clone()),
        };

        Ok(Self {
            spec: spec.clone(),
            selectors,
        })
    }

    /// 按优先级尝试选择器
    ///
    /// HTML返回第一个有匹配的选择器的全部匹配文本；JSON由第一个存在的键决定结果，
    /// 即使该键的值为 `null` 或空数组
    pub fn matches(&self, content: &FetchedContent) -> Vec<String> {
        match (&self.selectors, content) {
            (SelectorSet::Css(selectors), FetchedContent::Html(document)) => selectors
                .iter()
                .map(|selector| html_matches(document, selector))
                .find(|found| !found.is_empty())
                .unwrap_or_default(),
            (SelectorSet::Keys(keys), FetchedContent::Json(value)) => keys
                .iter()
                .find_map(|key| lookup(value, key))
                .map(flatten)
                .unwrap_or_default(),
            _ => {
                debug!("Selector kind does not match content kind");
                Vec::new()
            }
        }
    }

    /// 解析出单个值
    pub fn resolve(&self, content: &FetchedContent, random: &dyn RandomSource) -> Resolution {
        let matches = self.matches(content);
        let found = matches.len();

        match self.spec.handle_multiple.pick(matches, random) {
            Some(raw) => {
                debug!(found, policy = ?self.spec.handle_multiple, "Resolved capture");
                Resolution::Value(TemplateService::apply(
                    &raw,
                    &self.spec.replacements,
                    &self.spec.template,
                ))
            }
            None if !TemplateService::has_placeholder(&self.spec.template) => {
                Resolution::Literal(self.spec.template.clone())
            }
            None => Resolution::Missing,
        }
    }

    /// 解析为最终文本，缺失时使用对应位置的失败文本
    pub fn render(
        &self,
        content: &FetchedContent,
        random: &dyn RandomSource,
        role: CaptureRole,
    ) -> String {
        match self.resolve(content, random) {
            Resolution::Value(text) | Resolution::Literal(text) => text,
            Resolution::Missing => ScrapeFailure::ExtractionEmpty(role).user_message(),
        }
    }
}

/// 元素的文本为其所有后代文本节点拼接后去除首尾空白
fn html_matches(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect()
}

/// 精确键优先，否则按 `.` 拆分逐级查找，数字段索引数组
fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    if let Some(found) = value.get(key) {
        return Some(found);
    }

    key.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn flatten(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Bool(_) | Value::Number(_) => vec![value.to_string()],
        Value::Array(items) => items.iter().flat_map(flatten).collect(),
        Value::Object(_) => vec![value.to_string()],
    }
}
