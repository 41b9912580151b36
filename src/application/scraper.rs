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

use regex::Regex;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::application::sink::MessageSink;
use crate::domain::models::message::{Conversation, Field, Message, User};
use crate::domain::models::rule::RuleConfig;
use crate::domain::services::random_source::{RandomSource, ThreadRandom};
use crate::domain::services::selector_service::{CompiledCapture, FetchedContent};
use crate::domain::services::token_service::TokenService;
use crate::engines::traits::ContentFetcher;
use crate::utils::errors::{CaptureRole, RuleError, ScrapeFailure};
use crate::utils::url_utils;

/// 抓取调用所处的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BuildingUrl,
    Fetching,
    Parsing,
    ExtractingTitle,
    ExtractingCaptures,
    Emitting,
    Done,
}

struct CompiledField {
    title: Option<CompiledCapture>,
    body: CompiledCapture,
}

/// 抓取编排器
///
/// 由一条规则编译而来，构建后不可变，可通过 `Arc` 在并发调用间共享。
/// 每次调用依次经过：构建URL → 获取 → 解析 → 提取标题 → 提取捕获 → 发送。
/// 任何阶段的失败都会转换为一条面向用户的消息，调用本身不会返回错误。
pub struct Scraper {
    rule: RuleConfig,
    trigger: Regex,
    capture: Regex,
    title: CompiledCapture,
    fields: Vec<CompiledField>,
    fetcher: Arc<dyn ContentFetcher>,
    random: Arc<dyn RandomSource>,
}

impl Scraper {
    /// 编译规则
    ///
    /// # 参数
    ///
    /// * `rule` - 抓取规则
    /// * `fetcher` - 内容获取引擎
    /// * `random` - 随机多重匹配策略使用的随机源
    ///
    /// # 返回值
    ///
    /// * `Ok(Scraper)` - 编译后的编排器
    /// * `Err(RuleError)` - 触发器、捕获正则或CSS选择器无效
    pub fn new(
        rule: RuleConfig,
        fetcher: Arc<dyn ContentFetcher>,
        random: Arc<dyn RandomSource>,
    ) -> Result<Self, RuleError> {
        let trigger = Regex::new(&rule.trigger).map_err(|source| RuleError::InvalidTrigger {
            pattern: rule.trigger.clone(),
            source,
        })?;
        let capture = Regex::new(&rule.capture).map_err(|source| RuleError::InvalidCapture {
            pattern: rule.capture.clone(),
            source,
        })?;

        let title = CompiledCapture::compile(&rule.title, rule.format)?;
        let fields = rule
            .captures
            .iter()
            .map(|field| {
                Ok(CompiledField {
                    title: field
                        .title
                        .as_ref()
                        .map(|spec| CompiledCapture::compile(spec, rule.format))
                        .transpose()?,
                    body: CompiledCapture::compile(&field.body, rule.format)?,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;

        Ok(Self {
            rule,
            trigger,
            capture,
            title,
            fields,
            fetcher,
            random,
        })
    }

    /// 使用线程本地随机源编译规则
    pub fn with_fetcher(rule: RuleConfig, fetcher: Arc<dyn ContentFetcher>) -> Result<Self, RuleError> {
        Self::new(rule, fetcher, Arc::new(ThreadRandom))
    }

    pub fn rule(&self) -> &RuleConfig {
        &self.rule
    }

    pub fn help(&self) -> &str {
        &self.rule.help
    }

    /// 从聊天文本中提取捕获组
    ///
    /// 触发器匹配后，对其后的剩余文本应用捕获正则。返回列表的第 0 项为整体匹配，
    /// 未参与匹配的捕获组记为空字符串。触发器或捕获正则不匹配时返回 `None`。
    pub fn captures(&self, text: &str) -> Option<Vec<String>> {
        let found = self.trigger.find(text)?;
        let rest = text[found.end()..].trim();

        let groups = self.capture.captures(rest)?;
        Some(
            groups
                .iter()
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }

    /// 执行一次抓取并发送回复
    ///
    /// `captures` 的第 0 项为整体匹配，从第 1 项起用于构建URL。
    /// 分组模式和所有失败路径恰好发送一条消息；非分组模式按捕获顺序发送 N 条。
    #[instrument(skip_all, fields(trigger = %self.rule.trigger, user = %user.name))]
    pub async fn execute(
        &self,
        conversation: &Conversation,
        user: &User,
        captures: &[String],
        sink: &dyn MessageSink,
    ) {
        let messages = match self.run(captures).await {
            Ok(messages) => {
                metrics::counter!("scrapebot_invocations_total", "outcome" => "ok").increment(1);
                messages
            }
            Err((failure, url)) => {
                warn!(outcome = failure.outcome(), "Scrape failed: {}", failure);
                metrics::counter!("scrapebot_invocations_total", "outcome" => failure.outcome())
                    .increment(1);
                vec![failure.to_message(url.as_deref())]
            }
        };

        debug!(stage = ?Stage::Emitting, count = messages.len());
        let delay = self.rule.delay();
        for (index, message) in messages.into_iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                sleep(delay).await;
            }
            sink.send(conversation, message);
            metrics::counter!("scrapebot_messages_total").increment(1);
        }
        debug!(stage = ?Stage::Done);
    }

    async fn run(&self, captures: &[String]) -> Result<Vec<Message>, (ScrapeFailure, Option<String>)> {
        debug!(stage = ?Stage::BuildingUrl);
        let groups = captures.get(1..).unwrap_or_default();
        let mut url = match url_utils::build_url(&self.rule.url, groups) {
            Ok(url) => url,
            Err(e) => return Err((e.into(), None)),
        };
        if let Some(spec) = &self.rule.token {
            url.push_str(&TokenService::token(&groups.join(" "), spec));
        }

        debug!(stage = ?Stage::Fetching, url = %url, engine = self.fetcher.name());
        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => return Err((e.into(), Some(url))),
        };

        if body.iter().all(u8::is_ascii_whitespace) {
            return Err((ScrapeFailure::EmptyPage(url.clone()), Some(url)));
        }

        let messages = self.assemble(&body, &url).map_err(|e| (e, Some(url.clone())))?;
        info!(url = %url, messages = messages.len(), "Scrape succeeded");
        Ok(messages)
    }

    /// 解析内容并组装回复，整个过程同步进行，解析结果不跨越等待点
    fn assemble(&self, body: &[u8], url: &str) -> Result<Vec<Message>, ScrapeFailure> {
        debug!(stage = ?Stage::Parsing, format = ?self.rule.format);
        let content = FetchedContent::parse(self.rule.format, body)?;
        let random = self.random.as_ref();

        debug!(stage = ?Stage::ExtractingTitle);
        let title = self.title.render(&content, random, CaptureRole::Title);

        debug!(stage = ?Stage::ExtractingCaptures, captures = self.fields.len());
        let resolved: Vec<(Option<String>, String)> = self
            .fields
            .iter()
            .map(|field| {
                let name = field
                    .title
                    .as_ref()
                    .map(|t| t.render(&content, random, CaptureRole::Title));
                let value = field.body.render(&content, random, CaptureRole::Body);
                (name, value)
            })
            .collect();

        if self.rule.grouped {
            let fields = resolved
                .into_iter()
                .map(|(name, value)| Field {
                    name: name.unwrap_or_default(),
                    value,
                })
                .collect();
            return Ok(vec![Message {
                title,
                description: self.rule.description.clone(),
                url: Some(url.to_string()),
                fields,
            }]);
        }

        if resolved.is_empty() {
            return Ok(vec![Message {
                title,
                url: Some(url.to_string()),
                ..Default::default()
            }]);
        }

        Ok(resolved
            .into_iter()
            .map(|(name, value)| Message {
                title: name.unwrap_or_else(|| title.clone()),
                description: value,
                url: Some(url.to_string()),
                fields: Vec::new(),
            })
            .collect())
    }
}

/// 编译规则列表
///
/// 无效规则不会被静默跳过：每条失败都会记录错误日志，并与其在列表中的位置一起返回
pub fn compile_rules(
    rules: Vec<RuleConfig>,
    fetcher: Arc<dyn ContentFetcher>,
    random: Arc<dyn RandomSource>,
) -> (Vec<Arc<Scraper>>, Vec<(usize, RuleError)>) {
    let mut scrapers = Vec::new();
    let mut errors = Vec::new();

    for (index, rule) in rules.into_iter().enumerate() {
        match Scraper::new(rule, fetcher.clone(), random.clone()) {
            Ok(scraper) => scrapers.push(Arc::new(scraper)),
            Err(e) => {
                error!(rule = index, "Failed to compile scrape rule: {}", e);
                errors.push((index, e));
            }
        }
    }

    (scrapers, errors)
}

#[cfg(test)]
#[path = "scraper_test.rs"]
mod tests;
