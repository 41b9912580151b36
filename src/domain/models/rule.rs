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

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 抓取内容格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContentFormat {
    /// HTML文档，使用CSS选择器
    #[default]
    Html,
    /// JSON文档，使用键路径
    Json,
}

/// 多重匹配处理策略
///
/// 当选择器匹配到多个元素时决定取哪一个
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MultiplicityPolicy {
    /// 第一个匹配
    #[default]
    First,
    /// 最后一个匹配
    Last,
    /// 均匀随机选择
    Random,
}

/// 字面替换对
///
/// 规则文件中写作单键映射 `{"被替换": "替换为"}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// 被替换的子串
    pub from: String,
    /// 替换后的子串
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// 替换表的映射列表表示
///
/// 每个映射可以有多个键，按键的顺序展开为多个替换对；序列化时每个替换对单独一个映射
mod replacement_maps {
    use super::Replacement;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(replacements: &[Replacement], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(replacements.len()))?;
        for r in replacements {
            seq.serialize_element(&BTreeMap::from([(r.from.as_str(), r.to.as_str())]))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Replacement>, D::Error> {
        let maps = Vec::<BTreeMap<String, String>>::deserialize(deserializer)?;
        Ok(maps
            .into_iter()
            .flatten()
            .map(|(from, to)| Replacement { from, to })
            .collect())
    }
}

/// 捕获规格
///
/// 描述如何从抓取到的内容中提取一个值并格式化
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CaptureSpec {
    /// 按优先级排列的选择器（CSS选择器或JSON键路径）
    pub selectors: Vec<String>,
    /// 回复模板，`%s` 为占位符
    pub template: String,
    /// 多重匹配处理策略
    pub handle_multiple: MultiplicityPolicy,
    /// 模板化之前按顺序应用的替换对
    #[serde(with = "replacement_maps")]
    pub replacements: Vec<Replacement>,
}

impl CaptureSpec {
    /// 创建使用 `First` 策略且无替换的捕获规格
    pub fn new<S: Into<String>>(template: impl Into<String>, selectors: impl IntoIterator<Item = S>) -> Self {
        Self {
            selectors: selectors.into_iter().map(Into::into).collect(),
            template: template.into(),
            ..Default::default()
        }
    }

    /// 没有选择器的字面模板
    pub fn literal(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Default::default()
        }
    }

    pub fn with_policy(mut self, policy: MultiplicityPolicy) -> Self {
        self.handle_multiple = policy;
        self
    }

    pub fn with_replacement(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacements.push(Replacement::new(from, to));
        self
    }
}

/// 消息字段规格
///
/// `title` 提供字段名（分组模式）或消息标题（非分组模式），`body` 提供字段值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FieldSpec {
    pub title: Option<CaptureSpec>,
    pub body: CaptureSpec,
}

impl FieldSpec {
    pub fn body(body: CaptureSpec) -> Self {
        Self { title: None, body }
    }

    pub fn titled(title: CaptureSpec, body: CaptureSpec) -> Self {
        Self {
            title: Some(title),
            body,
        }
    }
}

/// 令牌哈希算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[default]
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "SHA256")]
    Sha256,
}

/// 令牌规格
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TokenSpec {
    /// 哈希输入的前缀
    pub prefix: String,
    /// 哈希输入的后缀
    pub postfix: String,
    /// 保留的十六进制字符数，0 表示保留全部
    pub size: usize,
    /// 哈希算法
    #[serde(rename = "Type")]
    pub algorithm: HashAlgorithm,
}

/// 抓取规则
///
/// 启动时加载一次，之后只读共享给所有并发调用
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RuleConfig {
    /// 匹配聊天命令的正则表达式
    pub trigger: String,
    /// 作用于触发器之后文本的正则表达式，其捕获组用于构建URL
    pub capture: String,
    /// 抓取内容格式
    pub format: ContentFormat,
    /// URL模板，`%s` 为占位符
    #[serde(rename = "URL")]
    pub url: String,
    /// 消息标题捕获
    pub title: CaptureSpec,
    /// 消息正文捕获
    pub captures: Vec<FieldSpec>,
    /// 分组消息的描述
    pub description: String,
    /// 是否将所有捕获合并为一条消息
    pub grouped: bool,
    /// 非分组消息之间的间隔（毫秒）
    pub delay: u64,
    /// 追加到URL的令牌
    pub token: Option<TokenSpec>,
    /// 帮助信息
    pub help: String,
}

impl RuleConfig {
    /// 非分组消息之间的间隔
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay)
    }
}
