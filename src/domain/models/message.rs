// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 回复消息字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// 回复消息
///
/// 由编排器组装后交给消息出口发送
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    /// 标题
    pub title: String,
    /// 描述/正文
    pub description: String,
    /// 关联的URL
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// 分组模式下的字段列表，保持插入顺序
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<Field>,
}

impl Message {
    /// 仅包含描述的消息
    pub fn text(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// 服务器（群组）标识
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guild {
    pub service_id: String,
    pub guild_id: String,
}

/// 会话标识
///
/// 标识消息来源以及回复的目的地
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conversation {
    /// 聊天服务标识
    pub service_id: String,
    /// 会话（频道）标识
    pub conversation_id: String,
    /// 服务器标识
    pub guild_id: String,
    /// 发送者在该会话中是否为管理员
    pub admin: bool,
}

impl Conversation {
    pub fn new(service_id: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            conversation_id: conversation_id.into(),
            ..Default::default()
        }
    }

    pub fn guild(&self) -> Guild {
        Guild {
            service_id: self.service_id.clone(),
            guild_id: self.guild_id.clone(),
        }
    }
}

/// 聊天用户
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub id: String,
}
