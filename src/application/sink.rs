// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::info;

use crate::domain::models::message::{Conversation, Message};

/// 消息出口
///
/// 单向发送，非分组回复的调用顺序有意义
pub trait MessageSink: Send + Sync {
    fn send(&self, conversation: &Conversation, message: Message);
}

impl<F> MessageSink for F
where
    F: Fn(&Conversation, Message) + Send + Sync,
{
    fn send(&self, conversation: &Conversation, message: Message) {
        self(conversation, message)
    }
}

/// 内存消息出口
///
/// 按发送顺序记录消息，先进先出
#[derive(Default)]
pub struct MemorySink {
    sent: Mutex<VecDeque<(Message, Conversation)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出最早发送的消息
    pub fn pop(&self) -> Option<(Message, Conversation)> {
        self.sent.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }
}

impl MessageSink for MemorySink {
    fn send(&self, conversation: &Conversation, message: Message) {
        self.sent.lock().push_back((message, conversation.clone()));
    }
}

/// 日志消息出口
///
/// 记录日志并将每条消息以单行JSON写到标准输出
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl MessageSink for LogSink {
    fn send(&self, conversation: &Conversation, message: Message) {
        info!(
            conversation = %conversation.conversation_id,
            title = %message.title,
            fields = message.fields.len(),
            "Sending reply"
        );
        match serde_json::to_string(&message) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!("Failed to encode reply: {}", e),
        }
    }
}
