// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{ContentFetcher, FetchError};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;

/// 预设响应
#[derive(Debug, Clone)]
pub enum CannedResponse {
    /// 正常返回的内容
    Body(Bytes),
    /// 模拟无法连接
    Unreachable,
    /// 模拟连接成功但读取中断
    BrokenStream,
}

impl CannedResponse {
    pub fn body(content: impl Into<String>) -> Self {
        CannedResponse::Body(Bytes::from(content.into()))
    }
}

type Responder = Box<dyn Fn(&str) -> CannedResponse + Send + Sync>;

/// 预设响应获取引擎
///
/// 不访问网络，按URL返回预设内容，并记录所有请求过的URL
pub struct CannedEngine {
    responder: Responder,
    requests: Mutex<Vec<String>>,
}

impl CannedEngine {
    /// 使用自定义函数生成响应
    pub fn from_fn<F>(responder: F) -> Self
    where
        F: Fn(&str) -> CannedResponse + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 对任意URL返回同一内容
    pub fn always(content: impl Into<String>) -> Self {
        let response = CannedResponse::body(content);
        Self::from_fn(move |_| response.clone())
    }

    /// 按URL返回内容，未知URL视为无法连接
    pub fn pages<I, K, V>(pages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pages: HashMap<String, CannedResponse> = pages
            .into_iter()
            .map(|(url, content)| (url.into(), CannedResponse::body(content)))
            .collect();
        Self::from_fn(move |url| {
            pages
                .get(url)
                .cloned()
                .unwrap_or(CannedResponse::Unreachable)
        })
    }

    /// 所有请求都在读取阶段失败
    pub fn broken_stream() -> Self {
        Self::from_fn(|_| CannedResponse::BrokenStream)
    }

    /// 已请求过的URL，按请求顺序
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ContentFetcher for CannedEngine {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        self.requests.lock().push(url.to_string());

        match (self.responder)(url) {
            CannedResponse::Body(body) => Ok(body),
            CannedResponse::Unreachable => Err(FetchError::Unreachable(url.to_string())),
            CannedResponse::BrokenStream => {
                Err(FetchError::ReadFailed("stream closed mid-transfer".to_string()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}
