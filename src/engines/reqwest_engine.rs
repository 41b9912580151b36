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

use crate::config::settings::HttpSettings;
use crate::engines::traits::{ContentFetcher, FetchError};
use async_trait::async_trait;
use bytes::Bytes;
use std::time::{Duration, Instant};
use tracing::debug;

/// 获取引擎
///
/// 基于reqwest实现的HTTP获取引擎，每次调用只尝试一次
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建新的获取引擎
    ///
    /// # 参数
    ///
    /// * `timeout` - 单次请求超时时间
    /// * `user_agent` - 请求使用的User-Agent
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 获取引擎
    /// * `Err(FetchError)` - 客户端构建失败
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// 根据HTTP配置创建获取引擎
    pub fn from_settings(settings: &HttpSettings) -> Result<Self, FetchError> {
        Self::new(Duration::from_secs(settings.timeout_secs), &settings.user_agent)
    }
}

#[async_trait]
impl ContentFetcher for ReqwestEngine {
    /// 执行HTTP获取
    ///
    /// 非2xx状态码视为传输失败，读取响应体失败视为读取失败
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Buffer the whole body before any parsing happens
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::ReadFailed(e.to_string()))?;

        debug!(
            url,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched content"
        );

        Ok(body)
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
