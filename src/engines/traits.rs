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

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// 获取引擎错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 服务端返回了终止性状态码
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    /// 无法连接到目标
    #[error("Unreachable: {0}")]
    Unreachable(String),
    /// 连接成功但读取响应体失败
    #[error("Failed to read body: {0}")]
    ReadFailed(String),
}

impl FetchError {
    /// 判断错误是否发生在连接建立之后的读取阶段
    ///
    /// # 返回值
    ///
    /// 读取失败返回true，传输失败返回false
    pub fn is_read_failure(&self) -> bool {
        match self {
            FetchError::ReadFailed(_) => true,
            FetchError::RequestFailed(e) => e.is_body() || e.is_decode(),
            _ => false,
        }
    }
}

/// 内容获取引擎特质
///
/// 编排器通过该特质访问网络，测试中可替换为预设响应
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// 获取URL对应的完整响应体
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
