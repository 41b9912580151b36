// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::rule::{HashAlgorithm, TokenSpec};
use sha2::{Digest, Sha256};

/// 令牌服务
///
/// 对捕获文本做确定性哈希，生成定长的十六进制令牌
pub struct TokenService;

impl TokenService {
    /// 生成令牌
    ///
    /// 哈希输入为 `prefix + input + postfix`，输出为小写十六进制摘要的前 `size` 个字符。
    /// `size` 为 0 或超过摘要长度时返回完整摘要。
    ///
    /// # 参数
    ///
    /// * `input` - 捕获到的文本
    /// * `spec` - 令牌规格
    pub fn token(input: &str, spec: &TokenSpec) -> String {
        let salted = format!("{}{}{}", spec.prefix, input, spec.postfix);

        let digest = match spec.algorithm {
            HashAlgorithm::Md5 => hex::encode(md5::compute(salted.as_bytes()).0),
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(salted.as_bytes())),
        };

        match spec.size {
            0 => digest,
            size => digest.chars().take(size).collect(),
        }
    }
}
