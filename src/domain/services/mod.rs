// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 随机源（random_source）：为随机多重匹配策略提供可注入的随机性
/// - 选择器服务（selector_service）：从HTML或JSON内容中提取并解析捕获值
/// - 模板服务（template_service）：字面替换和占位符模板
/// - 令牌服务（token_service）：根据捕获文本生成确定性的短令牌
pub mod random_source;
pub mod selector_service;
pub mod template_service;
pub mod token_service;
