// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 抓取规则（rule）：触发器、URL模板、捕获规格和令牌规格
/// - 回复消息（message）：标题、描述、URL和字段列表，以及会话标识
pub mod message;
pub mod rule;
