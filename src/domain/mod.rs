// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：抓取规则、捕获规格和回复消息
/// - 服务（services）：选择器解析、模板替换、令牌生成和随机源
///
/// 领域层不依赖网络或进程配置，所有输入都以参数形式传入。
pub mod models;
pub mod services;
