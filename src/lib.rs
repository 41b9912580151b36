// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含抓取编排器、消息出口以及管理员命令
pub mod application;

/// 配置模块
///
/// 处理进程配置设置以及抓取规则文件
pub mod config;

/// 领域模块
///
/// 包含规则、消息等核心实体以及选择器、模板、令牌服务
pub mod domain;

/// 引擎模块
///
/// 实现可替换的网页内容获取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供指标导出等外部集成
pub mod infrastructure;

/// 工具模块
///
/// 提供URL构建、错误类型和遥测等通用功能
pub mod utils;
