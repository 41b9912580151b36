// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 负责协调领域服务和获取引擎完成一次聊天命令：
/// - 抓取编排器（scraper）：构建URL、获取内容、提取并发送回复
/// - 消息出口（sink）：回复消息的发送抽象
/// - 管理员命令（admin）：查询和取消管理员身份
pub mod admin;
pub mod scraper;
pub mod sink;
