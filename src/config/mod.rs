// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 规则文件模块
///
/// 读取、写入抓取规则列表，规则文件缺失时生成示例
pub mod rules;

/// 配置模块
///
/// 处理进程配置设置，包括规则路径、HTTP客户端和指标导出
pub mod settings;
