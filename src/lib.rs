// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 检查器模块
///
/// 包含遍历调度、页面校验流水线、去重索引与结果存储
pub mod checker;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 解码模块
///
/// 将sitemap文档字节解码为页面集合或索引节点
pub mod decoder;

/// 领域模块
///
/// 包含核心数据模型
pub mod domain;

/// 引擎模块
///
/// 实现页面抓取与HTML字段提取
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如Redis缓存与本地回退存储
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
