// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模块
///
/// 包含sitemap节点与页面结果等核心数据模型
pub mod models;
