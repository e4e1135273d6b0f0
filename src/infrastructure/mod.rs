// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// 提供外部服务集成，如Redis缓存与本地回退存储
pub mod cache;
