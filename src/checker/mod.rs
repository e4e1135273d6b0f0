// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 检查器模块
///
/// 包含遍历调度器、页面校验流水线、内容去重索引与结果存储
pub mod dedup;
#[cfg(test)]
mod dedup_test;
pub mod pipeline;
pub mod results;
#[cfg(test)]
mod results_test;
pub mod scheduler;
