// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::collections::HashMap;

/// 单个页面的检查结果
///
/// 每个抓取成功的页面条目恰好产生一条记录，
/// 写入结果存储后不再修改
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    /// 页面URL
    pub url: String,
    /// HTTP状态码
    pub status_code: u16,
    /// 重定向链，按跳转顺序排列
    pub redirects: Vec<String>,
    /// canonical链接，缺失时为None
    pub canonical_url: Option<String>,
    /// 元标签映射（title、description）
    pub meta_tags: HashMap<String, String>,
    /// 页面加载耗时（毫秒），只计网络抓取部分
    pub load_time_ms: u64,
    /// 是否被robots.txt拦截
    pub is_blocked_by_robots_txt: bool,
    /// 页面内容的SHA-256摘要（十六进制）
    pub content_hash: String,
}
