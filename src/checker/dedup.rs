// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// 内容去重索引
///
/// 内容摘要到首次出现URL的映射。先写者胜出：
/// 同一摘要的并发登记中恰好一个调用者成为归属者，
/// 其余调用者观察到同一个归属URL，已有条目永不被覆盖
#[derive(Debug, Default)]
pub struct DedupIndex {
    /// 摘要到首次出现URL的映射
    hashes: DashMap<String, String>,
}

impl DedupIndex {
    /// 创建新的去重索引实例
    pub fn new() -> Self {
        Self {
            hashes: DashMap::new(),
        }
    }

    /// 原子地登记内容摘要
    ///
    /// # 参数
    ///
    /// * `digest` - 页面内容摘要
    /// * `url` - 当前页面URL
    ///
    /// # 返回值
    ///
    /// * `None` - 首次出现，当前URL成为该摘要的归属者
    /// * `Some(first_url)` - 重复内容，返回已登记的归属URL
    pub fn check_and_insert(&self, digest: &str, url: &str) -> Option<String> {
        // The entry guard keys the race: exactly one concurrent caller inserts
        match self.hashes.entry(digest.to_string()) {
            Entry::Occupied(occupied) => Some(occupied.get().clone()),
            Entry::Vacant(vacant) => {
                vacant.insert(url.to_string());
                None
            }
        }
    }

    /// 已登记的摘要数量
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
