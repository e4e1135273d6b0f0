// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

pub mod file_store;
pub mod redis_client;
pub mod robots_cache;
#[cfg(test)]
mod robots_cache_test;

/// 缓存存储接口
///
/// robots.txt缓存的存储层抽象：远端共享存储与本地回退存储都实现此trait
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 读取键对应的值，不存在时返回None
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// 写入键值对，`ttl`为None时永不过期
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;
}
