// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use redis::AsyncCommands;
use std::time::Duration;

use crate::infrastructure::cache::CacheStore;

/// Redis客户端
///
/// 提供对Redis数据库的异步操作接口，作为robots.txt缓存的远端共享层
#[derive(Clone)]
pub struct RedisClient {
    /// Redis客户端
    client: redis::Client,
}

impl RedisClient {
    /// 创建新的Redis客户端实例
    ///
    /// # 参数
    ///
    /// * `redis_url` - Redis连接URL
    ///
    /// # 返回值
    ///
    /// * `Ok(RedisClient)` - Redis客户端实例
    /// * `Err(anyhow::Error)` - 创建过程中出现的错误
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// 检查Redis连接可用性
    pub async fn ping(&self) -> Result<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut con).await?;
        Ok(())
    }

    /// 获取指定键的值
    ///
    /// # 参数
    ///
    /// * `key` - 键
    ///
    /// # 返回值
    ///
    /// * `Ok(Option<String>)` - 键对应的值，如果不存在则返回None
    /// * `Err(anyhow::Error)` - 获取过程中出现的错误
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = con.get(key).await?;
        Ok(value)
    }

    /// 设置键值对并指定过期时间
    ///
    /// # 参数
    ///
    /// * `key` - 键
    /// * `value` - 值
    /// * `ttl_seconds` - 过期时间（秒）
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 设置成功
    /// * `Err(anyhow::Error)` - 设置过程中出现的错误
    pub async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.set_ex::<_, _, ()>(key, value, ttl_seconds).await?;
        Ok(())
    }

    /// 永久设置键值对
    pub async fn set_forever(&self, key: &str, value: &str) -> Result<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.set::<_, _, ()>(key, value).await?;
        Ok(())
    }
}

#[async_trait]
impl CacheStore for RedisClient {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        RedisClient::get(self, key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        match ttl {
            Some(ttl) => RedisClient::set(self, key, value, ttl.as_secs()).await,
            None => self.set_forever(key, value).await,
        }
    }
}
