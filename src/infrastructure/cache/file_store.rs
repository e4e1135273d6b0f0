// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use crate::infrastructure::cache::CacheStore;

/// 本地文件回退存储
///
/// 每个键对应目录下的一个文件，文件名为键的SHA-256摘要。
/// 条目没有过期时间，只能通过`cleanup`在进程退出时整体清除
pub struct FileStore {
    /// 存储目录
    dir: PathBuf,
}

impl FileStore {
    /// 创建新的文件存储实例
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        self.dir.join(format!("robots_{}.txt", digest))
    }

    /// 读取键对应的文件内容
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入键值对
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    /// 清理所有缓存文件
    ///
    /// 在进程退出时调用一次
    pub async fn cleanup(&self) -> Result<()> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().starts_with("robots_") {
                fs::remove_file(entry.path()).await?;
                debug!("已删除缓存文件: {:?}", entry.path());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        FileStore::get(self, key).await
    }

    // The fallback tier has no expiration, ttl is ignored
    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> Result<()> {
        FileStore::set(self, key, value).await
    }
}
