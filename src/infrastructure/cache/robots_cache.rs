// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::{Position, Url};

use crate::infrastructure::cache::file_store::FileStore;
use crate::infrastructure::cache::CacheStore;

/// 远端层的过期时间
const REMOTE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// robots.txt旁路缓存
///
/// 读取顺序：远端共享存储 → 本地回退存储 → 回源抓取。
/// 抓取成功后回填所有可用层级：远端层带24小时过期，本地层永不过期。
/// 同一主机的并发回源抓取允许重复，每次成功都会回填缓存
pub struct RobotsCache {
    /// HTTP客户端
    client: Client,
    /// 远端共享存储，初始化时不可用则为None
    remote: Option<Arc<dyn CacheStore>>,
    /// 本地回退存储
    local: Arc<FileStore>,
}

impl RobotsCache {
    /// 创建新的robots.txt缓存实例
    ///
    /// # 参数
    ///
    /// * `remote` - 远端共享存储，可缺省
    /// * `local` - 本地回退存储
    pub fn new(remote: Option<Arc<dyn CacheStore>>, local: Arc<FileStore>) -> Self {
        Self {
            client: Client::new(),
            remote,
            local,
        }
    }

    /// 获取页面所在主机的robots.txt内容
    ///
    /// 回源时非2xx状态码作为错误返回，由调用方决定如何处理
    /// （流水线将其视为"robots不可用"，页面按允许处理）
    ///
    /// # 参数
    ///
    /// * `page_url` - 任意页面URL，用于推导`{scheme}://{host}/robots.txt`
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - robots.txt内容
    /// * `Err(anyhow::Error)` - URL无效或回源失败
    pub async fn get(&self, page_url: &str) -> Result<String> {
        let url = Url::parse(page_url)?;
        if url.host_str().is_none() {
            anyhow::bail!("URL缺少主机名: {}", page_url);
        }
        // scheme://host[:port], the explicit port must survive
        let robots_url = format!("{}/robots.txt", &url[..Position::BeforePath]);

        // 1. Check the shared remote store
        if let Some(ref remote) = self.remote {
            match remote.get(&remote_key(&robots_url)).await {
                Ok(Some(content)) => return Ok(content),
                Ok(None) => {}
                Err(e) => warn!("远端缓存读取失败 {}: {}", robots_url, e),
            }
        }

        // 2. Check the local fallback store
        if let Some(content) = self.local.get(&robots_url).await? {
            return Ok(content);
        }

        // 3. Fetch from the network
        let response = self.client.get(&robots_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("robots.txt状态码异常 {}: {}", robots_url, status.as_u16());
        }
        let content = response.text().await?;

        // 4. Populate every available tier
        if let Some(ref remote) = self.remote {
            if let Err(e) = remote
                .set(&remote_key(&robots_url), &content, Some(REMOTE_TTL))
                .await
            {
                warn!("远端缓存写入失败 {}: {}", robots_url, e);
            }
        }
        if let Err(e) = self.local.set(&robots_url, &content).await {
            warn!("本地回退缓存写入失败 {}: {}", robots_url, e);
        }

        Ok(content)
    }

    /// 判断路径是否被Disallow规则拦截
    ///
    /// 非空的Disallow值与页面路径做前缀匹配
    pub fn is_disallowed(content: &str, path: &str) -> bool {
        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if let Some(rule) = line.strip_prefix("Disallow:") {
                let rule = rule.trim();
                if !rule.is_empty() && path.starts_with(rule) {
                    return true;
                }
            }
        }
        false
    }

    /// 清空本地回退存储
    ///
    /// 在进程退出时调用一次
    pub async fn cleanup(&self) -> Result<()> {
        self.local.cleanup().await
    }
}

fn remote_key(robots_url: &str) -> String {
    format!("robots_cache:{}", robots_url)
}
