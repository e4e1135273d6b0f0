// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use url::Url;

use crate::checker::dedup::DedupIndex;
use crate::checker::results::ResultStore;
use crate::domain::models::page_result::PageResult;
use crate::domain::models::sitemap::PageEntry;
use crate::engines::html_scanner::HtmlScanner;
use crate::engines::page_engine::PageEngine;
use crate::infrastructure::cache::robots_cache::RobotsCache;

/// 慢加载阈值
const SLOW_LOAD_THRESHOLD: Duration = Duration::from_secs(2);

/// 页面抓取校验流水线
///
/// 对单个页面条目依次执行robots检查、计时抓取、字段提取、
/// 内容去重与结果组装。各项检查相互独立，不因前一项失败而短路。
/// 被robots拦截的页面仍会抓取，只是在结果中标记
pub struct FetchValidationPipeline {
    /// 页面抓取引擎
    engine: Arc<PageEngine>,
    /// robots.txt缓存
    robots: Arc<RobotsCache>,
    /// 内容去重索引
    dedup: Arc<DedupIndex>,
    /// 结果存储
    results: Arc<ResultStore>,
}

impl FetchValidationPipeline {
    /// 创建新的流水线实例
    pub fn new(
        engine: Arc<PageEngine>,
        robots: Arc<RobotsCache>,
        dedup: Arc<DedupIndex>,
        results: Arc<ResultStore>,
    ) -> Self {
        Self {
            engine,
            robots,
            dedup,
            results,
        }
    }

    /// 处理单个页面条目
    ///
    /// 每次调用至多产生一条`PageResult`。
    /// 抓取失败（网络错误、超过重定向上限、响应体不可读）只记录日志，
    /// 不产生结果，也不会上抛到调度器
    pub async fn process(&self, entry: &PageEntry) {
        let blocked = self.check_robots(&entry.loc).await;

        // Load time covers the network fetch only
        let start = Instant::now();
        let response = match self.engine.fetch(&entry.loc).await {
            Ok(response) => response,
            Err(e) => {
                error!("页面抓取失败 {}: {}", entry.loc, e);
                return;
            }
        };
        let load_time = start.elapsed();

        if load_time >= SLOW_LOAD_THRESHOLD {
            warn!("页面加载缓慢 {} (耗时: {:?})", entry.loc, load_time);
        } else {
            info!("页面加载正常 {} (耗时: {:?})", entry.loc, load_time);
        }
        if !(200..300).contains(&response.status_code) {
            warn!("异常状态码 {}: {}", response.status_code, entry.loc);
        }
        if !response.redirects.is_empty() {
            warn!("存在重定向链 {}: {:?}", entry.loc, response.redirects);
        }

        let body_text = String::from_utf8_lossy(&response.body).into_owned();
        let scan = HtmlScanner::extract(&body_text);
        if scan.canonical_url.is_none() {
            warn!("canonical链接缺失: {}", entry.loc);
        }
        if !scan.meta_tags.contains_key("title") {
            warn!("<title>标签缺失: {}", entry.loc);
        }
        if !scan.meta_tags.contains_key("description") {
            warn!("description元标签缺失: {}", entry.loc);
        }

        let content_hash = hex::encode(Sha256::digest(&response.body));
        if let Some(first_url) = self.dedup.check_and_insert(&content_hash, &entry.loc) {
            warn!("内容重复: {} 与 {}", entry.loc, first_url);
        }

        self.results.append(PageResult {
            url: entry.loc.clone(),
            status_code: response.status_code,
            redirects: response.redirects,
            canonical_url: scan.canonical_url,
            meta_tags: scan.meta_tags,
            load_time_ms: load_time.as_millis() as u64,
            is_blocked_by_robots_txt: blocked,
            content_hash,
        });
    }

    /// 检查页面是否被robots.txt拦截
    ///
    /// robots.txt不可用时按允许处理
    async fn check_robots(&self, page_url: &str) -> bool {
        let path = match Url::parse(page_url) {
            Ok(url) => url.path().to_string(),
            Err(e) => {
                error!("URL解析失败 {}: {}", page_url, e);
                return false;
            }
        };
        match self.robots.get(page_url).await {
            Ok(content) => {
                let blocked = RobotsCache::is_disallowed(&content, &path);
                if blocked {
                    warn!("页面被robots.txt拦截: {}", page_url);
                }
                blocked
            }
            Err(e) => {
                error!("robots.txt获取失败 {}: {}", page_url, e);
                false
            }
        }
    }
}
