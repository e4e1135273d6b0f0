// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use checkrs::checker::dedup::DedupIndex;
use checkrs::checker::pipeline::FetchValidationPipeline;
use checkrs::checker::results::{self, ResultStore};
use checkrs::checker::scheduler::{TraversalConfig, TraversalScheduler};
use checkrs::config::settings::Settings;
use checkrs::decoder::SitemapDecoder;
use checkrs::engines::page_engine::PageEngine;
use checkrs::infrastructure::cache::file_store::FileStore;
use checkrs::infrastructure::cache::redis_client::RedisClient;
use checkrs::infrastructure::cache::robots_cache::RobotsCache;
use checkrs::infrastructure::cache::CacheStore;
use checkrs::utils::telemetry;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并执行一次完整的sitemap检查
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting checkrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Initialize the remote robots cache, degrade to local-only when unreachable
    let remote: Option<Arc<dyn CacheStore>> = match settings.redis.url.as_deref() {
        Some(url) => match RedisClient::new(url).await {
            Ok(client) => match client.ping().await {
                Ok(()) => {
                    info!("Redis client initialized");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    info!("Redis不可用，仅使用本地回退缓存: {}", e);
                    None
                }
            },
            Err(e) => {
                info!("Redis不可用，仅使用本地回退缓存: {}", e);
                None
            }
        },
        None => None,
    };

    // 4. Build shared components
    let engine = Arc::new(PageEngine::new(
        Duration::from_secs(settings.http.timeout_secs),
        settings.http.max_redirects,
        &settings.http.user_agent,
    )?);
    let local = Arc::new(FileStore::new(&settings.cache.fallback_dir));
    let robots = Arc::new(RobotsCache::new(remote, local));
    let dedup = Arc::new(DedupIndex::new());
    let store = Arc::new(ResultStore::new());
    let pipeline = Arc::new(FetchValidationPipeline::new(
        engine.clone(),
        robots.clone(),
        dedup,
        store.clone(),
    ));

    // 5. Fetch and decode the root sitemap; only this decode failure is fatal
    let data = engine.fetch_document(&settings.sitemap.url).await?;
    let root = SitemapDecoder::decode(&data)?;

    // 6. Run the traversal to quiescence
    let scheduler = TraversalScheduler::new(
        TraversalConfig {
            max_pages: settings.concurrency.max_pages,
            max_indexes: settings.concurrency.max_indexes,
            max_depth: settings.sitemap.max_depth,
            deadline: Duration::from_secs(settings.sitemap.deadline_secs),
        },
        engine,
        pipeline,
    );
    scheduler.run(root).await;

    // 7. Persist results and clear the local robots fallback store
    let page_results = store.drain();
    info!("共收集 {} 条页面结果", page_results.len());
    results::write_json(Path::new(&settings.output.path), &page_results)?;
    if let Err(e) = robots.cleanup().await {
        warn!("清理本地回退缓存失败: {}", e);
    }

    info!("检查完成");
    Ok(())
}
