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

use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, warn};

use crate::checker::pipeline::FetchValidationPipeline;
use crate::decoder::SitemapDecoder;
use crate::domain::models::sitemap::{PageEntry, SitemapNode, SitemapRef};
use crate::engines::page_engine::PageEngine;

/// 取消信号
///
/// 由总截止时间驱动。到期后只阻止新任务派发，
/// 不会中断在途任务，它们被允许自然跑完
#[derive(Debug, Clone, Copy)]
pub struct CancelSignal {
    deadline: Instant,
}

impl CancelSignal {
    /// 从当前时刻起计算截止时间
    pub fn with_deadline(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
        }
    }

    /// 信号是否已触发
    pub fn is_cancelled(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// 遍历配置
///
/// 单次运行期间不变
#[derive(Debug, Clone)]
pub struct TraversalConfig {
    /// 页面抓取任务的并发上限
    pub max_pages: usize,
    /// 子sitemap抓取解码任务的并发上限
    pub max_indexes: usize,
    /// sitemapindex的最大递归深度
    pub max_depth: u32,
    /// 总截止时间
    pub deadline: Duration,
}

/// 遍历调度器
///
/// 将sitemap节点树展开为平铺的流水线派发。
/// 页面抓取与子sitemap抓取解码使用两个独立的信号量池，
/// 积压的索引分支不会饿死页面任务。
/// `run`返回时，所有传递派发的任务都已结束
pub struct TraversalScheduler {
    /// 文档抓取引擎
    engine: Arc<PageEngine>,
    /// 页面校验流水线
    pipeline: Arc<FetchValidationPipeline>,
    /// 页面任务许可池
    page_permits: Arc<Semaphore>,
    /// 索引任务许可池
    index_permits: Arc<Semaphore>,
    /// 共享取消信号
    cancel: CancelSignal,
    /// 最大递归深度
    max_depth: u32,
}

impl TraversalScheduler {
    /// 创建新的遍历调度器实例
    ///
    /// # 参数
    ///
    /// * `config` - 遍历配置
    /// * `engine` - 文档抓取引擎
    /// * `pipeline` - 页面校验流水线
    pub fn new(
        config: TraversalConfig,
        engine: Arc<PageEngine>,
        pipeline: Arc<FetchValidationPipeline>,
    ) -> Arc<Self> {
        Arc::new(Self {
            engine,
            pipeline,
            page_permits: Arc::new(Semaphore::new(config.max_pages)),
            index_permits: Arc::new(Semaphore::new(config.max_indexes)),
            cancel: CancelSignal::with_deadline(config.deadline),
            max_depth: config.max_depth,
        })
    }

    /// 从根节点开始遍历
    ///
    /// 返回时所有传递派发的页面任务与子遍历均已完成
    pub async fn run(self: &Arc<Self>, root: SitemapNode) {
        self.clone().traverse(root, 1).await;
    }

    /// 递归遍历一个节点
    ///
    /// 递归的async需要装箱，节点在派发时被消费
    fn traverse(self: Arc<Self>, node: SitemapNode, depth: u32) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            match node {
                SitemapNode::PageSet(entries) => self.process_page_set(entries).await,
                SitemapNode::Index(refs) => self.process_index(refs, depth).await,
            }
        })
    }

    /// 处理页面集合节点
    ///
    /// 每个条目持有一个页面许可，许可随任务结束释放
    async fn process_page_set(self: &Arc<Self>, entries: Vec<PageEntry>) {
        let mut tasks = JoinSet::new();
        for entry in entries {
            if self.cancel.is_cancelled() {
                warn!("已到截止时间，停止派发剩余页面");
                break;
            }
            let permit = match self.page_permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let pipeline = self.pipeline.clone();
            tasks.spawn(async move {
                let _permit = permit;
                pipeline.process(&entry).await;
            });
        }
        // Already-dispatched pages run to completion even after cancellation
        while tasks.join_next().await.is_some() {}
    }

    /// 处理索引节点
    ///
    /// 索引许可只覆盖子文档的抓取与解码，
    /// 递归子遍历在许可释放后进行，深层嵌套不会占满许可池
    async fn process_index(self: &Arc<Self>, refs: Vec<SitemapRef>, depth: u32) {
        if depth > self.max_depth {
            error!("超过最大递归深度: {}", depth);
            return;
        }

        let mut tasks = JoinSet::new();
        for sitemap in refs {
            if self.cancel.is_cancelled() {
                warn!("已到截止时间，停止派发剩余子sitemap");
                break;
            }
            let permit = match self.index_permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let this = self.clone();
            tasks.spawn(async move {
                let node = {
                    let _permit = permit;
                    match this.engine.fetch_document(&sitemap.loc).await {
                        Ok(data) => match SitemapDecoder::decode(&data) {
                            Ok(node) => Some(node),
                            Err(e) => {
                                // A decode failure aborts this branch only
                                error!("sitemap解析失败 {}: {}", sitemap.loc, e);
                                None
                            }
                        },
                        Err(e) => {
                            error!("sitemap抓取失败 {}: {}", sitemap.loc, e);
                            None
                        }
                    }
                };
                if let Some(node) = node {
                    this.traverse(node, depth + 1).await;
                }
            });
        }
        while tasks.join_next().await.is_some() {}
    }
}
