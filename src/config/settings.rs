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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含sitemap、HTTP、并发控制、Redis与输出等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// sitemap遍历配置
    pub sitemap: SitemapSettings,
    /// HTTP客户端配置
    pub http: HttpSettings,
    /// 并发控制配置
    pub concurrency: ConcurrencySettings,
    /// Redis配置，缺省时只使用本地回退缓存
    #[serde(default)]
    pub redis: RedisSettings,
    /// 本地缓存配置
    pub cache: CacheSettings,
    /// 输出配置
    pub output: OutputSettings,
}

/// sitemap遍历配置设置
#[derive(Debug, Deserialize)]
pub struct SitemapSettings {
    /// 根sitemap.xml的URL
    pub url: String,
    /// sitemapindex的最大递归深度
    pub max_depth: u32,
    /// 单次运行的总截止时间（秒），到期后不再派发新任务
    pub deadline_secs: u64,
}

/// HTTP客户端配置设置
#[derive(Debug, Deserialize)]
pub struct HttpSettings {
    /// 单个请求超时时间（秒）
    pub timeout_secs: u64,
    /// 最大重定向次数
    pub max_redirects: usize,
    /// User-Agent请求头
    pub user_agent: String,
}

/// 并发控制配置设置
#[derive(Debug, Deserialize)]
pub struct ConcurrencySettings {
    /// 页面抓取任务的并发上限
    pub max_pages: usize,
    /// 子sitemap抓取解码任务的并发上限
    pub max_indexes: usize,
}

/// Redis配置设置
#[derive(Debug, Default, Deserialize)]
pub struct RedisSettings {
    /// Redis连接URL，缺省时只使用本地回退缓存
    pub url: Option<String>,
}

/// 本地缓存配置设置
#[derive(Debug, Deserialize)]
pub struct CacheSettings {
    /// robots.txt本地回退存储目录
    pub fallback_dir: String,
}

/// 输出配置设置
#[derive(Debug, Deserialize)]
pub struct OutputSettings {
    /// 结果JSON文件路径
    pub path: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件与环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default sitemap settings
            .set_default("sitemap.max_depth", 10)?
            .set_default("sitemap.deadline_secs", 300)?
            // Default HTTP settings
            .set_default("http.timeout_secs", 30)?
            .set_default("http.max_redirects", 5)?
            .set_default("http.user_agent", "checkrs-bot/1.0")?
            // Default concurrency settings
            .set_default("concurrency.max_pages", 10)?
            .set_default("concurrency.max_indexes", 4)?
            // Default cache settings
            .set_default("cache.fallback_dir", "./robots-cache")?
            // Default output settings
            .set_default("output.path", "results.json")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CHECKRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
