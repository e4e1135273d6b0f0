// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 解码后的sitemap文档
///
/// 两种变体必须在每个消费点上穷尽匹配：
/// 页面集合（`<urlset>`）直接列出待检查的页面，
/// 索引（`<sitemapindex>`）列出需要递归抓取的子sitemap
#[derive(Debug, Clone)]
pub enum SitemapNode {
    /// `<urlset>`文档，包含具体页面条目
    PageSet(Vec<PageEntry>),
    /// `<sitemapindex>`文档，包含子sitemap引用
    Index(Vec<SitemapRef>),
}

/// `<urlset>`中的单个页面条目
///
/// 核心只消费`loc`，其余字段为透传元数据
#[derive(Debug, Clone, Default)]
pub struct PageEntry {
    /// 页面URL
    pub loc: String,
    /// 最后修改时间
    pub lastmod: Option<String>,
    /// 更新频率
    pub changefreq: Option<String>,
    /// 页面优先级
    pub priority: Option<f32>,
}

/// `<sitemapindex>`中的单个子sitemap引用
#[derive(Debug, Clone, Default)]
pub struct SitemapRef {
    /// 子sitemap文档URL
    pub loc: String,
    /// 最后修改时间
    pub lastmod: Option<String>,
}
