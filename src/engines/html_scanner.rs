// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{Html, Selector};
use std::collections::HashMap;

/// HTML字段扫描结果
///
/// 缺失的字段以None或空映射表示，扫描本身从不失败
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// canonical链接
    pub canonical_url: Option<String>,
    /// 元标签映射（title、description）
    pub meta_tags: HashMap<String, String>,
}

/// HTML字段扫描器
///
/// 提取canonical链接、`<title>`文本与description元标签。
/// scraper的Html不是Send，解析保持在同步作用域内完成
pub struct HtmlScanner;

impl HtmlScanner {
    /// 尽力提取页面字段
    pub fn extract(body: &str) -> ScanOutcome {
        let document = Html::parse_document(body);
        let mut outcome = ScanOutcome::default();

        if let Ok(selector) = Selector::parse(r#"link[rel="canonical"]"#) {
            if let Some(element) = document.select(&selector).next() {
                if let Some(href) = element.value().attr("href") {
                    outcome.canonical_url = Some(href.to_string());
                }
            }
        }

        if let Ok(selector) = Selector::parse("title") {
            if let Some(element) = document.select(&selector).next() {
                let title = element.text().collect::<String>();
                if !title.trim().is_empty() {
                    outcome.meta_tags.insert("title".to_string(), title);
                }
            }
        }

        if let Ok(selector) = Selector::parse(r#"meta[name="description"]"#) {
            if let Some(element) = document.select(&selector).next() {
                if let Some(content) = element.value().attr("content") {
                    outcome
                        .meta_tags
                        .insert("description".to_string(), content.to_string());
                }
            }
        }

        outcome
    }
}
