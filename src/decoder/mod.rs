// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::domain::models::sitemap::{PageEntry, SitemapNode, SitemapRef};
use crate::utils::errors::DecodeError;


/// 当前文本事件归属的字段
#[derive(Clone, Copy)]
enum Field {
    Loc,
    LastMod,
    ChangeFreq,
    Priority,
}

/// 文档根元素类型
#[derive(Clone, Copy, PartialEq)]
enum Root {
    None,
    UrlSet,
    Index,
}

/// sitemap解码器
///
/// 将抓取到的XML字节解码为`SitemapNode`。
/// 既不是含条目的`<urlset>`也不是含引用的`<sitemapindex>`时返回解码错误。
pub struct SitemapDecoder;

impl SitemapDecoder {
    /// 解码sitemap文档
    ///
    /// # 参数
    ///
    /// * `data` - 文档原始字节
    ///
    /// # 返回值
    ///
    /// * `Ok(SitemapNode)` - 解码出的页面集合或索引
    /// * `Err(DecodeError)` - 文档不符合任何已知schema
    pub fn decode(data: &[u8]) -> Result<SitemapNode, DecodeError> {
        let text = String::from_utf8_lossy(data);
        let mut reader = Reader::from_str(&text);
        reader.config_mut().trim_text(true);

        let mut root = Root::None;
        let mut entries: Vec<PageEntry> = Vec::new();
        let mut refs: Vec<SitemapRef> = Vec::new();
        let mut entry: Option<PageEntry> = None;
        let mut sref: Option<SitemapRef> = None;
        let mut field: Option<Field> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"urlset" => root = Root::UrlSet,
                    b"sitemapindex" => root = Root::Index,
                    b"url" => entry = Some(PageEntry::default()),
                    b"sitemap" => sref = Some(SitemapRef::default()),
                    b"loc" => field = Some(Field::Loc),
                    b"lastmod" => field = Some(Field::LastMod),
                    b"changefreq" => field = Some(Field::ChangeFreq),
                    b"priority" => field = Some(Field::Priority),
                    _ => field = None,
                },
                Ok(Event::Text(ref e)) => {
                    let value = e.unescape().unwrap_or_default().trim().to_string();
                    if value.is_empty() {
                        continue;
                    }
                    match (field, entry.as_mut(), sref.as_mut()) {
                        (Some(Field::Loc), Some(en), _) => en.loc = value,
                        (Some(Field::LastMod), Some(en), _) => en.lastmod = Some(value),
                        (Some(Field::ChangeFreq), Some(en), _) => en.changefreq = Some(value),
                        (Some(Field::Priority), Some(en), _) => {
                            en.priority = value.parse::<f32>().ok()
                        }
                        (Some(Field::Loc), None, Some(sr)) => sr.loc = value,
                        (Some(Field::LastMod), None, Some(sr)) => sr.lastmod = Some(value),
                        _ => {}
                    }
                }
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"url" => {
                        if let Some(en) = entry.take() {
                            if !en.loc.is_empty() {
                                entries.push(en);
                            }
                        }
                    }
                    b"sitemap" => {
                        if let Some(sr) = sref.take() {
                            if !sr.loc.is_empty() {
                                refs.push(sr);
                            }
                        }
                    }
                    _ => field = None,
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(DecodeError::Xml(e)),
                _ => {}
            }
        }

        // An empty urlset or index matches neither schema
        match root {
            Root::UrlSet if !entries.is_empty() => Ok(SitemapNode::PageSet(entries)),
            Root::Index if !refs.is_empty() => Ok(SitemapNode::Index(refs)),
            _ => Err(DecodeError::UnknownFormat),
        }
    }
}
