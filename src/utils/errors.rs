// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("无效的URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("重定向次数超过上限: {0}")]
    RedirectLimit(usize),

    #[error("重定向响应缺少Location头")]
    MissingLocation,

    #[error("错误的状态码: {0}")]
    BadStatus(u16),
}

/// 解码错误类型
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("XML解析错误: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("未知的sitemap格式")]
    UnknownFormat,
}
