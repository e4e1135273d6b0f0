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

use reqwest::{redirect, Client};
use std::time::Duration;
use url::Url;

use crate::utils::errors::FetchError;

/// 页面抓取响应
#[derive(Debug)]
pub struct PageResponse {
    /// 最终响应的状态码
    pub status_code: u16,
    /// 响应体原始字节
    pub body: Vec<u8>,
    /// 重定向链，按跳转顺序排列
    pub redirects: Vec<String>,
}

/// 页面抓取引擎
///
/// 基于reqwest实现的HTTP抓取引擎。
/// 客户端禁用自动重定向，手动跟随Location以记录完整的重定向链。
pub struct PageEngine {
    /// HTTP客户端
    client: Client,
    /// 最大重定向次数
    max_redirects: usize,
}

impl PageEngine {
    /// 创建新的页面抓取引擎
    ///
    /// # 参数
    ///
    /// * `timeout` - 单个请求的超时时间
    /// * `max_redirects` - 最大重定向次数
    /// * `user_agent` - User-Agent请求头
    ///
    /// # 返回值
    ///
    /// * `Ok(PageEngine)` - 引擎实例
    /// * `Err(FetchError)` - 客户端构建失败
    pub fn new(
        timeout: Duration,
        max_redirects: usize,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            max_redirects,
        })
    }

    /// 抓取页面并记录重定向链
    ///
    /// 超过最大重定向次数是抓取失败，而不是静默截断。
    /// 响应体读取失败同样作为抓取失败返回。
    ///
    /// # 参数
    ///
    /// * `url` - 页面URL
    ///
    /// # 返回值
    ///
    /// * `Ok(PageResponse)` - 状态码、响应体与重定向链
    /// * `Err(FetchError)` - 抓取过程中出现的错误
    pub async fn fetch(&self, url: &str) -> Result<PageResponse, FetchError> {
        let mut current = Url::parse(url)?;
        let mut redirects = Vec::new();

        loop {
            let response = self.client.get(current.clone()).send().await?;

            if response.status().is_redirection() {
                if redirects.len() >= self.max_redirects {
                    return Err(FetchError::RedirectLimit(self.max_redirects));
                }
                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or(FetchError::MissingLocation)?;
                // Relative Location values resolve against the current URL
                let next = current.join(location)?;
                redirects.push(next.to_string());
                current = next;
                continue;
            }

            let status_code = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            return Ok(PageResponse {
                status_code,
                body,
                redirects,
            });
        }
    }

    /// 抓取sitemap文档
    ///
    /// 与页面抓取不同，非2xx状态码视为错误
    pub async fn fetch_document(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.fetch(url).await?;
        if !(200..300).contains(&response.status_code) {
            return Err(FetchError::BadStatus(response.status_code));
        }
        Ok(response.body)
    }
}
