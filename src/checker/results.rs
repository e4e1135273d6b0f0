// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use parking_lot::Mutex;
use std::path::Path;

use crate::domain::models::page_result::PageResult;

/// 结果存储
///
/// 接受任意并发的追加；条目顺序与派发顺序无关，
/// 遍历完全静止后通过`drain`一次性取出
#[derive(Debug, Default)]
pub struct ResultStore {
    /// 已完成的页面结果
    results: Mutex<Vec<PageResult>>,
}

impl ResultStore {
    /// 创建新的结果存储实例
    pub fn new() -> Self {
        Self {
            results: Mutex::new(Vec::new()),
        }
    }

    /// 追加一条页面结果
    pub fn append(&self, result: PageResult) {
        self.results.lock().push(result);
    }

    /// 取出全部结果
    ///
    /// 只在所属遍历完全结束后调用一次
    pub fn drain(&self) -> Vec<PageResult> {
        std::mem::take(&mut *self.results.lock())
    }

    /// 当前已收集的结果数量
    pub fn len(&self) -> usize {
        self.results.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.lock().is_empty()
    }
}

/// 将结果序列写入JSON文件
pub fn write_json(path: &Path, results: &[PageResult]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, results)?;
    Ok(())
}
