// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use crate::checker::results::{write_json, ResultStore};
    use crate::domain::models::page_result::PageResult;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn result_for(url: &str) -> PageResult {
        PageResult {
            url: url.to_string(),
            status_code: 200,
            redirects: Vec::new(),
            canonical_url: None,
            meta_tags: HashMap::new(),
            load_time_ms: 10,
            is_blocked_by_robots_txt: false,
            content_hash: "00".repeat(32),
        }
    }

    #[tokio::test]
    async fn test_concurrent_appends_lose_nothing() {
        let store = Arc::new(ResultStore::new());
        let mut handles = Vec::new();
        for i in 0..64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.append(result_for(&format!("https://example.com/{}", i)));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut urls: Vec<String> = store.drain().into_iter().map(|r| r.url).collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), 64);
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        write_json(&path, &[result_for("https://example.com/")]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["url"], "https://example.com/");
        assert_eq!(parsed[0]["status_code"], 200);
    }
}
