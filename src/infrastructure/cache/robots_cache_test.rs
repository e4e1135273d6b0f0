// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use crate::infrastructure::cache::file_store::FileStore;
    use crate::infrastructure::cache::robots_cache::RobotsCache;
    use crate::infrastructure::cache::CacheStore;
    use anyhow::Result;
    use async_trait::async_trait;
    use dashmap::DashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// 基于内存映射的远端存储测试替身
    #[derive(Default)]
    struct MemoryStore {
        entries: DashMap<String, String>,
    }

    #[async_trait]
    impl CacheStore for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.get(key).map(|v| v.clone()))
        }

        async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> Result<()> {
            self.entries.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn local_store() -> (tempfile::TempDir, Arc<FileStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path()));
        (dir, store)
    }

    #[tokio::test]
    async fn test_network_fetch_populates_both_tiers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Disallow: /private"))
            .expect(1)
            .mount(&server)
            .await;

        let (_dir, local) = local_store();
        let remote = Arc::new(MemoryStore::default());
        let cache = RobotsCache::new(Some(remote.clone()), local.clone());

        let page = format!("{}/private/page", server.uri());
        let content = cache.get(&page).await.unwrap();
        assert_eq!(content, "Disallow: /private");

        // Both tiers now hold the content, so a second get stays off the network
        let again = cache.get(&page).await.unwrap();
        assert_eq!(again, "Disallow: /private");
        assert_eq!(remote.entries.len(), 1);
        let robots_url = format!("{}/robots.txt", server.uri());
        assert!(local.get(&robots_url).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_remote_hit_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("from network"))
            .expect(0)
            .mount(&server)
            .await;

        let (_dir, local) = local_store();
        let remote = Arc::new(MemoryStore::default());
        let robots_url = format!("{}/robots.txt", server.uri());
        remote
            .set(&format!("robots_cache:{}", robots_url), "Disallow: /a", None)
            .await
            .unwrap();

        let cache = RobotsCache::new(Some(remote), local);
        let content = cache.get(&format!("{}/a", server.uri())).await.unwrap();
        assert_eq!(content, "Disallow: /a");
    }

    #[tokio::test]
    async fn test_local_fallback_hit_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("from network"))
            .expect(0)
            .mount(&server)
            .await;

        let (_dir, local) = local_store();
        let robots_url = format!("{}/robots.txt", server.uri());
        local.set(&robots_url, "Disallow: /b").await.unwrap();

        // No remote tier at all, the cache degrades to local-only
        let cache = RobotsCache::new(None, local);
        let content = cache.get(&format!("{}/b", server.uri())).await.unwrap();
        assert_eq!(content, "Disallow: /b");
    }

    #[tokio::test]
    async fn test_robots_url_keeps_explicit_port() {
        let server = MockServer::start().await;
        // The mock only answers on its own port; a stripped port never reaches it
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Disallow: /x"))
            .expect(1)
            .mount(&server)
            .await;

        let (_dir, local) = local_store();
        let cache = RobotsCache::new(None, local);
        let content = cache.get(&format!("{}/x/page", server.uri())).await.unwrap();
        assert_eq!(content, "Disallow: /x");
    }

    #[tokio::test]
    async fn test_non_2xx_robots_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (_dir, local) = local_store();
        let cache = RobotsCache::new(None, local);
        let result = cache.get(&format!("{}/page", server.uri())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_cleanup_clears_local_store() {
        let (dir, local) = local_store();
        local.set("https://example.com/robots.txt", "x").await.unwrap();
        local.set("https://example.org/robots.txt", "y").await.unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);

        let cache = RobotsCache::new(None, local);
        cache.cleanup().await.unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_is_disallowed_prefix_matching() {
        let content = "User-agent: *\n# comment\nDisallow: /private\nDisallow:\nAllow: /";
        assert!(RobotsCache::is_disallowed(content, "/private"));
        assert!(RobotsCache::is_disallowed(content, "/private/page"));
        assert!(!RobotsCache::is_disallowed(content, "/public"));
        // An empty Disallow value blocks nothing
        assert!(!RobotsCache::is_disallowed("Disallow:", "/anything"));
    }
}
