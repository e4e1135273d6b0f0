// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use crate::checker::dedup::DedupIndex;
    use std::sync::Arc;

    #[test]
    fn test_first_writer_wins() {
        let index = DedupIndex::new();
        assert_eq!(index.check_and_insert("abc", "https://a.example"), None);
        assert_eq!(
            index.check_and_insert("abc", "https://b.example"),
            Some("https://a.example".to_string())
        );
        // The owner is never overwritten
        assert_eq!(
            index.check_and_insert("abc", "https://c.example"),
            Some("https://a.example".to_string())
        );
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_distinct_digests_are_independent() {
        let index = DedupIndex::new();
        assert_eq!(index.check_and_insert("d1", "https://a.example"), None);
        assert_eq!(index.check_and_insert("d2", "https://b.example"), None);
        assert_eq!(index.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_elect_exactly_one_owner() {
        let index = Arc::new(DedupIndex::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let index = index.clone();
            handles.push(tokio::spawn(async move {
                index.check_and_insert("same-digest", &format!("https://example.com/{}", i))
            }));
        }

        let mut owners = 0;
        let mut first_urls = Vec::new();
        for handle in handles {
            match handle.await.unwrap() {
                None => owners += 1,
                Some(url) => first_urls.push(url),
            }
        }

        // Exactly one caller observes "not a duplicate"
        assert_eq!(owners, 1);
        assert_eq!(first_urls.len(), 31);
        // Every loser observes the same owner
        assert!(first_urls.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(index.len(), 1);
    }
}
