use std::collections::HashMap;

// 生成済みサムネイル（data URL）の有界メモリキャッシュ
// キーにソースの更新時刻が含まれるため、変更されたソースのエントリは自然に外れる
pub struct ThumbnailMemoryCache {
    entries: HashMap<String, Slot>,
    clock: u64, // 疑似アクセス時刻（単調増加カウンタ）
    max_size: usize,
}

struct Slot {
    data_url: String,
    last_used: u64,
}

impl ThumbnailMemoryCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            clock: 0,
            max_size,
        }
    }

    // キャッシュキー（MD5ハッシュ）
    pub fn cache_key(path: &str, modified_time: u64, height: u32) -> String {
        let input = format!("{}:{}:{}:png", path, modified_time, height);
        format!("{:x}", md5::compute(&input))
    }

    pub fn get(&mut self, key: &str) -> Option<String> {
        self.clock += 1;
        let clock = self.clock;
        self.entries.get_mut(key).map(|slot| {
            slot.last_used = clock;
            slot.data_url.clone()
        })
    }

    pub fn insert(&mut self, key: String, data_url: String) {
        if self.max_size == 0 {
            return;
        }
        self.clock += 1;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            // 最後に使われてから最も時間が経ったエントリを追い出す
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(
            key,
            Slot {
                data_url,
                last_used: self.clock,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_returns_entries() {
        let mut cache = ThumbnailMemoryCache::new(4);
        assert!(cache.is_empty());
        cache.insert("a".to_string(), "url-a".to_string());
        assert_eq!(cache.get("a").as_deref(), Some("url-a"));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn evicts_least_recently_used_entry() {
        let mut cache = ThumbnailMemoryCache::new(2);
        cache.insert("a".to_string(), "url-a".to_string());
        cache.insert("b".to_string(), "url-b".to_string());
        // aを触ってからcを入れるとbが追い出される
        cache.get("a");
        cache.insert("c".to_string(), "url-c".to_string());

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn reinserting_existing_key_does_not_evict() {
        let mut cache = ThumbnailMemoryCache::new(2);
        cache.insert("a".to_string(), "url-a".to_string());
        cache.insert("b".to_string(), "url-b".to_string());
        cache.insert("a".to_string(), "url-a2".to_string());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a").as_deref(), Some("url-a2"));
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn cache_key_depends_on_modified_time() {
        let k1 = ThumbnailMemoryCache::cache_key("/p/page.png", 100, 100);
        let k2 = ThumbnailMemoryCache::cache_key("/p/page.png", 200, 100);
        assert_ne!(k1, k2);
        assert_eq!(k1.len(), 32); // MD5の16進表現
        assert_eq!(k1, ThumbnailMemoryCache::cache_key("/p/page.png", 100, 100));
    }
}
