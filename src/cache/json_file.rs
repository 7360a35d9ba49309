//! Directory-backed cache: one JSON file per key

use super::traits::{Cache, CacheResult, OpenCache};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const ENTRY_SUFFIX: &str = ".charnet.json";
const TEMP_PREFIX: &str = ".charnet-";
const TEMP_SUFFIX: &str = ".tmp";

/// Cache that stores each entry as `<encoded key>.charnet.json` in a directory.
///
/// Writes go to a uniquely named temp file in the same directory and are
/// renamed over the entry, so a reader sees the old document or the new
/// one. `clear()` only touches `*.charnet.json` files and this cache's own
/// temp files; anything else in the directory is left alone.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    /// Directory holding the entries
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}", encode_key(key), ENTRY_SUFFIX))
    }
}

impl OpenCache for JsonFileCache {
    fn open(dir: impl AsRef<Path>) -> CacheResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl Cache for JsonFileCache {
    fn get_value(&self, key: &str) -> Option<Value> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(key, "cache miss");
                return None;
            }
            Err(e) => {
                tracing::warn!(key, path = %path.display(), error = %e, "unreadable cache entry, treating as miss");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                tracing::debug!(key, "cache hit");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(key, path = %path.display(), error = %e, "corrupt cache entry, treating as miss");
                None
            }
        }
    }

    fn set_value(&self, key: &str, value: &Value) -> CacheResult<()> {
        let mut tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.dir)?;
        serde_json::to_writer(&mut tmp, value)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key))?;
        tracing::debug!(key, "cache entry written");
        Ok(())
    }

    fn clear(&self) -> CacheResult<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let ours = name.ends_with(ENTRY_SUFFIX)
                || (name.starts_with(TEMP_PREFIX) && name.ends_with(TEMP_SUFFIX));
            if ours {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        tracing::info!(dir = %self.dir.display(), removed, "cache cleared");
        Ok(removed)
    }
}

/// Map a key to a file stem that cannot leave the cache directory.
///
/// Bytes outside `[A-Za-z0-9 _.,'()-]` are percent-encoded, as is `%`
/// itself, so distinct keys always map to distinct names. A leading `.`
/// is encoded too, keeping entries visible and distinct from temp files.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, b) in key.bytes().enumerate() {
        let keep = b.is_ascii_alphanumeric()
            || (matches!(b, b' ' | b'_' | b'.' | b',' | b'\'' | b'(' | b')' | b'-')
                && !(i == 0 && b == b'.'));
        if keep {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{image_key, NETWORK_KEY};
    use serde_json::json;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, JsonFileCache) {
        let dir = TempDir::new().unwrap();
        let cache = JsonFileCache::open(dir.path().join("cache")).unwrap();
        (dir, cache)
    }

    #[test]
    fn open_creates_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cache");
        assert!(!path.exists());

        JsonFileCache::open(&path).unwrap();
        assert!(path.is_dir());

        // Idempotent
        JsonFileCache::open(&path).unwrap();
    }

    #[test]
    fn missing_key_is_none() {
        let (_dir, cache) = open_temp();
        assert!(cache.get_value("nothing").is_none());
        assert!(cache.get::<String>("nothing").is_none());
    }

    #[test]
    fn set_then_get_roundtrip() {
        let (_dir, cache) = open_temp();
        let value = json!({ "nodes": ["A"], "edges": [], "nested": { "n": 1.5, "ok": true } });

        cache.set_value(NETWORK_KEY, &value).unwrap();
        assert_eq!(cache.get_value(NETWORK_KEY), Some(value));
    }

    #[test]
    fn floats_come_back_bit_exact() {
        let (_dir, cache) = open_temp();
        let tricky = 1.0715660391465826e-75_f64;
        cache.set("f", &tricky).unwrap();
        assert_eq!(cache.get::<f64>("f").map(f64::to_bits), Some(tricky.to_bits()));

        let sizes = vec![6f64.sqrt(), 1.0 / 3.0, f64::MIN_POSITIVE, f64::MAX];
        cache.set("sizes", &sizes).unwrap();
        assert_eq!(cache.get::<Vec<f64>>("sizes"), Some(sizes));
    }

    #[test]
    fn set_overwrites() {
        let (_dir, cache) = open_temp();
        cache.set("k", &1u32).unwrap();
        cache.set("k", &2u32).unwrap();
        assert_eq!(cache.get::<u32>("k"), Some(2));
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let (_dir, cache) = open_temp();
        fs::write(cache.path_for("broken"), b"{\"nodes\": [").unwrap();
        assert!(cache.get_value("broken").is_none());
    }

    #[test]
    fn wrong_shape_is_a_miss() {
        let (_dir, cache) = open_temp();
        cache.set("n", &"not a number").unwrap();
        assert!(cache.get::<u64>("n").is_none());
    }

    #[test]
    fn empty_string_is_a_hit() {
        let (_dir, cache) = open_temp();
        cache.set(&image_key("Nobody"), "").unwrap();
        assert_eq!(cache.get::<String>(&image_key("Nobody")), Some(String::new()));
    }

    #[test]
    fn slash_in_key_stays_inside_directory() {
        let (_dir, cache) = open_temp();
        let key = image_key("AC/DC");
        let path = cache.path_for(&key);
        assert_eq!(path.parent(), Some(cache.dir()));

        cache.set(&key, "http://img").unwrap();
        assert_eq!(cache.get::<String>(&key).as_deref(), Some("http://img"));
    }

    #[test]
    fn similar_keys_do_not_collide() {
        assert_ne!(encode_key("a/b"), encode_key("a%2Fb"));
        assert_eq!(encode_key(".."), "%2E.");
        assert_eq!(encode_key("image_Harry Potter"), "image_Harry Potter");
        assert_eq!(encode_key("Éowyn"), "%C3%89owyn");
        assert!(!encode_key(".hidden").starts_with('.'));
    }

    #[test]
    fn clear_removes_entries_only() {
        let (_dir, cache) = open_temp();
        cache.set("network", &json!({})).unwrap();
        cache.set(&image_key("A"), "u").unwrap();
        let unrelated = cache.dir().join("notes.txt");
        fs::write(&unrelated, "keep me").unwrap();
        let settings = cache.dir().join("settings.json");
        fs::write(&settings, "{\"theme\": \"dark\"}").unwrap();

        let removed = cache.clear().unwrap();
        assert_eq!(removed, 2);
        assert!(cache.get_value("network").is_none());
        assert!(cache.get_value(&image_key("A")).is_none());
        assert!(unrelated.exists());
        assert_eq!(fs::read_to_string(&settings).unwrap(), "{\"theme\": \"dark\"}");
    }

    #[test]
    fn clear_removes_leftover_temp_files() {
        let (_dir, cache) = open_temp();
        let stale = cache.dir().join(".charnet-abc123.tmp");
        fs::write(&stale, "partial").unwrap();

        assert_eq!(cache.clear().unwrap(), 1);
        assert!(!stale.exists());
    }

    #[test]
    fn no_temp_files_left_after_set() {
        let (_dir, cache) = open_temp();
        cache.set("k", &json!([1, 2, 3])).unwrap();

        let names: Vec<String> = fs::read_dir(cache.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["k.charnet.json".to_string()]);
    }

    #[test]
    fn entries_survive_reopen() {
        let (_dir, cache) = open_temp();
        cache.set("persist", &vec!["a", "b"]).unwrap();

        let reopened = JsonFileCache::open(cache.dir()).unwrap();
        assert_eq!(
            reopened.get::<Vec<String>>("persist"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }
}
