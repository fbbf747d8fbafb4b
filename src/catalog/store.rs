//! Load-once, read-only catalog snapshots with explicit refresh

use crate::catalog::loader::{load_from_path, Catalog, CatalogRecord};
use crate::error::Result;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Holds the current catalog snapshot. Readers take an `Arc` and never block
/// a reload for longer than the pointer swap.
pub struct CatalogStore<C> {
    source: Option<PathBuf>,
    current: RwLock<Arc<Catalog<C>>>,
}

impl<C: CatalogRecord> CatalogStore<C> {
    /// Load `path` once. A schema violation here is fatal to the caller.
    pub fn open(path: &Path) -> Result<Self> {
        let catalog = load_from_path::<C>(path)?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            current: RwLock::new(Arc::new(catalog)),
        })
    }

    /// Wrap a static reference table; `reload` is a no-op.
    pub fn from_catalog(catalog: Catalog<C>) -> Self {
        Self {
            source: None,
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn snapshot(&self) -> Arc<Catalog<C>> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Re-read the source and swap it in. On error the previous snapshot stays.
    pub fn reload(&self) -> Result<usize> {
        let Some(path) = &self.source else {
            return Ok(self.snapshot().len());
        };

        let catalog = load_from_path::<C>(path)?;
        let count = catalog.len();

        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(catalog);

        info!("Reloaded {} {} from {}", count, C::KIND, path.display());
        Ok(count)
    }

    /// Reload on a fixed interval until the returned task is aborted.
    pub fn spawn_refresh(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; the catalog is already fresh.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let store = Arc::clone(&store);
                match tokio::task::spawn_blocking(move || store.reload()).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => warn!("Catalog refresh failed, keeping previous snapshot: {}", e),
                    Err(e) => warn!("Catalog refresh task failed: {}", e),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::candidate::Course;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "title,description,author,url\n";

    fn write_catalog(file: &mut NamedTempFile, rows: &[&str]) {
        let mut content = HEADER.to_string();
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        std::fs::write(file.path(), content).unwrap();
        file.flush().unwrap();
    }

    #[test]
    fn test_reload_swaps_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        write_catalog(&mut file, &["Python,Basics,Jane,https://x.io/1"]);

        let store = CatalogStore::<Course>::open(file.path()).unwrap();
        let before = store.snapshot();
        assert_eq!(before.len(), 1);

        write_catalog(&mut file, &["Python,Basics,Jane,https://x.io/1", "SQL,Queries,John,https://x.io/2"]);
        assert_eq!(store.reload().unwrap(), 2);

        // Old snapshots stay valid for readers that hold them.
        assert_eq!(before.len(), 1);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn test_failed_reload_keeps_previous_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        write_catalog(&mut file, &["Python,Basics,Jane,https://x.io/1"]);
        let store = CatalogStore::<Course>::open(file.path()).unwrap();

        write_catalog(&mut file, &["Broken,,Jane,https://x.io/1"]);
        assert!(store.reload().is_err());
        assert_eq!(store.snapshot().items()[0].title, "Python");
    }

    #[test]
    fn test_static_catalog_reload_is_noop() {
        let course = Course::new("1", "Python", "Basics", "Jane", "https://x.io/1").unwrap();
        let store = CatalogStore::from_catalog(Catalog::new("static", vec![course]));

        assert!(store.source().is_none());
        assert_eq!(store.reload().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_periodic_refresh_picks_up_changes() {
        let mut file = NamedTempFile::new().unwrap();
        write_catalog(&mut file, &["Python,Basics,Jane,https://x.io/1"]);
        let store = Arc::new(CatalogStore::<Course>::open(file.path()).unwrap());

        let handle = store.spawn_refresh(Duration::from_millis(20));
        write_catalog(&mut file, &["Python,Basics,Jane,https://x.io/1", "SQL,Queries,John,https://x.io/2"]);

        let mut refreshed = false;
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            if store.snapshot().len() == 2 {
                refreshed = true;
                break;
            }
        }
        handle.abort();

        assert!(refreshed);
    }
}
