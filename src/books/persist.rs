use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt snapshot {key}: {source}")]
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },

    #[error("cannot serialize snapshot {key}: {source}")]
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Snapshot storage for the two books. Each key is one JSON file inside
/// the data directory; every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

pub const SALES_KEY: &str = "products";
pub const CREDITS_KEY: &str = "credits";

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load a snapshot. A missing file is a first run and yields an empty
    /// list; a file that exists but does not parse is a decode error.
    pub fn load<T: DeserializeOwned>(&self, key: &'static str) -> Result<Vec<T>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader).map_err(|source| StorageError::Decode { key, source })
    }

    /// Startup path: a corrupt snapshot is logged and treated as absent
    /// rather than taking the whole program down.
    pub fn load_or_default<T: DeserializeOwned>(&self, key: &'static str) -> Vec<T> {
        match self.load(key) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("resetting {key} to empty: {e}");
                Vec::new()
            }
        }
    }

    /// Overwrite the full snapshot for `key`. Creates the data directory
    /// on first use.
    pub fn save<T: Serialize>(&self, key: &'static str, records: &[T]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let writer = BufWriter::new(File::create(self.path(key))?);
        serde_json::to_writer_pretty(writer, records)
            .map_err(|source| StorageError::Encode { key, source })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::datatype::{CreditRecord, SaleRecord};
    use std::path::Path;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("khata-test-{}", uuid::Uuid::new_v4()));
            Self(dir)
        }

        fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn missing_snapshot_loads_empty() {
        let dir = TempDir::new();
        let storage = Storage::new(dir.path());
        let records: Vec<SaleRecord> = storage.load(SALES_KEY).expect("first run");
        assert!(records.is_empty());
    }

    #[test]
    fn snapshot_round_trip() {
        let dir = TempDir::new();
        let storage = Storage::new(dir.path());

        let sales = vec![
            SaleRecord::new("Soap", 5.0, 12.0, 20.0, None),
            SaleRecord::new("Sugar", 2.0, 40.0, 44.0, None),
        ];
        let credits = vec![CreditRecord::new("Ali", "Sugar", 50.0, None)];

        storage.save(SALES_KEY, &sales).expect("save sales");
        storage.save(CREDITS_KEY, &credits).expect("save credits");

        let loaded_sales: Vec<SaleRecord> = storage.load(SALES_KEY).expect("load sales");
        let loaded_credits: Vec<CreditRecord> =
            storage.load(CREDITS_KEY).expect("load credits");

        assert_eq!(loaded_sales, sales);
        assert_eq!(loaded_credits, credits);
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = TempDir::new();
        let storage = Storage::new(dir.path());

        storage
            .save(SALES_KEY, &[SaleRecord::new("Soap", 5.0, 12.0, 20.0, None)])
            .expect("save");
        storage
            .save(SALES_KEY, &Vec::<SaleRecord>::new())
            .expect("overwrite");

        let loaded: Vec<SaleRecord> = storage.load(SALES_KEY).expect("load");
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_snapshot_is_decode_error_and_resets_to_empty() {
        let dir = TempDir::new();
        let storage = Storage::new(dir.path());

        fs::create_dir_all(dir.path()).expect("mkdir");
        fs::write(dir.path().join("products.json"), b"{ not json ]").expect("write");

        let strict: Result<Vec<SaleRecord>> = storage.load(SALES_KEY);
        assert!(matches!(strict, Err(StorageError::Decode { .. })));

        let lenient: Vec<SaleRecord> = storage.load_or_default(SALES_KEY);
        assert!(lenient.is_empty());
    }

    #[test]
    fn snapshot_without_id_or_date_still_parses() {
        let dir = TempDir::new();
        let storage = Storage::new(dir.path());

        // Shape written by the pre-id variants of the tool.
        let legacy = r#"[{
            "name": "Soap",
            "quantity": 5.0,
            "buyRate": 12.0,
            "sellRate": 20.0,
            "totalInvestment": 60.0,
            "totalSell": 100.0,
            "profit": 40.0
        }]"#;
        fs::create_dir_all(dir.path()).expect("mkdir");
        fs::write(dir.path().join("products.json"), legacy).expect("write");

        let loaded: Vec<SaleRecord> = storage.load(SALES_KEY).expect("legacy load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Soap");
        assert_eq!(loaded[0].profit, 40.0);
        assert!(loaded[0].date.is_none());
    }
}
