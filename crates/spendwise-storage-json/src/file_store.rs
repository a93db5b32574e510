use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use spendwise_core::{KeyValueStore, StoreError};

const WALLET_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const WALLETS_DIR: &str = "wallets";

/// Directory layout for wallet files.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub wallet_root: PathBuf,
}

impl StoragePaths {
    pub fn under(base: &Path) -> Self {
        Self {
            wallet_root: base.join(WALLETS_DIR),
        }
    }
}

/// Key-value store persisted as a single JSON object per wallet profile.
///
/// Every write rewrites the whole file through a temporary sibling that is
/// renamed into place, so a crash never leaves a half-written wallet and a
/// `set_many` batch lands in full or not at all.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Opens (without creating) the wallet file for `profile`.
    pub fn for_profile(paths: &StoragePaths, profile: &str) -> Result<Self, StoreError> {
        fs::create_dir_all(&paths.wallet_root)?;
        Ok(Self {
            path: wallet_path(paths, profile),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists the canonical names of every stored profile.
    pub fn list_profiles(paths: &StoragePaths) -> Result<Vec<String>, StoreError> {
        if !paths.wallet_root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&paths.wallet_root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(WALLET_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&data).map_err(|err| StoreError::Serde(err.to_string()))
    }

    /// Current entries to build a write on. Unparseable JSON is discarded and
    /// overwritten; I/O failures are not.
    fn entries_for_write(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read_entries() {
            Ok(entries) => Ok(entries),
            Err(StoreError::Serde(err)) => {
                debug!(path = %self.path.display(), %err, "discarding unparseable wallet file");
                Ok(BTreeMap::new())
            }
            Err(err) => Err(err),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|err| StoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_many(&[(key, value)])
    }

    fn set_many(&self, batch: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut entries = self.entries_for_write()?;
        for (key, value) in batch {
            entries.insert(key.to_string(), value.to_string());
        }
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), keys = batch.len(), "wallet keys written");
        Ok(())
    }
}

fn wallet_path(paths: &StoragePaths, profile: &str) -> PathBuf {
    paths
        .wallet_root
        .join(format!("{}.{}", canonical_name(profile), WALLET_EXTENSION))
}

/// Lower-cases a profile name and replaces anything outside `[a-z0-9]` with `_`.
pub fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "default".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
