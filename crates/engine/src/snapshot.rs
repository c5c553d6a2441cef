//! Whole-file JSON snapshot of the store.
//!
//! The snapshot is an object mapping each category name to the array of its
//! transactions (`{"amount": <number>, "date": "YYYY-MM-DD"}`). Category order
//! in the file is the store order, both ways.
//!
//! Saving overwrites the file unconditionally: there is no temp-file swap, so
//! a crash mid-write can leave a truncated snapshot behind.

use std::{fmt, fs, io::ErrorKind, path::Path};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};
use tracing::{debug, info};

use crate::{EngineError, ResultEngine, Store, Transaction, store::Category};

const INDENT: &[u8] = b"    ";

/// Loads the snapshot at `path`.
///
/// A missing file is not an error: it yields an empty store. A file that is
/// present but not a valid snapshot fails with [`EngineError::SnapshotParse`].
pub fn load(path: impl AsRef<Path>) -> ResultEngine<Store> {
    Ok(load_existing(path)?.unwrap_or_default())
}

/// Like [`load`], but returns `None` when there is no file at `path`.
pub fn load_existing(path: impl AsRef<Path>) -> ResultEngine<Option<Store>> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no snapshot found, starting empty");
            return Ok(None);
        }
        Err(err) => return Err(EngineError::io(path, err)),
    };

    let store: Store =
        serde_json::from_str(&content).map_err(|source| EngineError::SnapshotParse {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        path = %path.display(),
        categories = store.categories().len(),
        transactions = store.len(),
        "snapshot loaded"
    );
    Ok(Some(store))
}

/// Writes the whole store to `path`, replacing any previous content.
pub fn save(store: &Store, path: impl AsRef<Path>) -> ResultEngine<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| EngineError::io(parent, err))?;
    }
    let payload = to_json(store)?;
    fs::write(path, payload).map_err(|err| EngineError::io(path, err))?;
    debug!(path = %path.display(), transactions = store.len(), "snapshot saved");
    Ok(())
}

/// Renders the snapshot as pretty-printed JSON with a four space indent.
pub fn to_json(store: &Store) -> ResultEngine<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    store
        .serialize(&mut serializer)
        .map_err(EngineError::SnapshotEncode)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

impl Serialize for Store {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories().len()))?;
        for category in self.categories() {
            map.serialize_entry(category.name(), category.transactions())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Store {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = Store;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping categories to transaction arrays")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories: Vec<Category> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, transactions)) =
                    access.next_entry::<String, Vec<Transaction>>()?
                {
                    // Duplicate keys: the last occurrence wins, at the first position.
                    match categories.iter_mut().find(|c| c.name() == name) {
                        Some(existing) => existing.transactions = transactions,
                        None => categories.push(Category::new(name, transactions)),
                    }
                }
                Ok(Store::from_categories(categories))
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}
