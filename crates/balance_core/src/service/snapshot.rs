//! Encoding of the persisted state into store blobs and back.
//!
//! # Invariants
//! - Decoding never fails: a missing or malformed blob yields its default.
//! - List blobs decode per record, so one corrupt entry does not drop the rest.

use crate::model::resource::Resource;
use crate::model::task::Task;
use crate::repo::store_repo::{KeyValueStore, StoreError, StoreKey, StoreResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Everything the store holds between sessions.
#[derive(Debug, Default)]
pub(crate) struct PersistedState {
    pub tasks: Vec<Task>,
    pub resources: Vec<Resource>,
    pub is_dark: bool,
}

pub(crate) fn load_state(store: &impl KeyValueStore) -> PersistedState {
    PersistedState {
        tasks: decode_list(store, StoreKey::Tasks),
        resources: decode_list(store, StoreKey::Resources),
        is_dark: decode_flag(store, StoreKey::DarkMode),
    }
}

pub(crate) fn encode<T: Serialize + ?Sized>(key: StoreKey, value: &T) -> StoreResult<String> {
    serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })
}

fn decode_list<T: DeserializeOwned>(store: &impl KeyValueStore, key: StoreKey) -> Vec<T> {
    let Some(blob) = store.load(key) else {
        debug!("event=state_load module=service status=empty key={key}");
        return Vec::new();
    };

    let raw_items = match serde_json::from_str::<Vec<serde_json::Value>>(&blob) {
        Ok(items) => items,
        Err(err) => {
            warn!(
                "event=state_load module=service status=fallback key={key} error_code=blob_malformed error={err}"
            );
            return Vec::new();
        }
    };

    let total = raw_items.len();
    let items = raw_items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<T>(item).ok())
        .collect::<Vec<_>>();
    if items.len() < total {
        warn!(
            "event=state_load module=service status=partial key={key} error_code=record_malformed skipped={}",
            total - items.len()
        );
    }
    debug!(
        "event=state_load module=service status=ok key={key} count={}",
        items.len()
    );
    items
}

fn decode_flag(store: &impl KeyValueStore, key: StoreKey) -> bool {
    let Some(blob) = store.load(key) else {
        return false;
    };
    match serde_json::from_str::<bool>(&blob) {
        Ok(flag) => flag,
        Err(err) => {
            warn!(
                "event=state_load module=service status=fallback key={key} error_code=blob_malformed error={err}"
            );
            false
        }
    }
}
