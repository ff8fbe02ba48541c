//! Per-resource table preferences kept in `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! `DataTable` remembers the page size a user picked for each resource so the
//! choice survives navigation and reloads. Values outside the page-size menu
//! are ignored on load.

#[cfg(test)]
#[path = "ui_persistence_test.rs"]
mod ui_persistence_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crud::PAGE_SIZES;

#[must_use]
pub fn page_size_key(resource: &str) -> String {
    format!("hcims_page_size_{resource}")
}

/// Stored page size for `resource`, if it is still on the menu.
pub fn load_page_size(resource: &str) -> Option<usize> {
    load_json::<usize>(&page_size_key(resource)).filter(|size| PAGE_SIZES.contains(size))
}

pub fn save_page_size(resource: &str, size: usize) {
    save_json(&page_size_key(resource), &size);
}

fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let _ = storage.set_item(key, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}
