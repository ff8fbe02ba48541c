//! Bearer-token storage in `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login page stores the access/refresh pair issued by `/auth/login/`;
//! `net::api` reads the access token on every request and rotates both after a
//! refresh. Server rendering has no storage, so every read is `None` there.

pub const ACCESS_KEY: &str = "token";
pub const REFRESH_KEY: &str = "refreshToken";

/// Access token for the `Authorization` header.
pub fn access_token() -> Option<String> {
    read(ACCESS_KEY)
}

pub fn refresh_token() -> Option<String> {
    read(REFRESH_KEY)
}

/// Store a freshly issued token pair.
pub fn store_tokens(access: &str, refresh: &str) {
    write(ACCESS_KEY, access);
    write(REFRESH_KEY, refresh);
}

/// Forget both tokens, e.g. after a failed refresh or logout.
pub fn clear_tokens() {
    remove(ACCESS_KEY);
    remove(REFRESH_KEY);
}

pub fn is_signed_in() -> bool {
    access_token().is_some_and(|t| !t.is_empty())
}

/// `Bearer <token>` header value.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(feature = "hydrate")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn read(key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        storage()?.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

fn write(key: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage() {
            let _ = storage.set_item(key, value);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

fn remove(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
