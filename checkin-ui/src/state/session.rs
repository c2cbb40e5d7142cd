//! Browser Session Storage
//!
//! Session token and API URL kept in `localStorage`.

use checkin_admin::{ApiError, ApiResult, TokenStore};

/// `localStorage` key of the session token
pub const TOKEN_KEY: &str = "token";

/// `localStorage` key of the API base URL override
pub const API_URL_KEY: &str = "checkin_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn get_item(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

pub fn set_item(key: &str, value: &str) -> ApiResult<()> {
    let storage =
        local_storage().ok_or_else(|| ApiError::Session("localStorage unavailable".to_string()))?;
    storage
        .set_item(key, value)
        .map_err(|e| ApiError::Session(format!("{:?}", e)))
}

pub fn remove_item(key: &str) -> ApiResult<()> {
    let storage =
        local_storage().ok_or_else(|| ApiError::Session("localStorage unavailable".to_string()))?;
    storage
        .remove_item(key)
        .map_err(|e| ApiError::Session(format!("{:?}", e)))
}

/// Session token in `localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn get(&self) -> Option<String> {
        get_item(TOKEN_KEY)
    }

    fn set(&self, token: &str) -> ApiResult<()> {
        set_item(TOKEN_KEY, token.trim())
    }

    fn clear(&self) -> ApiResult<()> {
        remove_item(TOKEN_KEY)
    }
}
