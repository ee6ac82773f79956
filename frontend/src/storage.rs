use gloo_utils::window;
use vcta_lib::{
    auth::{AuthToken, TokenStore},
    config::AUTH_TOKEN_KEY,
    error::StorageError,
};
use web_sys::Storage;

/// Auth token kept in the browser's `localStorage`, so it survives reloads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalStorageTokens;

impl LocalStorageTokens {
    fn storage() -> Result<Storage, StorageError> {
        match window().local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable("localStorage is disabled".into())),
            Err(err) => Err(StorageError::Unavailable(format!("{err:?}"))),
        }
    }
}

impl TokenStore for LocalStorageTokens {
    fn load(&self) -> Option<AuthToken> {
        let storage = Self::storage().ok()?;
        storage
            .get_item(AUTH_TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
            .map(AuthToken::new)
    }

    fn save(&self, token: &AuthToken) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(AUTH_TOKEN_KEY, &token.token)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }

    fn clear(&self) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(AUTH_TOKEN_KEY)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }
}
