use axum::extract::FromRef;

use crate::character_store::CharacterStoreHandle;
use crate::extension::MessagingExtension;

#[derive(Clone)]
pub(crate) struct WebState {
    pub(crate) store: CharacterStoreHandle,
    pub(crate) extension: MessagingExtension,
}

impl WebState {
    pub(crate) fn new(store: CharacterStoreHandle) -> Self {
        Self {
            extension: MessagingExtension::new(store.clone()),
            store,
        }
    }
}

impl FromRef<WebState> for CharacterStoreHandle {
    fn from_ref(input: &WebState) -> Self {
        input.store.clone()
    }
}

impl FromRef<WebState> for MessagingExtension {
    fn from_ref(input: &WebState) -> Self {
        input.extension.clone()
    }
}
