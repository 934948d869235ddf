//! Messaging extension invoke handling: search, item selection and submitted actions.
mod action;
mod query;
mod select;

use std::sync::Arc;

use avengers_api_types::{
    invoke::invoke_name, CardImage, ExtensionAction, ExtensionActionResponse, ExtensionQuery,
    ExtensionResponse,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::character_store::{CharacterStoreHandle, DataSourceError};

use action::CommandRegistry;

const IMAGE_ALT: &str = "Icon";

#[derive(Debug, Error)]
pub(crate) enum ExtensionError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    #[error("Malformed query: {0}")]
    MalformedQuery(#[source] serde_json::Error),
    #[error("Selected item is not a valid preview payload: {0}")]
    MalformedSelection(#[source] serde_json::Error),
    #[error("Malformed action: {0}")]
    MalformedAction(#[source] serde_json::Error),
    #[error("Invalid data for command {command_id}: {error}")]
    MalformedCommandData {
        command_id: String,
        #[source]
        error: serde_json::Error,
    },
    #[error("Invalid CommandId: {0}")]
    UnknownCommand(String),
    #[error("Unsupported invoke {0}")]
    UnsupportedInvoke(String),
}

/// Body returned for an invoke. Both variants serialize as `{ "composeExtension": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum InvokeResponse {
    Extension(ExtensionResponse),
    Action(ExtensionActionResponse),
}

#[derive(Clone)]
pub(crate) struct MessagingExtension {
    store: CharacterStoreHandle,
    commands: Arc<CommandRegistry>,
}

impl MessagingExtension {
    pub(crate) fn new(store: CharacterStoreHandle) -> Self {
        Self::with_commands(store, CommandRegistry::default())
    }

    pub(crate) fn with_commands(store: CharacterStoreHandle, commands: CommandRegistry) -> Self {
        Self {
            store,
            commands: Arc::new(commands),
        }
    }

    /// Routes an invoke activity by name to its handler.
    pub(crate) async fn handle_invoke(
        &self,
        name: &str,
        value: Value,
    ) -> Result<InvokeResponse, ExtensionError> {
        match name {
            invoke_name::QUERY => {
                let query: ExtensionQuery =
                    serde_json::from_value(value).map_err(ExtensionError::MalformedQuery)?;
                Ok(InvokeResponse::Extension(self.handle_query(&query).await?))
            }
            invoke_name::SELECT_ITEM => Ok(InvokeResponse::Extension(
                self.handle_selection(value)?,
            )),
            invoke_name::SUBMIT_ACTION => {
                let action: ExtensionAction =
                    serde_json::from_value(value).map_err(ExtensionError::MalformedAction)?;
                Ok(InvokeResponse::Action(self.handle_action(action)?))
            }
            other => Err(ExtensionError::UnsupportedInvoke(other.to_string())),
        }
    }
}

/// Image list for a card. Empty image urls produce no image at all.
fn icon_images(url: &str) -> Vec<CardImage> {
    if url.is_empty() {
        return vec![];
    }
    vec![CardImage {
        url: url.to_string(),
        alt: Some(IMAGE_ALT.to_string()),
    }]
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::character_store::test::{handle_for, IRON_MAN_DOCUMENT, TEAM_DOCUMENT};

    #[tokio::test]
    async fn routes_each_invoke_name() {
        let extension = MessagingExtension::new(handle_for(IRON_MAN_DOCUMENT));

        let query = extension
            .handle_invoke(
                invoke_name::QUERY,
                json!({ "commandId": "searchQuery", "parameters": [{ "name": "queryText", "value": "iron" }] }),
            )
            .await
            .unwrap();
        assert!(matches!(query, InvokeResponse::Extension(ref r) if r.compose_extension.attachments.len() == 1));

        let select = extension
            .handle_invoke(
                invoke_name::SELECT_ITEM,
                json!(["Iron Man", "Robert Downey Jr.", "Tony Stark", "", "https://x/ironman"]),
            )
            .await
            .unwrap();
        assert!(matches!(select, InvokeResponse::Extension(_)));

        let action = extension
            .handle_invoke(
                invoke_name::SUBMIT_ACTION,
                json!({ "commandId": "CreateAvenger", "data": { "name": "Thor", "actor": "Chris Hemsworth" } }),
            )
            .await
            .unwrap();
        assert!(matches!(action, InvokeResponse::Action(_)));
    }

    #[tokio::test]
    async fn unknown_invoke_and_bad_values() {
        let extension = MessagingExtension::new(handle_for(TEAM_DOCUMENT));
        let err = extension
            .handle_invoke("composeExtension/fetchTask", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtensionError::UnsupportedInvoke(ref name) if name == "composeExtension/fetchTask"));

        let err = extension
            .handle_invoke(invoke_name::QUERY, json!({ "parameters": "iron" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtensionError::MalformedQuery(_)));

        let err = extension
            .handle_invoke(invoke_name::SUBMIT_ACTION, json!({ "data": {} }))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtensionError::MalformedAction(_)));
    }

    #[tokio::test]
    async fn broken_store_does_not_affect_other_invokes() {
        let extension = MessagingExtension::new(handle_for("{"));
        let err = extension
            .handle_query(&ExtensionQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtensionError::DataSource(_)));

        // selection and actions never touch the store
        assert!(extension
            .handle_selection(json!(["Thor", "Chris Hemsworth", "Thor Odinson", "", "https://x/thor"]))
            .is_ok());
        assert!(extension
            .handle_action(ExtensionAction {
                command_id: "CreateAvenger".to_string(),
                data: json!({ "name": "Thor", "actor": "Chris Hemsworth" }),
            })
            .is_ok());
    }

    #[test]
    fn images_only_for_non_empty_urls() {
        assert!(icon_images("").is_empty());
        assert_eq!(
            icon_images("https://x/thor.png"),
            vec![CardImage {
                url: "https://x/thor.png".to_string(),
                alt: Some("Icon".to_string()),
            }]
        );
    }
}
