use avengers_api_types::{
    Attachment, Card, CardAction, CardKind, CharacterRecord, ExtensionAttachment, ExtensionQuery,
    ExtensionResponse, ExtensionResult, PreviewPayload,
};
use tracing::{debug, instrument};

use super::{icon_images, ExtensionError, MessagingExtension};

impl MessagingExtension {
    /// Searches character names and returns one selectable preview per match, in store order.
    #[instrument(skip(self, query), fields(text = query.search_text()))]
    pub(crate) async fn handle_query(
        &self,
        query: &ExtensionQuery,
    ) -> Result<ExtensionResponse, ExtensionError> {
        let store = self.store.get().await?;
        let attachments: Vec<_> = store
            .search(query.search_text())
            .map(search_result)
            .collect();
        debug!("{} of {} characters matched", attachments.len(), store.len());
        Ok(ExtensionResult::list(attachments).into())
    }
}

/// The full card only carries the name. The preview carries the whole record as its tap value so
/// selection doesn't need to look anything up.
fn search_result(record: &CharacterRecord) -> ExtensionAttachment {
    let payload = PreviewPayload::from(record);
    // PreviewPayload is plain strings, serializing it can't fail
    let tap = serde_json::to_value(&payload).unwrap_or_default();
    let preview = Card {
        title: Some(record.name.clone()),
        images: icon_images(&record.image_url),
        tap: Some(CardAction::invoke(tap)),
        ..Default::default()
    };
    ExtensionAttachment::new(
        CardKind::Hero,
        Card {
            title: Some(record.name.clone()),
            ..Default::default()
        },
    )
    .with_preview(Attachment::new(CardKind::Thumbnail, preview))
}

#[cfg(test)]
mod test {
    use avengers_api_types::{
        card::{ActionType, HERO_CARD_CONTENT_TYPE, THUMBNAIL_CARD_CONTENT_TYPE},
        invoke::QueryParameter,
    };
    use serde_json::json;

    use super::*;
    use crate::character_store::test::{handle_for, IRON_MAN_DOCUMENT, TEAM_DOCUMENT};

    fn text_query(text: &str) -> ExtensionQuery {
        ExtensionQuery {
            command_id: Some("searchQuery".to_string()),
            parameters: vec![QueryParameter {
                name: "queryText".to_string(),
                value: Some(json!(text)),
            }],
        }
    }

    fn titles(response: &ExtensionResponse) -> Vec<String> {
        response
            .compose_extension
            .attachments
            .iter()
            .map(|a| a.content.title.clone().unwrap_or_default())
            .collect()
    }

    #[tokio::test]
    async fn single_match_without_image() {
        let extension = MessagingExtension::new(handle_for(IRON_MAN_DOCUMENT));
        let response = extension.handle_query(&text_query("iron")).await.unwrap();
        assert_eq!(titles(&response), ["Iron Man"]);

        let attachment = &response.compose_extension.attachments[0];
        assert_eq!(attachment.content_type, HERO_CARD_CONTENT_TYPE);
        let preview = attachment.preview.as_ref().unwrap();
        assert_eq!(preview.content_type, THUMBNAIL_CARD_CONTENT_TYPE);
        assert_eq!(preview.content.title.as_deref(), Some("Iron Man"));
        assert!(preview.content.images.is_empty());

        let tap = preview.content.tap.as_ref().unwrap();
        assert_eq!(tap.action_type, ActionType::Invoke);
        assert_eq!(
            tap.value,
            json!({
                "Item1": "Iron Man",
                "Item2": "Robert Downey Jr.",
                "Item3": "Tony Stark",
                "Item4": "",
                "Item5": "https://x/ironman"
            })
        );
    }

    #[tokio::test]
    async fn match_ignores_case() {
        let extension = MessagingExtension::new(handle_for(IRON_MAN_DOCUMENT));
        let lower = extension.handle_query(&text_query("iron")).await.unwrap();
        let upper = extension.handle_query(&text_query("IRON")).await.unwrap();
        assert_eq!(lower, upper);
    }

    #[tokio::test]
    async fn no_match_is_empty_not_error() {
        let extension = MessagingExtension::new(handle_for(IRON_MAN_DOCUMENT));
        let response = extension.handle_query(&text_query("hulk")).await.unwrap();
        assert!(response.compose_extension.attachments.is_empty());
    }

    #[tokio::test]
    async fn empty_text_returns_everything_in_order() {
        let extension = MessagingExtension::new(handle_for(TEAM_DOCUMENT));
        let expected = [
            "Iron Man",
            "Captain America",
            "Iron Monger",
            "Thor",
            "Iron Man",
        ];
        let response = extension.handle_query(&text_query("")).await.unwrap();
        assert_eq!(titles(&response), expected);

        // no parameters at all behaves the same as empty text
        let response = extension
            .handle_query(&ExtensionQuery::default())
            .await
            .unwrap();
        assert_eq!(titles(&response), expected);
    }

    #[tokio::test]
    async fn only_the_first_parameter_is_consulted() {
        let extension = MessagingExtension::new(handle_for(TEAM_DOCUMENT));
        let query = ExtensionQuery {
            command_id: None,
            parameters: vec![
                QueryParameter {
                    name: "initialRun".to_string(),
                    value: Some(json!("true")),
                },
                QueryParameter {
                    name: "queryText".to_string(),
                    value: Some(json!("thor")),
                },
            ],
        };
        let response = extension.handle_query(&query).await.unwrap();
        assert_eq!(response.compose_extension.attachments.len(), 5);
    }

    #[tokio::test]
    async fn image_attached_iff_present() {
        let extension = MessagingExtension::new(handle_for(TEAM_DOCUMENT));
        let response = extension.handle_query(&text_query("")).await.unwrap();
        let image_counts: Vec<_> = response
            .compose_extension
            .attachments
            .iter()
            .map(|a| a.preview.as_ref().unwrap().content.images.len())
            .collect();
        assert_eq!(image_counts, [1, 0, 0, 1, 0]);
    }

    #[tokio::test]
    async fn repeated_queries_are_identical() {
        let extension = MessagingExtension::new(handle_for(TEAM_DOCUMENT));
        let first = extension.handle_query(&text_query("i")).await.unwrap();
        let second = extension.handle_query(&text_query("i")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            titles(&first),
            ["Iron Man", "Captain America", "Iron Monger", "Iron Man"]
        );
    }
}
