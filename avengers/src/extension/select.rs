use avengers_api_types::{
    Card, CardAction, CardKind, ExtensionAttachment, ExtensionResponse, ExtensionResult,
    PreviewPayload,
};
use serde_json::Value;
use tracing::instrument;

use super::{icon_images, ExtensionError, MessagingExtension};

const PROFILE_BUTTON_TITLE: &str = "Marvel Profile";

impl MessagingExtension {
    /// Expands a tapped preview into the detail card. Works purely from the echoed payload.
    #[instrument(skip(self))]
    pub(crate) fn handle_selection(&self, payload: Value) -> Result<ExtensionResponse, ExtensionError> {
        let payload: PreviewPayload =
            serde_json::from_value(payload).map_err(ExtensionError::MalformedSelection)?;
        Ok(ExtensionResult::list(vec![character_detail(&payload)]).into())
    }
}

fn character_detail(payload: &PreviewPayload) -> ExtensionAttachment {
    ExtensionAttachment::new(
        CardKind::Thumbnail,
        Card {
            title: Some(payload.name.clone()),
            subtitle: Some(format!("{}, {}", payload.actor, payload.real_name)),
            images: icon_images(&payload.image_url),
            buttons: vec![CardAction::open_url(
                PROFILE_BUTTON_TITLE,
                payload.profile_link.as_str(),
            )],
            tap: None,
        },
    )
}
