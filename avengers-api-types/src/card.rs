use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const HERO_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.hero";
pub const THUMBNAIL_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.thumbnail";

/// Hero and thumbnail cards share a schema and only differ in how the client lays them out.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardKind {
    Hero,
    Thumbnail,
}

impl CardKind {
    pub fn content_type(&self) -> &'static str {
        match self {
            CardKind::Hero => HERO_CARD_CONTENT_TYPE,
            CardKind::Thumbnail => THUMBNAIL_CARD_CONTENT_TYPE,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ActionType {
    #[serde(rename = "invoke")]
    Invoke,
    #[serde(rename = "openUrl")]
    OpenUrl,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CardAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub value: Value,
}

impl CardAction {
    pub fn invoke(value: Value) -> Self {
        Self {
            action_type: ActionType::Invoke,
            title: None,
            value,
        }
    }

    pub fn open_url(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            action_type: ActionType::OpenUrl,
            title: Some(title.into()),
            value: Value::String(url.into()),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CardImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<CardImage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<CardAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap: Option<CardAction>,
}

/// A single renderable unit: a content type tag plus the card itself.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    pub content: Card,
}

impl Attachment {
    pub fn new(kind: CardKind, content: Card) -> Self {
        Self {
            content_type: kind.content_type().to_string(),
            content,
        }
    }
}

/// Attachment in a messaging extension result. The preview is what the client shows in the result list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionAttachment {
    pub content_type: String,
    pub content: Card,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Attachment>,
}

impl ExtensionAttachment {
    pub fn new(kind: CardKind, content: Card) -> Self {
        Self {
            content_type: kind.content_type().to_string(),
            content,
            preview: None,
        }
    }

    pub fn with_preview(mut self, preview: Attachment) -> Self {
        self.preview = Some(preview);
        self
    }
}
