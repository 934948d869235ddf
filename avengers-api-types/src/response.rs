use serde::{Deserialize, Serialize};

use crate::card::ExtensionAttachment;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ResultType {
    #[default]
    Result,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum AttachmentLayout {
    #[default]
    List,
}

/// `{ type, attachmentLayout, attachments }`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionResult {
    #[serde(rename = "type")]
    pub result_type: ResultType,
    pub attachment_layout: AttachmentLayout,
    pub attachments: Vec<ExtensionAttachment>,
}

impl ExtensionResult {
    pub fn list(attachments: Vec<ExtensionAttachment>) -> Self {
        Self {
            result_type: ResultType::Result,
            attachment_layout: AttachmentLayout::List,
            attachments,
        }
    }
}

/// Response to query and select item invokes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionResponse {
    pub compose_extension: ExtensionResult,
}

/// Response to submit action invokes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionActionResponse {
    pub compose_extension: ExtensionResult,
}

impl From<ExtensionResult> for ExtensionResponse {
    fn from(compose_extension: ExtensionResult) -> Self {
        Self { compose_extension }
    }
}

impl From<ExtensionResult> for ExtensionActionResponse {
    fn from(compose_extension: ExtensionResult) -> Self {
        Self { compose_extension }
    }
}
