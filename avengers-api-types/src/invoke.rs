use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::character::{null_as_empty, CharacterRecord};

pub const QUERY_TEXT_PARAMETER: &str = "queryText";

/// Name of an inbound invoke activity
pub mod invoke_name {
    pub const QUERY: &str = "composeExtension/query";
    pub const SELECT_ITEM: &str = "composeExtension/selectItem";
    pub const SUBMIT_ACTION: &str = "composeExtension/submitAction";
}

/// The subset of an inbound activity that the extension looks at.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl Activity {
    pub fn is_invoke(&self) -> bool {
        self.activity_type == "invoke"
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct QueryParameter {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionQuery {
    #[serde(default)]
    pub command_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<QueryParameter>,
}

impl ExtensionQuery {
    /// Search text comes from the first parameter only, and only when it is named `queryText`.
    /// Values that are not strings read as empty.
    pub fn search_text(&self) -> &str {
        match self.parameters.first() {
            Some(param) if param.name == QUERY_TEXT_PARAMETER => param
                .value
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or_default(),
            _ => "",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionAction {
    pub command_id: String,
    #[serde(default)]
    pub data: Value,
}

/// The tuple echoed back by the client when a preview card is tapped.
///
/// On the wire this is an object keyed `Item1` through `Item5`; a plain five element array is also accepted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct PreviewPayload {
    #[serde(rename = "Item1")]
    pub name: String,
    #[serde(rename = "Item2")]
    pub actor: String,
    #[serde(rename = "Item3")]
    pub real_name: String,
    #[serde(rename = "Item4", default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(rename = "Item5")]
    pub profile_link: String,
}

impl From<&CharacterRecord> for PreviewPayload {
    fn from(record: &CharacterRecord) -> Self {
        Self {
            name: record.name.clone(),
            actor: record.actor.clone(),
            real_name: record.real_name.clone(),
            image_url: record.image_url.clone(),
            profile_link: record.profile_link.clone(),
        }
    }
}

/// Form fields submitted with the create card command
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct CreateCardInput {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub actor: String,
    #[serde(rename = "image", default, deserialize_with = "null_as_empty")]
    pub image_url: String,
}
