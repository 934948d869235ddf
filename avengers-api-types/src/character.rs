use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the character dataset.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct CharacterRecord {
    pub name: String,
    pub actor: String,
    #[serde(rename = "realname")]
    pub real_name: String,
    #[serde(rename = "image", default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(rename = "link")]
    pub profile_link: String,
}

/// Top level shape of the data file: `{ "characters": [...] }`
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CharacterDocument {
    pub characters: Vec<CharacterRecord>,
}

pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_dataset_keys() {
        let record: CharacterRecord = serde_json::from_str(
            r#"{"name":"Iron Man","actor":"Robert Downey Jr.","realname":"Tony Stark","image":"https://x/i.png","link":"https://x/ironman"}"#,
        )
        .unwrap();
        assert_eq!(record.real_name, "Tony Stark");
        assert_eq!(record.image_url, "https://x/i.png");
        assert_eq!(record.profile_link, "https://x/ironman");
    }

    #[test]
    fn missing_or_null_image_is_empty() {
        let missing: CharacterRecord = serde_json::from_str(
            r#"{"name":"Hulk","actor":"Mark Ruffalo","realname":"Bruce Banner","link":"l"}"#,
        )
        .unwrap();
        assert!(missing.image_url.is_empty());
        let null: CharacterRecord = serde_json::from_str(
            r#"{"name":"Hulk","actor":"Mark Ruffalo","realname":"Bruce Banner","image":null,"link":"l"}"#,
        )
        .unwrap();
        assert!(null.image_url.is_empty());
    }

    #[test]
    fn missing_link_is_rejected() {
        let result = serde_json::from_str::<CharacterRecord>(
            r#"{"name":"Hulk","actor":"Mark Ruffalo","realname":"Bruce Banner"}"#,
        );
        assert!(result.is_err());
    }
}
