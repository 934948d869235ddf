pub mod card;
pub mod character;
pub mod invoke;
pub mod response;
pub mod result;

pub use card::{Attachment, Card, CardAction, CardImage, CardKind, ExtensionAttachment};
pub use character::{CharacterDocument, CharacterRecord};
pub use invoke::{Activity, CreateCardInput, ExtensionAction, ExtensionQuery, PreviewPayload};
pub use response::{ExtensionActionResponse, ExtensionResponse, ExtensionResult};
