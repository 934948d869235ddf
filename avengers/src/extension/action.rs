use std::collections::HashMap;

use avengers_api_types::{
    Attachment, Card, CardImage, CardKind, CreateCardInput, ExtensionAction,
    ExtensionActionResponse, ExtensionAttachment, ExtensionResult,
};
use serde_json::Value;
use tracing::{info, instrument};

use super::{ExtensionError, MessagingExtension};

/// Every created card uses this image, whatever the user entered.
pub(crate) const CREATE_CARD_IMAGE: &str = "https://res.cloudinary.com/teepublic/image/private/s--s0r6TuRK--/c_crop,x_10,y_10/c_fit,h_995/c_crop,g_north_west,h_1260,w_1008,x_-157,y_-192/co_rgb:0c3052,e_colorize,u_Misc:One%20Pixel%20Gray/c_scale,g_north_west,h_1260,w_1008/fl_layer_apply,g_north_west,x_-157,y_-192/bo_126px_solid_white/e_overlay,fl_layer_apply,h_1260,l_Misc:Art%20Print%20Bumpmap,w_1008/e_shadow,x_6,y_6/c_limit,h_1134,w_1134/c_lpad,g_center,h_1260,w_1260/b_rgb:eeeeee/c_limit,f_jpg,h_630,q_90,w_630/v1481201499/production/designs/923008_1.jpg";

/// A command declared in the app manifest that can be submitted from the compose box.
pub(crate) trait ExtensionCommand: Send + Sync {
    fn command_id(&self) -> &'static str;

    fn execute(&self, data: Value) -> Result<ExtensionAttachment, ExtensionError>;
}

pub(crate) struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn ExtensionCommand>>,
}

impl CommandRegistry {
    pub(crate) fn empty() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub(crate) fn register(&mut self, command: impl ExtensionCommand + 'static) {
        self.commands.insert(command.command_id(), Box::new(command));
    }

    fn get(&self, command_id: &str) -> Option<&dyn ExtensionCommand> {
        self.commands.get(command_id).map(|command| command.as_ref())
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(CreateAvenger);
        registry
    }
}

/// Builds a hero card from the create card form. Nothing is persisted.
pub(crate) struct CreateAvenger;

impl ExtensionCommand for CreateAvenger {
    fn command_id(&self) -> &'static str {
        "CreateAvenger"
    }

    fn execute(&self, data: Value) -> Result<ExtensionAttachment, ExtensionError> {
        let input: CreateCardInput =
            serde_json::from_value(data).map_err(|error| ExtensionError::MalformedCommandData {
                command_id: self.command_id().to_string(),
                error,
            })?;
        let card = Card {
            title: Some(input.name),
            subtitle: Some(input.actor),
            images: vec![CardImage {
                url: CREATE_CARD_IMAGE.to_string(),
                alt: None,
            }],
            ..Default::default()
        };
        Ok(ExtensionAttachment::new(CardKind::Hero, card.clone())
            .with_preview(Attachment::new(CardKind::Hero, card)))
    }
}

impl MessagingExtension {
    #[instrument(skip(self, action), fields(command_id = %action.command_id))]
    pub(crate) fn handle_action(
        &self,
        action: ExtensionAction,
    ) -> Result<ExtensionActionResponse, ExtensionError> {
        let command = self
            .commands
            .get(&action.command_id)
            .ok_or_else(|| ExtensionError::UnknownCommand(action.command_id.clone()))?;
        let attachment = command.execute(action.data)?;
        info!("Executed command {}", action.command_id);
        Ok(ExtensionResult::list(vec![attachment]).into())
    }
}
