mod interaction;
pub use interaction::{
    Interaction, InteractionType, MessageComponentInteraction, MessageComponentInteractionData,
    ModalInteractionActionRowData, ModalInteractionComponentData, ModalInteractionData,
    ModalSubmitInteraction,
};

mod interaction_response;
pub use interaction_response::{
    InteractionResponse, InteractionResponseType, MessageResponse, ModalResponse,
    ModalResponseData,
};

mod interaction_callback_data;
pub use interaction_callback_data::{InteractionCallbackData, MessageFlags};

mod component;
pub use component::{Component, ComponentType};

mod action_row;
pub use action_row::ActionRow;

mod button;
pub use button::{Button, ButtonStyle};

mod select_menu;
pub use select_menu::{SelectMenu, SelectOption};

mod input_text;
pub use input_text::{InputText, TextStyleType};
