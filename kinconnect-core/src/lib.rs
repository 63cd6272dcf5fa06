pub mod choice_field;
pub mod config;
pub mod error;
pub mod invitation;
pub mod options;

pub use choice_field::{
    allergy_select, medical_condition_select, ChoiceField, DropdownState, FieldEvent, FieldView,
    Response,
};
pub use config::{KinConfig, OptionsConfig, UiConfig};
pub use error::{KinError, Result};
pub use invitation::{
    Invitation, InvitationDraft, InvitationSender, InviteField, LoggingSender, PatientInvitation,
};
pub use options::{OptionKind, OptionSet};
