pub mod prompt;

pub use prompt::{
    ConfirmationCopy, LoggedIn, PromptView, ReloadWatch, SavePromptModel, SaveStatus,
    SubmitButtonState,
};
