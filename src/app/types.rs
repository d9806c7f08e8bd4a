//! Type definitions for the App module.

use crate::state::Decision;

/// Which control has keyboard focus outside the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    SubmitButton,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::SubmitButton,
            Focus::SubmitButton => Focus::Input,
        }
    }
}

/// Selected button in the confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogButton {
    Approve,
    #[default]
    Deny,
}

impl DialogButton {
    pub fn toggle(self) -> Self {
        match self {
            DialogButton::Approve => DialogButton::Deny,
            DialogButton::Deny => DialogButton::Approve,
        }
    }

    pub fn decision(self) -> Decision {
        match self {
            DialogButton::Approve => Decision::Approve,
            DialogButton::Deny => Decision::Deny,
        }
    }
}
