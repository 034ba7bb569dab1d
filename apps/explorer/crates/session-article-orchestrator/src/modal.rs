use serde::Serialize;

/// Which auth modal is open. At most one can be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalVisibility {
    #[default]
    None,
    Login,
    Register,
}

impl ModalVisibility {
    pub fn is_login_open(&self) -> bool {
        matches!(self, ModalVisibility::Login)
    }

    pub fn is_register_open(&self) -> bool {
        matches!(self, ModalVisibility::Register)
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ModalVisibility::None)
    }
}
