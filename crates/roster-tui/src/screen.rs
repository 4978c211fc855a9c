//! Screen identifier enum.

use std::fmt;

use roster_core::ViewState;

/// The two screens, one per view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    List,
    Form,
}

impl ScreenId {
    /// The screen that presents a view state.
    pub fn for_view(state: &ViewState) -> Self {
        match state {
            ViewState::ListView => Self::List,
            ViewState::EditView(_) => Self::Form,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::List => "Employees",
            Self::Form => "Form",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use roster_core::EditTarget;

    use super::*;

    #[test]
    fn screen_follows_view_state() {
        assert_eq!(ScreenId::for_view(&ViewState::ListView), ScreenId::List);
        assert_eq!(
            ScreenId::for_view(&ViewState::EditView(EditTarget::draft())),
            ScreenId::Form
        );
    }
}
