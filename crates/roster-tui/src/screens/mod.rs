//! Screen implementations. Each screen is a top-level Component.

pub mod form;
pub mod list;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create one component per screen.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::List, Box::new(list::ListScreen::new())),
        (ScreenId::Form, Box::new(form::FormScreen::new())),
    ]
}
