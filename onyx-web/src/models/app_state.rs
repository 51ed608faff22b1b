use shared::models::UserProfile;
use yewdux::Store;

use crate::session::ViewState;

/// The single injected application state, constructed once per page load.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct AppState {
    /// Which of the mutually exclusive views the page renders; `None` while
    /// the boot status check is still in flight.
    pub view: Option<ViewState>,
    /// Profile of the signed-in visitor, when there is one.
    pub user: Option<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_is_debug_printable() {
        let state = AppState::default();
        assert!(format!("{state:?}").contains("AppState"));
    }
}
