use crate::config::Config;
use crate::entities::LoggedInUser;
use crate::utils::{Client, ClientError};

/// Read-only application context handed to every screen and widget.
#[derive(Clone, Debug, Default)]
pub struct State {
    pub config: Config,
    pub user: Option<LoggedInUser>,
}

impl State {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn client(&self) -> Result<Client, ClientError> {
        self.config.client()
    }
}
