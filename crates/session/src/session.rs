use serde::{Deserialize, Serialize};

use crate::{Role, Roles};

/// Real principal kept aside while another identity is being viewed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub email: String,
    pub roles: Roles,
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub roles: Roles,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impersonator: Option<SessionSnapshot>,
}

impl Session {
    pub fn new(email: impl Into<String>, roles: Roles, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            roles,
            token: token.into(),
            impersonator: None,
        }
    }

    pub fn has_role(&self, required: impl IntoIterator<Item = Role>) -> bool {
        crate::has_role(&self.roles, required)
    }

    pub fn is_impersonating(&self) -> bool {
        self.impersonator.is_some()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            email: self.email.to_owned(),
            roles: self.roles.clone(),
            token: self.token.to_owned(),
        }
    }
}

impl From<SessionSnapshot> for Session {
    fn from(value: SessionSnapshot) -> Self {
        Self::new(value.email, value.roles, value.token)
    }
}
