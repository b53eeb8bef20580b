use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::{Role, Roles, Session};

/// Top-level screens the routing layer guards.
#[derive(EnumString, VariantArray, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum View {
    Login,
    Dashboard,
    Leads,
    Clients,
    Quotes,
    Calendar,
    Terrain,
    Users,
    Bodega,
}

impl View {
    pub fn path(self) -> &'static str {
        match self {
            View::Login => "/login",
            View::Dashboard => "/",
            View::Leads => "/leads",
            View::Clients => "/clients",
            View::Quotes => "/quotes",
            View::Calendar => "/calendar",
            View::Terrain => "/terrain",
            View::Users => "/users",
            View::Bodega => "/bodega",
        }
    }

    /// `None` means any signed-in principal.
    pub fn required_roles(self) -> Option<&'static [Role]> {
        match self {
            View::Login | View::Dashboard => None,
            View::Leads | View::Clients | View::Calendar | View::Terrain => {
                Some(&[Role::Admin, Role::Supervisor, Role::Vendedor])
            }
            View::Quotes => Some(&[
                Role::Admin,
                Role::Supervisor,
                Role::Vendedor,
                Role::Bodeguero,
            ]),
            View::Users => Some(&[Role::Admin]),
            View::Bodega => Some(&[Role::Admin, Role::Bodeguero]),
        }
    }

    pub fn is_allowed(self, session: Option<&Session>) -> bool {
        if self == View::Login {
            return true;
        }

        let Some(session) = session else {
            return false;
        };

        match self.required_roles() {
            Some(required) => session.has_role(required.iter().copied()),
            None => true,
        }
    }
}

#[derive(EnumString, VariantArray, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum DashboardKind {
    Admin,
    Supervisor,
    Bodega,
}

impl DashboardKind {
    /// Picks the most privileged dashboard the role set grants.
    pub fn for_roles(roles: &Roles) -> Option<Self> {
        if roles.contains(&Role::Superadmin) || roles.contains(&Role::Admin) {
            return Some(DashboardKind::Admin);
        }

        if roles.contains(&Role::Supervisor) {
            return Some(DashboardKind::Supervisor);
        }

        if roles.contains(&Role::Bodeguero) {
            return Some(DashboardKind::Bodega);
        }

        None
    }

    pub fn path(self) -> String {
        format!("/dashboard/{self}")
    }
}
