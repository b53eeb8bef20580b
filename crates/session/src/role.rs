use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Superadmin,
    Supervisor,
    Vendedor,
    Bodeguero,
}

pub type Roles = BTreeSet<Role>;

/// `superadmin` passes every check, otherwise any overlap with `required` does.
pub fn has_role(roles: &Roles, required: impl IntoIterator<Item = Role>) -> bool {
    if roles.contains(&Role::Superadmin) {
        return true;
    }

    required.into_iter().any(|role| roles.contains(&role))
}

/// Maps raw role names coming from the API onto the closed [`Role`] set.
/// Unknown names are dropped.
pub fn normalize_roles(names: impl IntoIterator<Item = impl AsRef<str>>) -> Roles {
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref().trim();
            match name.parse::<Role>() {
                Ok(role) => Some(role),
                Err(_) => {
                    tracing::warn!(role = name, "ignoring unknown role");
                    None
                }
            }
        })
        .collect()
}
