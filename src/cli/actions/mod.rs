pub mod users;

use crate::models::{NewUser, User};

#[derive(Debug)]
pub enum Action {
    Get { name: String },
    List,
    Create { user: NewUser },
    Update { name: String, changes: UserChanges },
    Delete { name: String },
    Unlock { name: String },
}

/// Fields to change on an existing user; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub admin: Option<bool>,
    pub profile_updatable: Option<bool>,
    pub disable_ui_access: Option<bool>,
    pub internal_password_disabled: Option<bool>,
    pub groups: Option<Vec<String>>,
}

impl UserChanges {
    pub fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = Some(email.clone());
        }
        if let Some(admin) = self.admin {
            user.profile.admin = admin;
        }
        if let Some(profile_updatable) = self.profile_updatable {
            user.profile.profile_updatable = profile_updatable;
        }
        if let Some(disable_ui_access) = self.disable_ui_access {
            user.profile.disable_ui_access = disable_ui_access;
        }
        if let Some(internal_password_disabled) = self.internal_password_disabled {
            user.profile.internal_password_disabled = internal_password_disabled;
        }
        if let Some(groups) = &self.groups {
            user.profile.groups = Some(groups.clone());
        }
    }
}
