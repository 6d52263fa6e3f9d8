//! Simulated authentication: demo users, roles and module permissions.
//!
//! There is no credential check. Logging in with a known demo email (any
//! password) or picking a role selects the matching demo user, and that user
//! is persisted in the substrate under [`AUTH_USER_KEY`] so the session
//! survives a restart.

use crate::collection::CollectionStore;
use crate::error::Result;
use crate::keys::AUTH_USER_KEY;
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dashboard sections guarded by role permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Transport,
    Fleet,
    Accounting,
    Hr,
    Reports,
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Module::Transport => "transport",
            Module::Fleet => "fleet",
            Module::Accounting => "accounting",
            Module::Hr => "hr",
            Module::Reports => "reports",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Dispecer,
    Hr,
    Contabil,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Admin,
        UserRole::Dispecer,
        UserRole::Hr,
        UserRole::Contabil,
    ];

    /// Label shown on the role picker.
    pub fn label(self) -> &'static str {
        match self {
            UserRole::Admin => "Administrator",
            UserRole::Dispecer => "Dispecer",
            UserRole::Hr => "Resurse Umane",
            UserRole::Contabil => "Contabil",
        }
    }

    /// Modules this role may open.
    pub fn permissions(self) -> &'static [Module] {
        match self {
            UserRole::Admin => &[
                Module::Transport,
                Module::Fleet,
                Module::Accounting,
                Module::Hr,
                Module::Reports,
            ],
            UserRole::Dispecer => &[Module::Transport, Module::Reports],
            UserRole::Hr => &[Module::Hr, Module::Reports],
            UserRole::Contabil => &[Module::Accounting, Module::Reports],
        }
    }

    pub fn can_access(self, module: Module) -> bool {
        self.permissions().contains(&module)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl AuthUser {
    pub fn has_access(&self, module: Module) -> bool {
        self.role.can_access(module)
    }
}

/// The demo account for `role`.
pub fn demo_user(role: UserRole) -> AuthUser {
    let (id, name, email, avatar) = match role {
        UserRole::Admin => (
            "1",
            "Admin Transmarin",
            "admin@transmarin.ro",
            "/avatars/admin.jpg",
        ),
        UserRole::Dispecer => (
            "2",
            "Ion Popescu",
            "dispecer@transmarin.ro",
            "/avatars/dispecer.jpg",
        ),
        UserRole::Hr => ("3", "Maria Ionescu", "hr@transmarin.ro", "/avatars/hr.jpg"),
        UserRole::Contabil => (
            "4",
            "Elena Dumitrescu",
            "contabil@transmarin.ro",
            "/avatars/contabil.jpg",
        ),
    };

    AuthUser {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        avatar: Some(avatar.to_string()),
    }
}

/// The four demo accounts, one per role.
pub fn mock_users() -> Vec<AuthUser> {
    UserRole::ALL.into_iter().map(demo_user).collect()
}

/// Login state persisted in a collection store's substrate.
pub struct Session<'a, S> {
    store: &'a mut CollectionStore<S>,
}

impl<'a, S: Storage> Session<'a, S> {
    pub fn new(store: &'a mut CollectionStore<S>) -> Self {
        Self { store }
    }

    /// Log in as the demo user with `email`. Any password is accepted.
    ///
    /// Returns `Ok(None)` for an unknown email; the current session is left
    /// as it was.
    pub fn login(&mut self, email: &str, _password: &str) -> Result<Option<AuthUser>> {
        let Some(user) = mock_users().into_iter().find(|u| u.email == email) else {
            tracing::info!(email, "login rejected: unknown account");
            return Ok(None);
        };
        self.store.set_value(AUTH_USER_KEY, &user)?;
        tracing::info!(email, role = ?user.role, "logged in");
        Ok(Some(user))
    }

    /// Log in as the demo user holding `role`.
    pub fn login_as(&mut self, role: UserRole) -> Result<AuthUser> {
        let user = demo_user(role);
        self.store.set_value(AUTH_USER_KEY, &user)?;
        tracing::info!(role = ?role, "logged in by role");
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove_key(AUTH_USER_KEY)
    }

    /// The persisted user, if any. A corrupt session reads as logged out.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.store.get_value(AUTH_USER_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Whether the logged-in user may open `module`. Logged out means no.
    pub fn has_access(&self, module: Module) -> bool {
        self.current_user()
            .is_some_and(|user| user.has_access(module))
    }
}
