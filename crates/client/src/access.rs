// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Role gate for protected screens.

use tracing::debug;

use crate::session::SessionStore;

/// Outcome of a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Not signed in, or the token carries no usable role.
    SignIn,
    /// Signed in but the role is not allowed here.
    Home,
}

/// Decide whether the current session may open a screen restricted to
/// `allowed_roles`. An empty list admits any signed-in user; a role
/// containing `ADMIN` is admitted everywhere.
pub fn check_access(session: &SessionStore, allowed_roles: &[&str]) -> Access {
    if !session.is_authenticated() {
        return Access::SignIn;
    }
    if allowed_roles.is_empty() {
        return Access::Granted;
    }

    let role = match session.claims() {
        Ok(Some(claims)) => claims.role(),
        Ok(None) => None,
        Err(e) => {
            debug!(err = %e, "claims unreadable during access check");
            None
        }
    };
    let Some(role) = role else {
        return Access::SignIn;
    };

    if allowed_roles.contains(&role.as_str()) || role.to_uppercase().contains("ADMIN") {
        Access::Granted
    } else {
        debug!(role = %role, ?allowed_roles, "role not permitted");
        Access::Home
    }
}

#[cfg(test)]
#[path = "access_tests.rs"]
mod tests;
