//! Which protected view a session may open.

use std::str::FromStr;

use serde::Serialize;

use crate::backend::{Role, Session};
use crate::error::InvalidInput;

pub const ENTRY_PAGE: &str = "/";
pub const DASHBOARD_PAGE: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Dashboard,
    Admin,
}

impl FromStr for View {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(View::Dashboard),
            "admin" => Ok(View::Admin),
            other => Err(InvalidInput::UnknownView(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Redirect(&'static str),
}

/// Derive access from the current session and its role.
///
/// No session sends the caller to the entry page; a non-admin asking for the
/// admin view lands on the dashboard instead.
pub fn check(session: Option<&Session>, role: Option<Role>, view: View) -> Access {
    if session.is_none() {
        return Access::Redirect(ENTRY_PAGE);
    }
    match view {
        View::Dashboard => Access::Allowed,
        View::Admin => match role {
            Some(Role::Admin) => Access::Allowed,
            Some(Role::User) | None => Access::Redirect(DASHBOARD_PAGE),
        },
    }
}
