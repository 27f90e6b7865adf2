use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::guard::{Access, View};
use crate::backend::{PublicUser, Role, Session, UserId, UserRecord, UserStatus};
use crate::i18n::Locale;

/// Request body for sign-in.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Request body for sign-up. `confirm_password` is checked when present.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub id: UserId,
}

/// Sign-in result. The only response that carries the bearer token.
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub session: Session,
}

/// Who is signed in, `null` when nobody is. Never includes the token.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: Option<SessionInfo>,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user: PublicUser,
}

impl From<Session> for SessionInfo {
    fn from(session: Session) -> Self {
        Self { user: session.user }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub status_label: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl MeResponse {
    pub fn new(user: UserRecord, locale: Locale) -> Self {
        Self {
            status_label: locale.user_status(user.status),
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            status: user.status,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub view: View,
    pub allowed: bool,
    pub redirect: Option<&'static str>,
}

impl AccessResponse {
    pub fn new(view: View, access: Access) -> Self {
        match access {
            Access::Allowed => Self {
                view,
                allowed: true,
                redirect: None,
            },
            Access::Redirect(to) => Self {
                view,
                allowed: false,
                redirect: Some(to),
            },
        }
    }
}
