use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::backend::{Page, Role, UserId, UserRecord, UserStatus};
use crate::i18n::Locale;

/// Row of the admin users table.
#[derive(Debug, Serialize)]
pub struct UserRow {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub status_label: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl UserRow {
    fn new(user: UserRecord, locale: Locale) -> Self {
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

pub fn localize_page(page: Page<UserRecord>, locale: Locale) -> Page<UserRow> {
    Page {
        items: page
            .items
            .into_iter()
            .map(|u| UserRow::new(u, locale))
            .collect(),
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages: page.total_pages,
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: UserStatus,
}
