use serde::{Deserialize, Serialize};

use super::models::UserRecord;

pub const DEFAULT_PER_PAGE: usize = 10;

/// Filter and page request for the admin user table.
#[derive(Debug, Clone, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn first_page() -> usize {
    1
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl UserQuery {
    fn matches(&self, needle: &str, user: &UserRecord) -> bool {
        needle.is_empty()
            || user.full_name.to_lowercase().contains(needle)
            || user.email.contains(needle)
    }

    /// Filter an already ordered list and cut out the requested page.
    ///
    /// `page` is 1-based and clamped into `1..=total_pages`; an empty result
    /// still reports one page.
    pub fn apply(&self, users: Vec<UserRecord>) -> Page<UserRecord> {
        let needle = self.search.trim().to_lowercase();
        let per_page = self.per_page.max(1);
        let filtered: Vec<UserRecord> = users
            .into_iter()
            .filter(|u| self.matches(&needle, u))
            .collect();

        let total = filtered.len();
        let total_pages = total.div_ceil(per_page).max(1);
        let page = self.page.clamp(1, total_pages);
        let items = filtered
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();

        Page {
            items,
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::backend::models::{Role, UserId, UserStatus};

    fn user(n: usize, name: &str, email: &str) -> UserRecord {
        UserRecord {
            id: UserId(format!("u{n}")),
            full_name: name.into(),
            email: email.into(),
            role: Role::User,
            status: UserStatus::Active,
            created_at: OffsetDateTime::UNIX_EPOCH,
            password_hash: String::new(),
        }
    }

    fn many(n: usize) -> Vec<UserRecord> {
        (0..n)
            .map(|i| user(i, &format!("User {i}"), &format!("user{i}@x.com")))
            .collect()
    }

    #[test]
    fn search_matches_name_or_email_ignoring_case() {
        let users = vec![
            user(1, "Ana Lima", "ana@x.com"),
            user(2, "Bruno Costa", "bcosta@x.com"),
            user(3, "Carla", "carla@lima.org"),
        ];
        let q = UserQuery {
            search: "LIMA".into(),
            ..Default::default()
        };
        let page = q.apply(users);
        let ids: Vec<_> = page.items.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u3"]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn pages_are_cut_in_order() {
        let q = UserQuery {
            page: 3,
            ..Default::default()
        };
        let page = q.apply(many(25));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].id.as_str(), "u20");
    }

    #[test]
    fn page_number_is_clamped() {
        let too_far = UserQuery {
            page: 99,
            ..Default::default()
        };
        assert_eq!(too_far.apply(many(12)).page, 2);

        let zero = UserQuery {
            page: 0,
            ..Default::default()
        };
        assert_eq!(zero.apply(many(12)).page, 1);
    }

    #[test]
    fn empty_result_reports_one_page() {
        let q = UserQuery {
            search: "nobody".into(),
            ..Default::default()
        };
        let page = q.apply(many(5));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }
}
