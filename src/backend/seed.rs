use rand::{seq::SliceRandom, Rng};
use time::{Duration, OffsetDateTime};

use super::models::{Role, UserId, UserRecord, UserStatus};

pub const ADMIN_ID: &str = "admin-user-id";
pub const ADMIN_NAME: &str = "Admin GERN";
pub const ADMIN_EMAIL: &str = "admin@gern.com";
/// Every seeded account signs in with this.
pub const SEED_PASSWORD: &str = "password123";

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carla", "Diego", "Elisa", "Felipe", "Gabriela", "Hugo", "Inês", "João",
    "Larissa", "Marcos", "Natália", "Otávio", "Paula", "Rafael", "Sofia", "Tiago", "Vera",
    "William",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Barbosa", "Cardoso", "Costa", "Ferreira", "Gomes", "Lima", "Martins",
    "Oliveira", "Pereira", "Ribeiro", "Rocha", "Santos", "Silva", "Souza",
];

const DOMAINS: &[&str] = &["gmail.com", "outlook.com", "yahoo.com", "hotmail.com"];

const ONE_YEAR_SECS: i64 = 365 * 24 * 60 * 60;

/// The predictable admin plus `extra` random users.
///
/// All records share `password_hash`. Random users get a lowercase email that
/// embeds their index, so emails never collide.
pub fn seed_users<R: Rng>(
    rng: &mut R,
    extra: usize,
    password_hash: &str,
    now: OffsetDateTime,
) -> Vec<UserRecord> {
    let mut users = Vec::with_capacity(extra + 1);
    users.push(UserRecord {
        id: UserId::from(ADMIN_ID),
        full_name: ADMIN_NAME.into(),
        email: ADMIN_EMAIL.into(),
        role: Role::Admin,
        status: UserStatus::Active,
        created_at: now,
        password_hash: password_hash.into(),
    });

    for n in 1..=extra {
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ana");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("Silva");
        let domain = DOMAINS.choose(rng).copied().unwrap_or("gmail.com");
        let status = if rng.gen_bool(0.5) {
            UserStatus::Active
        } else {
            UserStatus::Blocked
        };
        let age = Duration::seconds(rng.gen_range(1..ONE_YEAR_SECS));
        users.push(UserRecord {
            id: UserId::random(),
            full_name: format!("{first} {last}"),
            email: format!("{first}.{last}{n}@{domain}").to_lowercase(),
            role: Role::User,
            status,
            created_at: now - age,
            password_hash: password_hash.into(),
        });
    }
    users
}
