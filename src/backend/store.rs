use std::time::Duration;

use time::OffsetDateTime;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::models::{Role, Session, UserId, UserRecord, UserStatus};
use super::query::{Page, UserQuery};
use super::seed::{seed_users, SEED_PASSWORD};
use crate::auth::password::{hash_password, is_strong_enough, verify_password};
use crate::auth::validation::normalize_email;
use crate::config::LatencyConfig;
use crate::error::{ApiError, ApiResult};

/// In-memory stand-in for the identity and user-management API.
///
/// Owns the user list and the single process-wide session. Every public
/// operation sleeps for its configured latency before touching state.
pub struct MockBackend {
    users: RwLock<Vec<UserRecord>>,
    session: Mutex<Option<Session>>,
    latency: LatencyConfig,
}

impl MockBackend {
    pub fn new(users: Vec<UserRecord>, latency: LatencyConfig) -> Self {
        Self {
            users: RwLock::new(users),
            session: Mutex::new(None),
            latency,
        }
    }

    /// Store holding the admin plus `extra` random users.
    pub fn seeded(extra: usize, latency: LatencyConfig) -> anyhow::Result<Self> {
        let hash = hash_password(SEED_PASSWORD)?;
        let users = seed_users(
            &mut rand::thread_rng(),
            extra,
            &hash,
            OffsetDateTime::now_utc(),
        );
        info!(count = users.len(), "seeded mock users");
        Ok(Self::new(users, latency))
    }

    async fn pause(&self, d: Duration) {
        if !d.is_zero() {
            tokio::time::sleep(d).await;
        }
    }

    pub async fn get_session(&self) -> Option<Session> {
        self.pause(self.latency.get_session).await;
        self.session.lock().await.clone()
    }

    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Session> {
        self.pause(self.latency.sign_in).await;
        let email = normalize_email(email);

        let user = self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned();

        let Some(user) = user else {
            warn!(%email, "sign in with unknown email");
            return Err(ApiError::InvalidCredentials);
        };
        if user.status == UserStatus::Blocked {
            warn!(user_id = %user.id, "sign in by blocked user");
            return Err(ApiError::InvalidCredentials);
        }
        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "sign in with wrong password");
            return Err(ApiError::InvalidCredentials);
        }

        let session = Session {
            user: user.public(),
            token: uuid::Uuid::new_v4().to_string(),
        };
        *self.session.lock().await = Some(session.clone());
        info!(user_id = %user.id, "user signed in");
        Ok(session)
    }

    /// Registers a new `user`/`active` account. Does not sign it in.
    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, full_name: &str, email: &str, password: &str) -> ApiResult<UserId> {
        self.pause(self.latency.sign_up).await;
        let email = normalize_email(email);

        if self.email_taken(&email).await {
            warn!(%email, "email already registered");
            return Err(ApiError::DuplicateEmail);
        }
        if !is_strong_enough(password) {
            warn!("password too short");
            return Err(ApiError::WeakPassword);
        }

        let password_hash = hash_password(password)?;
        let mut users = self.users.write().await;
        // the hash above yields, so check again under the write lock
        if users.iter().any(|u| u.email == email) {
            return Err(ApiError::DuplicateEmail);
        }
        let user = UserRecord {
            id: UserId::random(),
            full_name: full_name.trim().to_string(),
            email,
            role: Role::User,
            status: UserStatus::Active,
            created_at: OffsetDateTime::now_utc(),
            password_hash,
        };
        let id = user.id.clone();
        info!(user_id = %id, email = %user.email, "user registered");
        users.push(user);
        Ok(id)
    }

    pub async fn sign_out(&self) {
        self.pause(self.latency.sign_out).await;
        if let Some(prev) = self.session.lock().await.take() {
            info!(user_id = %prev.user.id, "user signed out");
        }
    }

    pub async fn get_user_role(&self, user_id: &UserId) -> Option<Role> {
        self.pause(self.latency.get_user_role).await;
        self.role_snapshot(user_id).await
    }

    pub async fn find_user(&self, user_id: &UserId) -> Option<UserRecord> {
        self.pause(self.latency.get_user_role).await;
        self.users
            .read()
            .await
            .iter()
            .find(|u| &u.id == user_id)
            .cloned()
    }

    /// All users, newest first.
    pub async fn list_users(&self) -> Vec<UserRecord> {
        self.pause(self.latency.list_users).await;
        self.sorted_snapshot().await
    }

    pub async fn search_users(&self, query: &UserQuery) -> Page<UserRecord> {
        self.pause(self.latency.list_users).await;
        query.apply(self.sorted_snapshot().await)
    }

    pub async fn count_users(&self) -> usize {
        self.pause(self.latency.count_users).await;
        self.users.read().await.len()
    }

    #[instrument(skip(self))]
    pub async fn update_user_role(&self, user_id: &UserId, role: Role) -> ApiResult<()> {
        self.pause(self.latency.update_user).await;
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| &u.id == user_id)
            .ok_or_else(ApiError::user_not_found)?;
        user.role = role;
        info!(%user_id, role = role.as_str(), "role updated");
        Ok(())
    }

    /// Blocking the signed-in user also ends their session.
    #[instrument(skip(self))]
    pub async fn update_user_status(&self, user_id: &UserId, status: UserStatus) -> ApiResult<()> {
        self.pause(self.latency.update_user).await;
        {
            let mut users = self.users.write().await;
            let user = users
                .iter_mut()
                .find(|u| &u.id == user_id)
                .ok_or_else(ApiError::user_not_found)?;
            user.status = status;
        }
        info!(%user_id, status = status.as_str(), "status updated");

        if status == UserStatus::Blocked {
            let mut session = self.session.lock().await;
            if session.as_ref().is_some_and(|s| &s.user.id == user_id) {
                *session = None;
                info!(%user_id, "session of blocked user ended");
            }
        }
        Ok(())
    }

    /// Current session without the simulated round trip.
    pub(crate) async fn session_snapshot(&self) -> Option<Session> {
        self.session.lock().await.clone()
    }

    pub(crate) async fn role_snapshot(&self, user_id: &UserId) -> Option<Role> {
        let role = self
            .users
            .read()
            .await
            .iter()
            .find(|u| &u.id == user_id)
            .map(|u| u.role);
        debug!(%user_id, ?role, "role lookup");
        role
    }

    async fn email_taken(&self, email: &str) -> bool {
        self.users.read().await.iter().any(|u| u.email == email)
    }

    async fn sorted_snapshot(&self) -> Vec<UserRecord> {
        let mut users = self.users.read().await.clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        users
    }
}
