use std::time::Duration;

/// Artificial delays applied by the mock backend, one per operation.
#[derive(Debug, Clone)]
pub struct LatencyConfig {
    pub get_session: Duration,
    pub sign_in: Duration,
    pub sign_up: Duration,
    pub sign_out: Duration,
    pub get_user_role: Duration,
    pub list_users: Duration,
    pub count_users: Duration,
    pub update_user: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            get_session: Duration::from_millis(100),
            sign_in: Duration::from_millis(1000),
            sign_up: Duration::from_millis(1500),
            sign_out: Duration::from_millis(500),
            get_user_role: Duration::from_millis(200),
            list_users: Duration::from_millis(800),
            count_users: Duration::from_millis(300),
            update_user: Duration::from_millis(700),
        }
    }
}

impl LatencyConfig {
    /// No delays at all. Handy for tests and local tooling.
    pub fn none() -> Self {
        Self::scaled(0.0)
    }

    /// Default delays multiplied by `factor`. Negative or non-finite factors
    /// mean no delay; products past `Duration::MAX` saturate.
    pub fn scaled(factor: f64) -> Self {
        let factor = if factor.is_finite() { factor.max(0.0) } else { 0.0 };
        let d = Self::default();
        let s = |v: Duration| {
            Duration::try_from_secs_f64(v.as_secs_f64() * factor).unwrap_or(Duration::MAX)
        };
        Self {
            get_session: s(d.get_session),
            sign_in: s(d.sign_in),
            sign_up: s(d.sign_up),
            sign_out: s(d.sign_out),
            get_user_role: s(d.get_user_role),
            list_users: s(d.list_users),
            count_users: s(d.count_users),
            update_user: s(d.update_user),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub latency: LatencyConfig,
    pub seed_users: usize,
    pub render_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            latency: LatencyConfig::default(),
            seed_users: 24,
            render_delay: Duration::from_secs(5),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let host = std::env::var("APP_HOST").unwrap_or(defaults.host);
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>()?,
            Err(_) => defaults.port,
        };
        let latency = std::env::var("MOCK_LATENCY_SCALE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .map(LatencyConfig::scaled)
            .unwrap_or(defaults.latency);
        let seed_users = std::env::var("SEED_USERS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.seed_users);
        let render_delay = std::env::var("VIDEO_RENDER_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.render_delay);

        Ok(Self {
            host,
            port,
            latency,
            seed_users,
            render_delay,
        })
    }

    /// Zero latency, a handful of seed users and a one second render.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            latency: LatencyConfig::none(),
            seed_users: 5,
            render_delay: Duration::from_secs(1),
        }
    }
}
