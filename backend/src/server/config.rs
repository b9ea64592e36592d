//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use backend::inbound::http::session_config::SessionSettings;
use backend::middleware::GatePolicy;
use ortho_config::OrthoConfig;
use serde::Deserialize;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GATE_PAUSE_MS: u64 = 100;

/// Runtime settings for the backend loaded via OrthoConfig.
///
/// Values come from `TAKWIN_`-prefixed environment variables, configuration
/// files, or command-line flags, merged in OrthoConfig's usual order.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TAKWIN")]
pub struct AppSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// Optional course registry file replacing the bundled demo catalogue.
    pub courses_path: Option<PathBuf>,
    /// Upper bound, in milliseconds, on the sign-in restoration pause.
    pub gate_pause_ms: Option<u64>,
    /// Destination the access gate redirects unauthenticated visitors to.
    pub login_destination: Option<String>,
    /// Destination offered to signed-in visitors who lack a capability.
    pub admin_home_destination: Option<String>,
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the course registry override, if one was configured.
    #[must_use]
    pub fn courses_path(&self) -> Option<&Path> {
        self.courses_path.as_deref()
    }

    /// Return the restoration pause bound, falling back to the default.
    #[must_use]
    pub fn gate_pause(&self) -> Duration {
        Duration::from_millis(self.gate_pause_ms.unwrap_or(DEFAULT_GATE_PAUSE_MS))
    }

    /// Build the gate redirect policy from the configured destinations.
    #[must_use]
    pub fn gate_policy(&self) -> GatePolicy {
        let mut policy = GatePolicy::default();
        if let Some(login) = &self.login_destination {
            policy.login_destination.clone_from(login);
        }
        if let Some(home) = &self.admin_home_destination {
            policy.admin_home_destination.clone_from(home);
        }
        policy
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) courses_path: Option<PathBuf>,
    pub(crate) gate_pause: Duration,
    pub(crate) gate_policy: GatePolicy,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            key: session.key,
            cookie_secure: session.cookie_secure,
            same_site: session.same_site,
            bind_addr,
            courses_path: None,
            gate_pause: Duration::from_millis(DEFAULT_GATE_PAUSE_MS),
            gate_policy: GatePolicy::default(),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Load the course catalogue from `path` instead of the bundled demo set.
    #[must_use]
    pub fn with_courses_path(mut self, path: PathBuf) -> Self {
        self.courses_path = Some(path);
        self
    }

    /// Set the upper bound on the access gate's restoration pause.
    #[must_use]
    pub fn with_gate_pause(mut self, pause: Duration) -> Self {
        self.gate_pause = pause;
        self
    }

    /// Set the redirect destinations used by the access gate.
    #[must_use]
    pub fn with_gate_policy(mut self, policy: GatePolicy) -> Self {
        self.gate_policy = policy;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for backend settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("TAKWIN_BIND_ADDR", None::<String>),
            ("TAKWIN_COURSES_PATH", None::<String>),
            ("TAKWIN_GATE_PAUSE_MS", None::<String>),
            ("TAKWIN_LOGIN_DESTINATION", None::<String>),
            ("TAKWIN_ADMIN_HOME_DESTINATION", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert!(settings.courses_path().is_none());
        assert_eq!(settings.gate_pause(), Duration::from_millis(100));
        let policy = settings.gate_policy();
        assert_eq!(policy.login_destination, "/login");
        assert_eq!(policy.admin_home_destination, "/admin");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TAKWIN_BIND_ADDR", Some("127.0.0.1:9100".to_owned())),
            (
                "TAKWIN_COURSES_PATH",
                Some("/tmp/takwin_courses.json".to_owned()),
            ),
            ("TAKWIN_GATE_PAUSE_MS", Some("250".to_owned())),
            ("TAKWIN_LOGIN_DESTINATION", Some("/connexion".to_owned())),
            (
                "TAKWIN_ADMIN_HOME_DESTINATION",
                Some("/espace-admin".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9100");
        assert_eq!(
            settings.courses_path(),
            Some(Path::new("/tmp/takwin_courses.json"))
        );
        assert_eq!(settings.gate_pause(), Duration::from_millis(250));
        let policy = settings.gate_policy();
        assert_eq!(policy.login_destination, "/connexion");
        assert_eq!(policy.admin_home_destination, "/espace-admin");
    }

    #[rstest]
    fn server_config_starts_from_gate_defaults() {
        let session = SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        };
        let bind_addr: SocketAddr = "127.0.0.1:0".parse().expect("valid socket address");

        let config = ServerConfig::new(session, bind_addr)
            .with_gate_pause(Duration::from_millis(40))
            .with_courses_path(PathBuf::from("/tmp/registry.json"));

        assert_eq!(config.bind_addr(), bind_addr);
        assert_eq!(config.gate_pause, Duration::from_millis(40));
        assert_eq!(
            config.courses_path,
            Some(PathBuf::from("/tmp/registry.json"))
        );
        assert_eq!(config.gate_policy.login_destination, "/login");
    }
}
