pub mod domain;
pub mod identity;
pub mod scoring;
pub mod storage;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_PORT: u16 = 8080;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub port: u16,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let port = match std::env::var("PORT") {
                Ok(v) if !v.trim().is_empty() => v
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a valid port number (got {v:?})"))?,
                _ => DEFAULT_PORT,
            };

            Ok(Self {
                port,
                sentry_dsn: std::env::var("SENTRY_DSN")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            })
        }

        pub fn bind_addr(&self) -> std::net::SocketAddr {
            std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
        }
    }

}
