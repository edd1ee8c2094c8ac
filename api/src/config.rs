use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// SeaORM connection URL; PostgreSQL or SQLite
    pub database_url: String,
    pub port: u16,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://orgtrack.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        }
    }
}
