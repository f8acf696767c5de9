use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub migrations_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "bookline.db".to_string()),
            migrations_dir: env::var("MIGRATIONS_DIR").unwrap_or_else(|_| "migrations".to_string()),
        }
    }
}
