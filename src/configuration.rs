use config::ConfigError;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub jwt: JwtSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub port: u16,
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub database_name: String,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port
        )
    }
}

/// Token signing settings
///
/// The secret is required and must never appear in logs or responses;
/// the struct deliberately has no Debug impl.
#[derive(serde::Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub algorithm: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,
}

/// Loads settings from an optional `configuration` file overlaid with
/// environment variables (e.g. `JWT__SECRET`, `DATABASE__HOST`).
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .set_default("application.port", 8000)?
        .set_default("jwt.algorithm", "HS256")?
        .set_default("jwt.access_token_expire_minutes", 30)?
        .set_default("jwt.refresh_token_expire_days", 7)?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(config::Environment::default().separator("__"))
        .build()?;
    settings.try_deserialize::<Settings>()
}
