use std::env;

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_days: i64,
    pub otp_ttl_minutes: i64,
    pub cookie_secure: bool,
    pub port: u16,
    pub email: Option<EmailConfig>,
}

/// Credentials for the outbound email provider.
/// Absent in development; the server falls back to a log-only mailer.
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        // No fallback secret: a missing JWT_SECRET aborts startup.
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set".to_string())?;

        let jwt_ttl_days = parse_var("JWT_TTL_DAYS", 7)?;
        let otp_ttl_minutes = parse_var("OTP_TTL_MINUTES", 10)?;
        let port = parse_var("PORT", 3000)?;

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let email = match (env::var("EMAIL_API_URL"), env::var("EMAIL_API_KEY")) {
            (Ok(api_url), Ok(api_key)) => Some(EmailConfig {
                api_url,
                api_key,
                from: env::var("EMAIL_FROM")
                    .unwrap_or_else(|_| "Boutique <noreply@boutique.example>".to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_ttl_days,
            otp_ttl_minutes,
            cookie_secure,
            port,
            email,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| format!("{name} is not a valid number")),
        Err(_) => Ok(default),
    }
}
