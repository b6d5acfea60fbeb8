#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    pub frontend_url: String,
    pub environment: String,
    // Mail transport
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub smtp_from: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");

        // Token lifetime in minutes; 7 days unless overridden
        let jwt_maxage = std::env::var("JWT_MAXAGE")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(7 * 24 * 60);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8000);

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let smtp_host = std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let smtp_port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(587);
        let smtp_username = std::env::var("SMTP_USERNAME").unwrap_or_else(|_| "".to_string());
        let smtp_password = std::env::var("SMTP_PASSWORD").unwrap_or_else(|_| "".to_string());
        let smtp_from = std::env::var("SMTP_FROM")
            .unwrap_or_else(|_| "FlowPartner <noreply@flowpartner.app>".to_string());

        Config {
            database_url,
            jwt_secret,
            jwt_maxage,
            port,
            frontend_url,
            environment,
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            smtp_from,
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
