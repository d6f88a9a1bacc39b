use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreProvider {
    Sqlite,
    Rest,
}

impl StoreProvider {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "rest" | "supabase" => StoreProvider::Rest,
            _ => StoreProvider::Sqlite,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub store_provider: StoreProvider,
    pub database_url: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub make_webhook_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            store_provider: StoreProvider::parse(
                &env::var("STORE_PROVIDER").unwrap_or_default(),
            ),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "salon.db".to_string()),
            supabase_url: env::var("SUPABASE_URL").unwrap_or_default(),
            supabase_service_key: env::var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default(),
            make_webhook_url: env::var("MAKE_WEBHOOK_URL").unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_provider_parse() {
        assert_eq!(StoreProvider::parse("rest"), StoreProvider::Rest);
        assert_eq!(StoreProvider::parse(" Supabase "), StoreProvider::Rest);
        assert_eq!(StoreProvider::parse("sqlite"), StoreProvider::Sqlite);
        assert_eq!(StoreProvider::parse(""), StoreProvider::Sqlite);
    }
}
