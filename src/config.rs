// config.rs
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Shared secret the bot transport and admin tooling present on every call.
    pub api_token: String,
    /// Chat that receives operator alerts (pool exhaustion, low pool).
    pub admin_chat_id: i64,
    pub locations_dir: String,
    pub min_order_total: f64,
    pub max_order_total: f64,
    pub ban_threshold: i32,
    /// Alert when available/total drops below this ratio.
    pub pool_alert_ratio: f64,
    pub pool_check_interval_secs: u64,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let api_token = std::env::var("API_TOKEN").expect("API_TOKEN must be set");

        let admin_chat_id = std::env::var("ADMIN_CHAT_ID")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or_else(|| {
                tracing::warn!("ADMIN_CHAT_ID missing or not an integer, operator alerts go to chat 0");
                0
            });

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8000);

        let locations_dir =
            std::env::var("LOCATIONS_DIR").unwrap_or_else(|_| "locations".to_string());

        let min_order_total = std::env::var("MIN_ORDER_TOTAL")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(20.0);
        let max_order_total = std::env::var("MAX_ORDER_TOTAL")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(1000.0);

        let ban_threshold = std::env::var("BAN_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(3);

        let pool_alert_ratio = std::env::var("POOL_ALERT_RATIO")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.20);
        let pool_check_interval_secs = std::env::var("POOL_CHECK_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(300);

        Config {
            database_url,
            port,
            api_token,
            admin_chat_id,
            locations_dir,
            min_order_total,
            max_order_total,
            ban_threshold,
            pool_alert_ratio,
            pool_check_interval_secs,
        }
    }
}
