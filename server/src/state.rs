use std::sync::Arc;

use reqwest::Client;
use sqlx::PgPool;

use super::{config::Config, database::init_postgres, geocode::USER_AGENT};

pub struct State {
    pub config: Config,
    pub pool: PgPool,
    pub geocoder: Client,
}

impl State {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let pool = init_postgres(&config.database_url).await;

        let geocoder = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("HTTP client misconfigured!");

        Arc::new(Self {
            config,
            pool,
            geocoder,
        })
    }
}
