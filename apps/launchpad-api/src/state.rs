use std::sync::Arc;

use launchpad_service::LaunchpadService;
use launchpad_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<LaunchpadService>,
}
impl AppState {
	pub async fn new(config: launchpad_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(LaunchpadService::new(config, db)))
	}

	pub fn from_service(service: LaunchpadService) -> Self {
		Self { service: Arc::new(service) }
	}
}
