mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Ranking, Security, Service, Storage};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let http_addr: SocketAddr = cfg.service.http_bind.parse().map_err(|_| Error::InvalidBind {
		field: "service.http_bind",
		value: cfg.service.http_bind.clone(),
	})?;

	if cfg.security.bind_localhost_only && !http_addr.ip().is_loopback() {
		return Err(Error::Validation {
			message: "service.http_bind must be a loopback address when security.bind_localhost_only is true."
				.to_string(),
		});
	}
	if cfg.storage.postgres.dsn.is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	for (label, weight) in [
		("ranking.tag_match_weight", cfg.ranking.tag_match_weight),
		("ranking.likes_weight", cfg.ranking.likes_weight),
		("ranking.views_weight", cfg.ranking.views_weight),
		("ranking.recency_weight", cfg.ranking.recency_weight),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if weight < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.storage.postgres.dsn = cfg.storage.postgres.dsn.trim().to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
