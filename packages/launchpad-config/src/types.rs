use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub ranking: Ranking,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

/// Weights of the composite listing score.
///
/// `score = tag_match_weight * match_count + likes_weight * normalized_likes
/// + views_weight * normalized_views + recency_weight * recency`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub tag_match_weight: f64,
	pub likes_weight: f64,
	pub views_weight: f64,
	pub recency_weight: f64,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { tag_match_weight: 0.5, likes_weight: 0.2, views_weight: 0.1, recency_weight: 0.2 }
	}
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}

fn default_log_level() -> String {
	"info".to_string()
}
