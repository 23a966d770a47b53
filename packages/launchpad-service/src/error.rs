pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		Self::InvalidRequest { message: message.into() }
	}

	pub(crate) fn not_found(message: impl Into<String>) -> Self {
		Self::NotFound { message: message.into() }
	}

	pub(crate) fn conflict(message: impl Into<String>) -> Self {
		Self::Conflict { message: message.into() }
	}

	/// The message without the variant prefix, as returned to HTTP clients.
	pub fn message(&self) -> &str {
		match self {
			Self::InvalidRequest { message }
			| Self::NotFound { message }
			| Self::Conflict { message }
			| Self::Storage { message } => message,
		}
	}
}
impl From<launchpad_storage::Error> for Error {
	fn from(err: launchpad_storage::Error) -> Self {
		match err {
			launchpad_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			launchpad_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}
