use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Missing token signing secret")]
    MissingSecret,
    #[error("Invalid bootstrap admin: {0}")]
    InvalidAdmin(String),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid credential: {0}")]
    InvalidCredential(jsonwebtoken::errors::Error),
    #[error("Expired credential")]
    ExpiredCredential,
    #[error("No credentials provided")]
    NoCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden")]
    Forbidden,
    #[error("Invalid identity: {0}")]
    InvalidIdentity(&'static str),
    #[error("Invalid username")]
    InvalidUsername,
    #[error("Invalid password: {0}")]
    InvalidPassword(String),
    #[error("Invalid role")]
    InvalidRole,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);

        let (status, message) = match self {
            Error::Jwt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "JWT error"),
            Error::InvalidCredential(_) => (StatusCode::UNAUTHORIZED, "Invalid credential"),
            Error::ExpiredCredential => (StatusCode::UNAUTHORIZED, "Expired credential"),
            Error::NoCredentials => (StatusCode::UNAUTHORIZED, "No credentials provided"),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Error::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            Error::InvalidIdentity(_) => (StatusCode::BAD_REQUEST, "Invalid identity"),
            Error::InvalidUsername => (StatusCode::BAD_REQUEST, "Invalid username"),
            Error::InvalidPassword(_) => (StatusCode::BAD_REQUEST, "Invalid password"),
            Error::InvalidRole => (StatusCode::BAD_REQUEST, "Invalid role"),
            Error::UserAlreadyExists => (StatusCode::CONFLICT, "User already exists"),
            Error::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
            Error::Bcrypt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Bcrypt error"),
            Error::Task(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (status, message).into_response()
    }
}
