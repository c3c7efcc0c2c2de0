use folio_style::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Failed to write markup: {0}")]
    Xml(#[from] std::io::Error),

    #[error("Generated markup is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
