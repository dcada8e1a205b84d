use thiserror::Error;

#[derive(Error, Debug)]
pub enum FissionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown layout: {0:?} (expected random, grid or circle)")]
    InvalidLayout(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FissionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_names_input() {
        let e = FissionError::InvalidLayout("hexagon".into());
        let msg = e.to_string();
        assert!(msg.contains("hexagon"));
        assert!(msg.contains("circle"));
    }
}
