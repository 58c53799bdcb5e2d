use thiserror::Error;

pub type BcvResult<T> = Result<T, BcvError>;

#[derive(Error, Debug)]
pub enum BcvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Cell format error: {0}")]
    CellFormat(String),

    #[error("Date parse error: {0}")]
    Date(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Markup error: {0}")]
    Markup(String),

    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error("Staging error: {0}")]
    Staging(String),

    #[error("Notification error: {0}")]
    Notification(String),
}

impl BcvError {
    /// Network-level failures end a live run quietly; everything else surfaces.
    pub fn is_transport(&self) -> bool {
        matches!(self, BcvError::Transport(_))
    }
}

impl From<calamine::Error> for BcvError {
    fn from(e: calamine::Error) -> Self {
        BcvError::Workbook(e.to_string())
    }
}

impl From<reqwest::Error> for BcvError {
    fn from(e: reqwest::Error) -> Self {
        BcvError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(BcvError::Transport("timed out".into()).is_transport());
        assert!(!BcvError::Markup("missing #euro".into()).is_transport());
        assert!(!BcvError::Io(std::io::Error::other("denied")).is_transport());
    }

    #[test]
    fn test_display_prefixes() {
        let err = BcvError::CellFormat("no decimal separator in '36'".into());
        assert_eq!(
            err.to_string(),
            "Cell format error: no decimal separator in '36'"
        );
    }
}
