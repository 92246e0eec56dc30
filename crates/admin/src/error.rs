//! Unified error handling for admin.

use signshop_core::{EditError, ValidationError};
use thiserror::Error;

use crate::alert::Alert;
use crate::api::ApiError;
use crate::config::ConfigError;

/// Application-level error type for the admin tools.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend call failed.
    #[error("Network error: {0}")]
    Api(#[from] ApiError),

    /// A form edit was rejected.
    #[error("{0}")]
    Edit(#[from] EditError),

    /// Required data is missing.
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl AppError {
    /// The alert to show for this error.
    ///
    /// Validation problems are warnings the operator can fix in place;
    /// everything else blocks as an error.
    #[must_use]
    pub fn alert(&self) -> Alert {
        match self {
            Self::Validation(e) | Self::Edit(EditError::Validation(e)) => {
                Alert::warning("Validation Error", e.to_string())
            }
            Self::Api(e) => Alert::error(e.user_message()),
            Self::Edit(e) => Alert::error(e.to_string()),
            Self::Config(e) => Alert::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertLevel;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(ApiError::NotFound("Product not found".to_string()));
        assert_eq!(err.to_string(), "Network error: Not found: Product not found");

        let err = AppError::from(ValidationError::MissingCustomerDetails);
        assert_eq!(err.to_string(), "Name and Phone are required");
    }

    #[test]
    fn test_alert_levels() {
        let alert = AppError::from(ValidationError::NoVariations).alert();
        assert_eq!(alert.level, AlertLevel::Warning);

        let alert = AppError::from(EditError::from(ValidationError::NoVariations)).alert();
        assert_eq!(alert.level, AlertLevel::Warning);

        let alert = AppError::from(ApiError::Api {
            status: 500,
            message: "Database unavailable".to_string(),
        })
        .alert();
        assert!(alert.is_error());
        assert_eq!(alert.message, "Database unavailable");
    }
}
