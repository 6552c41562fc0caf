use crate::controller::DashboardError;
use crate::logging::LogLevel;
use crate::source::error::SourceError;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_source_error(&self, error: &SourceError) -> LogLevel {
        match error {
            // Temporary server trouble
            SourceError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Wrong path or discovery variant: needs a config change
            SourceError::Http { .. } => LogLevel::Error,
            SourceError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            SourceError::Reqwest(_) => LogLevel::Warn,
        }
    }

    pub fn classify(&self, error: &DashboardError) -> LogLevel {
        match error {
            DashboardError::DiscoveryFetch(source) => self.classify_source_error(source),
            DashboardError::DataFetch { source, .. } => self.classify_source_error(source),
            DashboardError::DiscoveryParse(_) => LogLevel::Error,
            // One bad box is noise; a whole bad payload is not
            DashboardError::DataParse {
                quadrant: Some(_), ..
            } => LogLevel::Warn,
            DashboardError::DataParse { quadrant: None, .. } => LogLevel::Error,
            DashboardError::MissingQuadrantTarget { .. } => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_warnings_and_client_errors_are_errors() {
        let classifier = ErrorClassifier::new();
        let server = SourceError::Http {
            status: 503,
            message: String::new(),
        };
        let client = SourceError::Http {
            status: 404,
            message: String::new(),
        };
        assert_eq!(classifier.classify_source_error(&server), LogLevel::Warn);
        assert_eq!(classifier.classify_source_error(&client), LogLevel::Error);
    }

    #[test]
    fn quadrant_level_problems_are_warnings() {
        let classifier = ErrorClassifier::default();
        let missing = DashboardError::MissingQuadrantTarget { quadrant: 2 };
        let one_box = DashboardError::DataParse {
            field: "CO2".into(),
            quadrant: Some(1),
            reason: "bad".into(),
        };
        let whole = DashboardError::DataParse {
            field: "CO2".into(),
            quadrant: None,
            reason: "bad".into(),
        };
        assert_eq!(classifier.classify(&missing), LogLevel::Warn);
        assert_eq!(classifier.classify(&one_box), LogLevel::Warn);
        assert_eq!(classifier.classify(&whole), LogLevel::Error);
        assert_eq!(
            classifier.classify(&DashboardError::DiscoveryParse("x".into())),
            LogLevel::Error
        );
    }
}
