use crate::errors::AppError;

/// The role a registered user occupies. Decides which profile table and
/// field set apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileCategory {
    Employer,
    JobSeeker,
}

impl ProfileCategory {
    /// Parses the `:type` path parameter. Anything outside the two known
    /// categories is an explicit client error, never a silent no-op.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "employer" => Ok(Self::Employer),
            "jobSeeker" => Ok(Self::JobSeeker),
            other => Err(AppError::BadRequest(format!(
                "Unknown profile type '{other}'"
            ))),
        }
    }

    /// Lenient variant for values read back from the database, where an
    /// unknown category just means "no profile to show".
    pub fn from_stored(value: &str) -> Option<Self> {
        Self::parse(value).ok()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employer => "employer",
            Self::JobSeeker => "jobSeeker",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_both_known_categories() {
        assert_eq!(
            ProfileCategory::parse("employer").unwrap(),
            ProfileCategory::Employer
        );
        assert_eq!(
            ProfileCategory::parse("jobSeeker").unwrap(),
            ProfileCategory::JobSeeker
        );
    }

    #[test]
    fn test_unknown_category_is_bad_request() {
        assert!(matches!(
            ProfileCategory::parse("admin"),
            Err(AppError::BadRequest(_))
        ));
        // Case matters: the API has always used camelCase here
        assert!(ProfileCategory::parse("jobseeker").is_err());
    }

    #[test]
    fn test_as_str_round_trips() {
        for cat in [ProfileCategory::Employer, ProfileCategory::JobSeeker] {
            assert_eq!(ProfileCategory::parse(cat.as_str()).unwrap(), cat);
        }
    }
}
