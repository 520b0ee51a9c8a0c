use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("industry cannot be empty")]
    EmptyIndustry,
}

/// What the quiz generator tailors questions to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerProfile {
    industry: String,
    skills: Vec<String>,
}

impl CareerProfile {
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyIndustry` if `industry` is blank.
    pub fn new(
        industry: impl Into<String>,
        skills: impl IntoIterator<Item = String>,
    ) -> Result<Self, ProfileError> {
        let industry = industry.into().trim().to_string();
        if industry.is_empty() {
            return Err(ProfileError::EmptyIndustry);
        }
        let skills = skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(Self { industry, skills })
    }

    /// Parse a comma separated skills list, e.g. `"rust, sql,  docker"`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyIndustry` if `industry` is blank.
    pub fn from_csv(industry: impl Into<String>, skills: &str) -> Result<Self, ProfileError> {
        Self::new(industry, skills.split(',').map(str::to_string))
    }

    #[must_use]
    pub fn industry(&self) -> &str {
        &self.industry
    }

    #[must_use]
    pub fn skills(&self) -> &[String] {
        &self.skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_skills_are_trimmed_and_blank_entries_dropped() {
        let profile = CareerProfile::from_csv("Software", " rust, ,sql ").unwrap();
        assert_eq!(profile.industry(), "Software");
        assert_eq!(profile.skills(), ["rust".to_string(), "sql".to_string()]);
    }

    #[test]
    fn blank_industry_is_rejected() {
        assert_eq!(
            CareerProfile::from_csv("  ", "rust").unwrap_err(),
            ProfileError::EmptyIndustry
        );
    }
}
