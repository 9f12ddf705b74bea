//! Validated text types shared by the Smart Health Care crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText`, or `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A patient's display name.
///
/// Names keep the casing they were registered with but compare case-insensitively through
/// [`PatientName::matches`]. Two patients may share a name; the registry resolves lookups to the
/// first record inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientName(NonEmptyText);

impl PatientName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        NonEmptyText::new(input).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Case-insensitive exact comparison against a lookup key.
    ///
    /// The key is compared as given; callers trim user input before looking a name up.
    pub fn matches(&self, candidate: &str) -> bool {
        self.as_str() == candidate || self.as_str().to_lowercase() == candidate.to_lowercase()
    }
}

impl std::fmt::Display for PatientName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PatientName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl serde::Serialize for PatientName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for PatientName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatientName::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Flu  ").unwrap();
        assert_eq!(text.as_str(), "Flu");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new("   ").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn patient_name_matches_ignoring_case() {
        let name = PatientName::new("Alice").unwrap();
        assert!(name.matches("alice"));
        assert!(name.matches("ALICE"));
        assert!(!name.matches("Alicia"));
        assert!(!name.matches(""));
    }

    #[test]
    fn patient_name_match_is_exact_about_padding() {
        let name = PatientName::new("  Alice ").unwrap();
        assert_eq!(name.as_str(), "Alice");
        assert!(!name.matches(" alice "));
        assert!(!name.matches("alice "));
    }

    #[test]
    fn patient_name_keeps_registered_casing() {
        let name = PatientName::new(" McDonald ").unwrap();
        assert_eq!(name.to_string(), "McDonald");
    }

    #[test]
    fn patient_name_deserialize_rejects_blank() {
        let err = serde_json::from_str::<PatientName>("\"  \"").unwrap_err();
        assert!(err.to_string().contains("Text cannot be empty"));

        let name: PatientName = serde_json::from_str("\"Bob\"").unwrap();
        assert_eq!(name.as_str(), "Bob");
    }
}
