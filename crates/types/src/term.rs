/// Errors that can occur when creating a validated search term.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    /// The input text was empty or contained only whitespace
    #[error("search term cannot be empty")]
    Empty,
}

/// A search term that guarantees non-empty content.
///
/// Wraps a `String` and ensures it contains at least one non-whitespace
/// character. Input is trimmed of leading and trailing whitespace during
/// construction, so a term can be passed to the suggestion endpoints as-is.
/// Empty or whitespace-only input is unrepresentable, which is what lets the
/// debounce layer promise that such input never triggers a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Creates a new `SearchTerm` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the
    /// trimmed result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TermError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TermError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner term as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SearchTerm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SearchTerm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SearchTerm::new(&s).map_err(serde::de::Error::custom)
    }
}
