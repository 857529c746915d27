use thiserror::Error;

/// Width the SEC uses for CIKs in the submissions URL.
pub const CIK_WIDTH: usize = 10;

/// A normalized, zero-padded entity identifier (CIK).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cik(String);

impl Cik {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for Cik {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CikError {
    #[error("entity identifier is empty")]
    Empty,
    #[error("entity identifier {0:?} must contain only digits")]
    NotNumeric(String),
    #[error("entity identifier {0:?} is longer than 10 digits")]
    TooLong(String),
}

/// Trim and left-pad with zeros to `CIK_WIDTH` digits.
pub fn normalize(raw: &str) -> Result<Cik, CikError> {
    let s = raw.trim();
    if s.is_empty() { return Err(CikError::Empty); }
    if !s.chars().all(|c| c.is_ascii_digit()) { return Err(CikError::NotNumeric(s.to_string())); }
    if s.len() > CIK_WIDTH { return Err(CikError::TooLong(s.to_string())); }
    Ok(Cik(format!("{:0>width$}", s, width = CIK_WIDTH)))
}
