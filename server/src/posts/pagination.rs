//! Page/size query parameters and the offset math behind them.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("page cannot be lower than 0")]
    InvalidPage,
    #[error("size cannot be lower than 0")]
    InvalidSize,
}

/// Raw `?page=&size=` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub size: Option<String>,
}

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u64,
    size: u64,
}

impl Page {
    /// # Errors
    /// Returns `PageError` if either value is zero.
    pub const fn new(number: u64, size: u64) -> Result<Self, PageError> {
        if number == 0 {
            return Err(PageError::InvalidPage);
        }
        if size == 0 {
            return Err(PageError::InvalidSize);
        }
        Ok(Self { number, size })
    }

    /// Parse query parameters. Missing or non-numeric values count as zero.
    ///
    /// # Errors
    /// Returns `PageError` if either value is missing, not an integer, or not positive.
    pub fn from_params(params: &PageParams) -> Result<Self, PageError> {
        let number = parse_positive(params.page.as_deref()).ok_or(PageError::InvalidPage)?;
        let size = parse_positive(params.size.as_deref()).ok_or(PageError::InvalidSize)?;
        Self::new(number, size)
    }

    /// Number of records to skip: `(page - 1) * size`.
    #[must_use]
    pub fn offset(self) -> usize {
        let offset = (self.number - 1).saturating_mul(self.size);
        usize::try_from(offset).unwrap_or(usize::MAX)
    }

    /// Maximum number of records on the page.
    #[must_use]
    pub fn limit(self) -> usize {
        usize::try_from(self.size).unwrap_or(usize::MAX)
    }
}

fn parse_positive(value: Option<&str>) -> Option<u64> {
    value
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .and_then(|v| u64::try_from(v).ok())
}
