use crate::utils::error::AppError;

/// A validated `/{currentPage}/{limit}` pair. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub current_page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(current_page: u64, limit: u64) -> Result<Self, AppError> {
        if current_page == 0 {
            return Err(AppError::InvalidRequest(
                "currentPage must be a positive integer".into(),
            ));
        }
        if limit == 0 || i64::try_from(limit).is_err() {
            return Err(AppError::InvalidRequest(
                "limit must be a positive integer".into(),
            ));
        }
        Ok(Self { current_page, limit })
    }

    /// Parses raw path segments.
    pub fn parse(current_page: &str, limit: &str) -> Result<Self, AppError> {
        let current_page = current_page.trim().parse::<u64>().map_err(|_| {
            AppError::InvalidRequest("currentPage must be a positive integer".into())
        })?;
        let limit = limit
            .trim()
            .parse::<u64>()
            .map_err(|_| AppError::InvalidRequest("limit must be a positive integer".into()))?;
        Self::new(current_page, limit)
    }

    pub fn skip(&self) -> u64 {
        (self.current_page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}
