use std::fmt::{self, Display, Formatter};

use crate::error::PageError;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One-based page window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    pub fn new(number: i64, size: i64) -> Result<Self, PageError> {
        if number < 1 || number > i64::from(u32::MAX) {
            return Err(PageError::NumberOutOfRange(number));
        }
        if !(1..=i64::from(MAX_PAGE_SIZE)).contains(&size) {
            return Err(PageError::SizeOutOfRange {
                got: size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self {
            number: number as u32,
            size: size as u32,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Index of the first item on this page. Page 1 always starts at 0.
    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }
}

/// Ordering on a single field; a leading `-` in the raw form means
/// descending.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    field: String,
    descending: bool,
}

impl SortSpec {
    /// Returns `None` for empty input or a bare `-`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (field, descending) = match raw.strip_prefix('-') {
            Some(field) => (field, true),
            None => (raw, false),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            descending,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// Backend sort parameter: `field:desc` or `field`.
    pub fn to_param(&self) -> String {
        if self.descending {
            format!("{}:desc", self.field)
        } else {
            self.field.clone()
        }
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}
