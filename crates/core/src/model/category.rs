use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("unknown category: {0:?}")]
    Unknown(String),
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// One of the six topical partitions of the exam bank.
///
/// Serialized by its display label, which is also the key used in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Mortgage Lending Basics")]
    MortgageLendingBasics,
    #[serde(rename = "Federal Regulations")]
    FederalRegulations,
    #[serde(rename = "State Regulations")]
    StateRegulations,
    #[serde(rename = "Loan Origination")]
    LoanOrigination,
    #[serde(rename = "Ethics")]
    Ethics,
    #[serde(rename = "Mortgage Products")]
    MortgageProducts,
}

impl Category {
    /// All categories in study-guide order.
    pub const ALL: [Category; 6] = [
        Category::MortgageLendingBasics,
        Category::FederalRegulations,
        Category::StateRegulations,
        Category::LoanOrigination,
        Category::Ethics,
        Category::MortgageProducts,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::MortgageLendingBasics => "Mortgage Lending Basics",
            Category::FederalRegulations => "Federal Regulations",
            Category::StateRegulations => "State Regulations",
            Category::LoanOrigination => "Loan Origination",
            Category::Ethics => "Ethics",
            Category::MortgageProducts => "Mortgage Products",
        }
    }

    /// Case-insensitive lookup by label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| CategoryError::Unknown(s.to_string()))
    }
}

//
// ─── FILTER ────────────────────────────────────────────────────────────────────
//

/// Which part of the catalog a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => f.write_str(category.label()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}
