use serde::Serialize;
use thiserror::Error;

use crate::category::Category;
use crate::group::GroupKey;

/// A group that is missing at least one required category.
///
/// Raised by the completeness check, recorded as that group's failure by
/// the caller; it never aborts sibling groups.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("incomplete file group {group_id}: missing {}", join_categories(.missing))]
pub struct IncompleteGroupError {
    pub group_id: GroupKey,
    pub present: Vec<Category>,
    pub missing: Vec<Category>,
}

fn join_categories(categories: &[Category]) -> String {
    categories
        .iter()
        .copied()
        .map(Category::token)
        .collect::<Vec<_>>()
        .join(", ")
}
