//! Collection wrappers for request lists.

use std::{fmt, ops::Index};

use crate::models::MaintenanceRequest;

/// A list of requests, newest first, rendered as compact entries.
///
/// ```rust
/// use wrench_core::display::Requests;
///
/// assert_eq!(Requests(vec![]).to_string(), "No requests found.\n");
/// ```
pub struct Requests(pub Vec<MaintenanceRequest>);

impl Requests {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&MaintenanceRequest> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MaintenanceRequest> {
        self.0.iter()
    }
}

impl Index<usize> for Requests {
    type Output = MaintenanceRequest;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Requests {
    type Item = MaintenanceRequest;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Requests {
    type Item = &'a MaintenanceRequest;
    type IntoIter = std::slice::Iter<'a, MaintenanceRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Requests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No requests found.");
        }
        for request in &self.0 {
            request.fmt_summary(f)?;
        }
        Ok(())
    }
}

/// Canned description suggestions for a category.
pub struct Suggestions<'a> {
    pub category: &'a str,
    pub items: &'a [&'a str],
}

impl fmt::Display for Suggestions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Suggestions for {}", self.category)?;
        writeln!(f)?;
        for item in self.items {
            writeln!(f, "- {item}")?;
        }
        Ok(())
    }
}
