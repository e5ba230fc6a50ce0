//! One pass of the council.

use crate::debate::response::ResponseUnit;
use serde::{Deserialize, Serialize};

/// Every agent's response for one round, in council order.
///
/// Order matters: it is exactly the order in which agents were asked, so
/// position `p` saw positions `0..p` of the same round. Serializes as a
/// bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Round {
    responses: Vec<ResponseUnit>,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            responses: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, unit: ResponseUnit) {
        self.responses.push(unit);
    }

    pub fn responses(&self) -> &[ResponseUnit] {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResponseUnit> {
        self.responses.iter()
    }

    /// Sum of reported token usage, absent counts as zero.
    pub fn tokens_used(&self) -> u64 {
        self.responses.iter().map(ResponseUnit::tokens_or_zero).sum()
    }

    pub fn into_responses(self) -> Vec<ResponseUnit> {
        self.responses
    }
}

impl From<Vec<ResponseUnit>> for Round {
    fn from(responses: Vec<ResponseUnit>) -> Self {
        Self { responses }
    }
}

impl<'a> IntoIterator for &'a Round {
    type Item = &'a ResponseUnit;
    type IntoIter = std::slice::Iter<'a, ResponseUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.iter()
    }
}
