//! Generic token extraction.
//!
//! Every token kind goes through the same pipeline:
//! candidates → optional dedup → sufficiency check → truncation.
//!
//! The sufficiency check always demands at least one candidate, even for
//! `Amount::All` or `Amount::Count(0)`. Command handlers rely on an empty
//! request failing rather than trivially succeeding with nothing.

use std::collections::HashSet;
use std::hash::Hash;

use tracing::debug;

use crate::error::Insufficient;
use crate::interpretation::message::Message;

/// How many candidates a caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Amount {
    /// Every candidate found (still at least one).
    #[default]
    All,
    /// The first `n` candidates (at least one even when `n == 0`).
    Count(usize),
}

impl Amount {
    /// Minimum number of candidates needed for the request to succeed.
    pub fn required(self) -> usize {
        match self {
            Amount::All => 1,
            Amount::Count(n) => n.max(1),
        }
    }
}

impl From<usize> for Amount {
    fn from(n: usize) -> Self {
        Amount::Count(n)
    }
}

/// Per-call extraction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Request {
    pub amount: Amount,
    /// `None` uses the recognizer's default.
    pub deduplicate: Option<bool>,
}

impl Request {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn count(n: usize) -> Self {
        Self {
            amount: Amount::Count(n),
            deduplicate: None,
        }
    }

    pub fn deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = Some(deduplicate);
        self
    }
}

/// Per-kind rule turning raw tokens into typed candidates.
pub trait Recognizer {
    type Output: Clone + Eq + Hash;

    /// Short name used in logs.
    const KIND: &'static str;

    /// Whether duplicates are collapsed when the caller doesn't say.
    const DEDUPLICATE: bool;

    /// Map one whitespace token to a candidate, or reject it.
    fn recognize(&self, token: &str) -> Option<Self::Output>;

    /// Candidates that come from outside the text, placed before any token.
    fn seed(&self, _message: &Message) -> Vec<Self::Output> {
        Vec::new()
    }
}

/// Collect candidates for `message` in encounter order.
pub fn candidates<R: Recognizer>(recognizer: &R, message: &Message) -> Vec<R::Output> {
    let mut found = recognizer.seed(message);
    found.extend(message.tokens().filter_map(|token| recognizer.recognize(token)));
    found
}

/// Run the full extraction pipeline for one recognizer.
///
/// After deduplication the order of the result is unspecified; compare as
/// sets when `deduplicate` is on.
pub fn extract<R: Recognizer>(
    recognizer: &R,
    message: &Message,
    request: Request,
) -> Result<Vec<R::Output>, Insufficient> {
    let deduplicate = request.deduplicate.unwrap_or(R::DEDUPLICATE);
    let found = candidates(recognizer, message);
    let result = select(found, request.amount, deduplicate);

    match &result {
        Ok(items) => debug!(kind = R::KIND, returned = items.len(), "Extraction satisfied"),
        Err(short) => debug!(
            kind = R::KIND,
            required = short.required,
            found = short.found,
            "Extraction insufficient"
        ),
    }
    result
}

/// Apply dedup, sufficiency and truncation to an already-built candidate list.
pub fn select<T: Clone + Eq + Hash>(
    mut items: Vec<T>,
    amount: Amount,
    deduplicate: bool,
) -> Result<Vec<T>, Insufficient> {
    if deduplicate {
        let mut seen = HashSet::with_capacity(items.len());
        items.retain(|item| seen.insert(item.clone()));
    }

    let required = amount.required();
    if items.len() < required {
        return Err(Insufficient {
            required,
            found: items.len(),
        });
    }

    if let Amount::Count(n) = amount {
        items.truncate(n);
    }
    Ok(items)
}
