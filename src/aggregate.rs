//! Ordered collections of errors presented as one.
//!
//! # Summary Format
//!
//! An [`AggregateError`] displays as a header line followed by one bullet
//! per member, in order:
//!
//! ```text
//! 2 errors occurred:
//! 	* error 1
//! 	* error 2
//!
//! ```
//!
//! A single member reads `1 error occurred:`. The trailing blank line is part
//! of the format.
//!
//! # Status of an Aggregate
//!
//! An aggregate resolves to the status of its first member that carries one,
//! otherwise to its first signal, otherwise to the defaults. [`append`]
//! deliberately makes members agree (see its docs).

use crate::{Error, Status};
use smallvec::SmallVec;
use std::error::Error as StdError;
use std::fmt;

/// An ordered list of member errors.
///
/// Members keep their own text and status. Two members fit inline before
/// the list spills to the heap.
#[derive(Clone, Default)]
pub struct AggregateError {
    errors: SmallVec<[Error; 2]>,
}

impl AggregateError {
    /// An empty aggregate.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one member as-is (no flattening, no re-tagging).
    #[inline]
    pub fn push(&mut self, err: Error) {
        self.errors.push(err);
    }

    /// Push `err`, or its members if it is itself an aggregate.
    fn push_spread(&mut self, err: Error) {
        match err {
            Error::Aggregate(nested) => self.errors.extend(nested.errors),
            other => self.errors.push(other),
        }
    }

    /// Members, in order.
    #[inline]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Consume into the member list.
    #[inline]
    pub fn into_errors(self) -> Vec<Error> {
        self.errors.into_vec()
    }

    /// Number of direct members.
    #[inline]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `true` when there are no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over direct members.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    /// Status of the first member that carries one.
    pub fn status(&self) -> Option<Status> {
        self.errors.iter().find_map(Error::status)
    }

    /// Collapse nested aggregates into one flat list of leaves.
    ///
    /// Leaf order is depth-first, left to right, i.e. the order in which the
    /// leaves appear in the summary text.
    pub fn flatten(self) -> Self {
        let mut flat = Self::new();
        flat.collect_leaves(self.errors);
        flat
    }

    fn collect_leaves(&mut self, errors: SmallVec<[Error; 2]>) {
        for err in errors {
            match err {
                Error::Aggregate(nested) => self.collect_leaves(nested.errors),
                leaf => self.errors.push(leaf),
            }
        }
    }

    /// Apply `f` to every direct member.
    pub(crate) fn map_members(self, f: impl FnMut(Error) -> Error) -> Self {
        Self {
            errors: self.errors.into_iter().map(f).collect(),
        }
    }
}

impl From<AggregateError> for Error {
    fn from(aggregate: AggregateError) -> Self {
        Error::Aggregate(Box::new(aggregate))
    }
}

impl FromIterator<Error> for AggregateError {
    fn from_iter<I: IntoIterator<Item = Error>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl Extend<Error> for AggregateError {
    fn extend<I: IntoIterator<Item = Error>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for AggregateError {
    type Item = Error;
    type IntoIter = smallvec::IntoIter<[Error; 2]>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a AggregateError {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.len() == 1 {
            return write!(f, "1 error occurred:\n\t* {}\n\n", self.errors[0]);
        }

        write!(f, "{} errors occurred:\n\t", self.errors.len())?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\t")?;
            }
            write!(f, "* {}", err)?;
        }
        f.write_str("\n\n")
    }
}

impl fmt::Debug for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.errors.iter()).finish()
    }
}

impl StdError for AggregateError {}

// ============================================================================
// Operations
// ============================================================================

/// Combine `err` with more errors into one ordered aggregate.
///
/// - If `err` is an aggregate, its members come first; otherwise `err`
///   itself (when present) is the first member.
/// - Each appended error that is an aggregate contributes its members
///   (one level); anything else is pushed as-is.
/// - **If `err` is a tagged error, every tagged or plain member is
///   re-tagged with `err`'s status.** Signals and foreign members keep
///   their own classification.
///
/// The re-tagging is unlike [`crate::wrap`], which only ever copies a
/// status onto the new outer error. Callers relying on per-member statuses
/// should build an [`AggregateError`] with [`AggregateError::push`] instead.
///
/// # Example
///
/// ```rust
/// use protocol_errors::{append, definitions::http, HttpStatus};
///
/// let agg = append(
///     Some(http::bad_request("e1")),
///     [http::internal_server_error("e2")],
/// );
/// assert!(agg.iter().all(|e| e.status_http() == HttpStatus::BAD_REQUEST));
/// ```
pub fn append(err: Option<Error>, errs: impl IntoIterator<Item = Error>) -> AggregateError {
    let forced = match &err {
        Some(Error::Tagged(tagged)) => Some(tagged.status()),
        _ => None,
    };

    let mut aggregate = match err {
        Some(Error::Aggregate(existing)) => *existing,
        Some(first) => {
            let mut fresh = AggregateError::new();
            fresh.push(first);
            fresh
        }
        None => AggregateError::new(),
    };
    for err in errs {
        aggregate.push_spread(err);
    }

    match forced {
        Some(status) => aggregate.map_members(|member| member.retagged(status)),
        None => aggregate,
    }
}

/// Collapse nested aggregates in `err` into one flat aggregate.
///
/// Anything that is not an aggregate is returned unchanged. Recurses once
/// per nesting level, as do `Display` and drop.
pub fn flatten(err: Error) -> Error {
    match err {
        Error::Aggregate(aggregate) => Error::from(aggregate.flatten()),
        other => other,
    }
}

// ============================================================================
// Tests
// ============================================================================
