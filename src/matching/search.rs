//! Brute-force nearest-candidate search

use crate::io::error::{PuzzleError, Result};
use crate::signature::Signature;

/// Winning candidate of a nearest-match search
#[derive(Debug)]
pub struct Match<'a, C> {
    /// Position of the winner in pool iteration order
    pub index: usize,
    /// The winning candidate
    pub candidate: &'a C,
    /// Distance from the query to the winner
    pub distance: f64,
}

/// Find the candidate whose signature is closest to `query`
///
/// Scans every entry in iteration order, keeping a running minimum seeded at
/// `+inf`. Only a strictly smaller distance replaces the current best, so the
/// first candidate to reach the minimum wins ties. Candidates whose distance
/// is NaN never win.
///
/// # Errors
///
/// Returns `ModeMismatch` if any candidate signature differs in mode from the
/// query, and `EmptyPool` if no candidate could be selected
pub fn nearest<'a, C, I>(query: &Signature, candidates: I) -> Result<Match<'a, C>>
where
    C: 'a,
    I: IntoIterator<Item = (&'a Signature, &'a C)>,
{
    let mut best: Option<Match<'a, C>> = None;
    let mut min_distance = f64::INFINITY;

    for (index, (signature, candidate)) in candidates.into_iter().enumerate() {
        let distance = query.distance(signature)?;
        if distance < min_distance {
            min_distance = distance;
            best = Some(Match {
                index,
                candidate,
                distance,
            });
        }
    }

    best.ok_or(PuzzleError::EmptyPool)
}
