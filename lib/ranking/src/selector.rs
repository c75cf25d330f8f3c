use crate::scorer::ScoredCandidate;
use std::cmp::Ordering;

/// Order candidates by final score, best first, and keep the top `top_k`.
///
/// The sort is stable, so equal scores keep their catalog order.
/// `diversity_factor` is accepted for API compatibility and has no effect.
pub fn select_top_k<'a>(
    mut candidates: Vec<ScoredCandidate<'a>>,
    top_k: usize,
    _diversity_factor: f64,
) -> Vec<ScoredCandidate<'a>> {
    candidates.sort_by(|a, b| {
        b.final_score()
            .partial_cmp(&a.final_score())
            .unwrap_or(Ordering::Equal)
    });
    candidates.truncate(top_k);
    candidates
}
