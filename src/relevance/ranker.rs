// Ranking — score, filter, stable sort, truncate.

use super::scorer::Scorer;
use super::Relevant;

/// How many related items a page shows unless told otherwise.
pub const DEFAULT_LIMIT: usize = 3;

/// A candidate together with the score that placed it.
#[derive(Debug)]
pub struct Ranked<'a, C> {
    pub item: &'a C,
    pub score: f64,
}

/// Rank `candidates` with an arbitrary scoring function.
///
/// Candidates scoring zero or less are dropped. The sort is stable, so
/// candidates with equal scores keep their input order. An empty result
/// means nothing was related enough to show.
pub fn rank_by<'a, C, F>(candidates: &'a [C], limit: usize, mut score: F) -> Vec<Ranked<'a, C>>
where
    F: FnMut(&C) -> f64,
{
    let mut ranked: Vec<Ranked<'a, C>> = candidates
        .iter()
        .map(|item| Ranked {
            item,
            score: score(item),
        })
        .filter(|r| r.score > 0.0)
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

/// Rank candidates against `source` with the weighted scorer, keeping scores.
pub fn rank_scored<'a, S, C>(
    scorer: &Scorer,
    source: &S,
    candidates: &'a [C],
    limit: usize,
) -> Vec<Ranked<'a, C>>
where
    S: Relevant + ?Sized,
    C: Relevant,
{
    let profile = scorer.profile(source);
    rank_by(candidates, limit, |candidate| {
        scorer.breakdown_against(&profile, candidate).total()
    })
}

/// Rank candidates against `source` with the default weighted scorer.
pub fn rank<'a, S, C>(source: &S, candidates: &'a [C], limit: usize) -> Vec<&'a C>
where
    S: Relevant + ?Sized,
    C: Relevant,
{
    rank_scored(&Scorer::default(), source, candidates, limit)
        .into_iter()
        .map(|r| r.item)
        .collect()
}
