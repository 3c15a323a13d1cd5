//! Independent root-branch parallelism.
//!
//! Each root gets its own search with its own frontier and visited table on
//! the `rayon` pool. Nothing is shared while the branches run; results are
//! merged only after every branch has finished, so the merged answer does not
//! depend on scheduling.

use rayon::prelude::*;

use crate::contract::SearchProblem;
use crate::error::SearchError;
use crate::path::Path;
use crate::policy::SearchPolicy;
use crate::search::{search, SearchResult};

/// Run one search per root. Results come back in root order.
pub fn search_branches<P>(
    roots: Vec<P::State>,
    problem: &P,
    policy: &SearchPolicy,
) -> Vec<Result<SearchResult<P::State, P::Action>, SearchError>>
where
    P: SearchProblem + Sync,
    P::State: Send,
    P::Action: Send,
{
    roots
        .into_par_iter()
        .map(|root| search(root, problem, policy))
        .collect()
}

/// The cheapest path found by any branch, with its branch index.
///
/// Equal costs go to the lowest branch index. Failed or pathless branches
/// are skipped.
#[must_use]
pub fn best_path<S, M>(
    results: &[Result<SearchResult<S, M>, SearchError>],
) -> Option<(usize, &Path<S, M>)> {
    results
        .iter()
        .enumerate()
        .filter_map(|(index, result)| {
            let path = result.as_ref().ok()?.path()?;
            Some((index, path))
        })
        .min_by_key(|(index, path)| (path.total_cost(), *index))
}
