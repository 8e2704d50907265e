use super::super::domain::Matched;

/// Sorts best first. The sort is stable, so equal scores keep their source order.
pub fn rank_matches<T>(mut matches: Vec<Matched<T>>) -> Vec<Matched<T>> {
    matches.sort_by(|left, right| right.match_score.cmp(&left.match_score));
    matches
}

/// Keeps the first `limit` entries of an already ranked list.
pub fn top_matches<T>(mut ranked: Vec<Matched<T>>, limit: usize) -> Vec<Matched<T>> {
    ranked.truncate(limit);
    ranked
}

/// Applies `score` to every record independently, then ranks the results.
pub fn score_and_rank<T, F>(records: &[T], score: F) -> Vec<Matched<T>>
where
    F: Fn(&T) -> Matched<T>,
{
    rank_matches(records.iter().map(score).collect())
}
