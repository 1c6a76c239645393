// Player name search.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::dataset::BattingTable;
use crate::stats::StatsError;

/// Compile `query` as a case-insensitive pattern. A query that is not a valid
/// pattern is matched literally; `None` only when even that exceeds the
/// compiled size limit.
fn build_matcher(query: &str) -> Option<Regex> {
    let compile = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();
    match compile(query) {
        Ok(re) => Some(re),
        Err(err) => {
            debug!("search query {query:?} is not a valid pattern ({err}); matching literally");
            compile(&regex::escape(query)).ok()
        }
    }
}

/// Distinct player names containing `query`, sorted ascending.
///
/// An empty query matches every name.
pub fn search_player_names(table: &BattingTable, query: &str) -> Result<Vec<String>, StatsError> {
    let names: BTreeSet<&str> = match build_matcher(query) {
        Some(matcher) => table
            .iter()
            .map(|r| r.player.as_str())
            .filter(|name| matcher.is_match(name))
            .collect(),
        None => BTreeSet::new(),
    };

    if names.is_empty() {
        return Err(StatsError::NoSearchMatches(query.to_string()));
    }
    debug!("search {query:?} matched {} player(s)", names.len());
    Ok(names.into_iter().map(str::to_string).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record;

    fn table(names: &[&str]) -> BattingTable {
        names.iter().map(|n| record(n, 2016)).collect()
    }

    #[test]
    fn finds_substring_case_insensitively() {
        let t = table(&["Virat Kohli", "Shubman Gill", "Virat Kohli"]);
        assert_eq!(search_player_names(&t, "koh").unwrap(), vec!["Virat Kohli"]);
        assert_eq!(search_player_names(&t, "GILL").unwrap(), vec!["Shubman Gill"]);
    }

    #[test]
    fn results_are_distinct_and_sorted() {
        let t = table(&["Rohit Sharma", "Ishant Sharma", "Rohit Sharma", "Mohit Sharma"]);
        assert_eq!(
            search_player_names(&t, "sharma").unwrap(),
            vec!["Ishant Sharma", "Mohit Sharma", "Rohit Sharma"]
        );
    }

    #[test]
    fn no_match_is_not_found() {
        let t = table(&["Virat Kohli"]);
        let err = search_player_names(&t, "zzz").unwrap_err();
        assert_eq!(err, StatsError::NoSearchMatches("zzz".into()));
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_query_matches_everyone() {
        let t = table(&["B", "A", "B"]);
        assert_eq!(search_player_names(&t, "").unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn patterns_are_honoured() {
        let t = table(&["Virat Kohli", "Vijay Shankar", "KL Rahul"]);
        assert_eq!(
            search_player_names(&t, "^vi").unwrap(),
            vec!["Vijay Shankar", "Virat Kohli"]
        );
    }

    #[test]
    fn invalid_pattern_matched_literally() {
        let t = table(&["AB de Villiers (c)", "Faf du Plessis"]);
        assert_eq!(
            search_player_names(&t, "(c").unwrap(),
            vec!["AB de Villiers (c)"]
        );
        assert!(search_player_names(&t, "[").unwrap_err().is_not_found());
    }
}
