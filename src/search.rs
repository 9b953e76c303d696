//! Approximate matching on a single column using Levenshtein distance.

use crate::table::Row;

/// A row that matched a fuzzy search, with its distance to the keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub row_index: usize,
    pub distance: usize,
}

/// Case-insensitive Levenshtein distance between `a` and `b`.
///
/// # Example
/// ```
/// # use flatdb::search::edit_distance;
/// assert_eq!(edit_distance("kitten", "sitting"), 3);
/// assert_eq!(edit_distance("Kitten", "kitten"), 0);
/// ```
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let (m, n) = (a.len(), b.len());

    // dp[i][j] = distance between the first i chars of a and the first j of b
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }
    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[m][n]
}

/// Largest distance still considered a match for `keyword`.
pub fn fuzzy_threshold(keyword: &str) -> usize {
    (keyword.chars().count() / 2).max(2)
}

/// Returns the rows whose cell at `column` lies within [fuzzy_threshold] of
/// `keyword`, closest first. Equal distances keep table order.
pub fn fuzzy_search(rows: &[Row], column: usize, keyword: &str) -> Vec<SearchResult> {
    let threshold = fuzzy_threshold(keyword);
    let mut results: Vec<SearchResult> = rows
        .iter()
        .enumerate()
        .filter_map(|(row_index, row)| {
            let distance = edit_distance(row.get(column)?, keyword);
            (distance <= threshold).then_some(SearchResult {
                row_index,
                distance,
            })
        })
        .collect();
    results.sort_by_key(|r| r.distance);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<Row> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| vec![i.to_string(), v.to_string()])
            .collect()
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("Kitten", "kitten"), 0);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_edit_distance_non_ascii() {
        assert_eq!(edit_distance("Ärger", "ärger"), 0);
        assert_eq!(edit_distance("café", "cafe"), 1);
    }

    #[test]
    fn test_threshold() {
        assert_eq!(fuzzy_threshold("jon"), 2);
        assert_eq!(fuzzy_threshold(""), 2);
        assert_eq!(fuzzy_threshold("elizabeth"), 4);
    }

    #[test]
    fn test_fuzzy_search() {
        let rows = names(&["john", "jane", "jon", "joan", "christopher"]);
        let results = fuzzy_search(&rows, 1, "jon");

        let found: Vec<(usize, usize)> =
            results.iter().map(|r| (r.row_index, r.distance)).collect();
        // jon (0) first, then john and joan (1) in table order, then jane (2)
        assert_eq!(found, vec![(2, 0), (0, 1), (3, 1), (1, 2)]);
        assert!(results.iter().all(|r| r.distance <= 2));
        assert!(!results.iter().any(|r| r.row_index == 4));
    }

    #[test]
    fn test_fuzzy_search_no_match() {
        let rows = names(&["alpha", "beta"]);
        assert!(fuzzy_search(&rows, 1, "zzzzzzzz").is_empty());
    }
}
