//! Shared coin arithmetic: greedy decomposition, exhaustive combination
//! search, and pence formatting. All amounts are integer pence.

use crate::generators::types::CoinGroup;

/// UK coin denominations in pence, largest first.
pub const UK_DENOMINATIONS: [u32; 8] = [200, 100, 50, 20, 10, 5, 2, 1];

pub fn denomination_name(pence: u32) -> String {
    match pence {
        200 => "£2".to_string(),
        100 => "£1".to_string(),
        other => format!("{other}p"),
    }
}

pub fn format_pence(pence: i64) -> String {
    if pence < 0 {
        return format!("-{}", format_pence(-pence));
    }
    if pence < 100 {
        format!("{pence}p")
    } else if pence % 100 == 0 {
        format!("£{}", pence / 100)
    } else {
        format!("£{}.{:02}", pence / 100, pence % 100)
    }
}

pub fn coin_total(groups: &[CoinGroup]) -> u32 {
    groups.iter().map(|g| g.denomination * g.count).sum()
}

pub fn coin_count(groups: &[CoinGroup]) -> u32 {
    groups.iter().map(|g| g.count).sum()
}

/// Canonical multiset key for de-duplicating decompositions.
pub fn normalized_key(groups: &[CoinGroup]) -> Vec<(u32, u32)> {
    let mut key: Vec<(u32, u32)> = groups
        .iter()
        .filter(|g| g.count > 0)
        .map(|g| (g.denomination, g.count))
        .collect();
    key.sort_unstable();
    key
}

/// Largest-denomination-first decomposition. Returns the groups and the
/// remainder the greedy pass could not cover (zero means exact).
pub fn greedy_decomposition(target: u32, denominations: &[u32]) -> (Vec<CoinGroup>, u32) {
    let mut sorted: Vec<u32> = denominations.iter().copied().filter(|d| *d > 0).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();

    let mut remaining = target;
    let mut groups = Vec::new();
    for denomination in sorted {
        if remaining == 0 {
            break;
        }
        let count = remaining / denomination;
        if count > 0 {
            groups.push(CoinGroup {
                denomination,
                count,
            });
            remaining -= denomination * count;
        }
    }
    (groups, remaining)
}

/// Exhaustive depth-first enumeration of the ways to form `target` from
/// `denominations`, trying every feasible count of the largest denomination
/// (highest first) before recursing on the remainder. Capped at `cap`
/// captured combinations to bound the search.
pub fn enumerate_combinations(target: u32, denominations: &[u32], cap: usize) -> Vec<Vec<CoinGroup>> {
    let mut sorted: Vec<u32> = denominations.iter().copied().filter(|d| *d > 0).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();

    let mut results = Vec::new();
    if target == 0 || sorted.is_empty() || cap == 0 {
        return results;
    }
    let mut current = Vec::new();
    search(&sorted, 0, target, &mut current, &mut results, cap);
    results
}

fn search(
    denominations: &[u32],
    index: usize,
    remaining: u32,
    current: &mut Vec<CoinGroup>,
    results: &mut Vec<Vec<CoinGroup>>,
    cap: usize,
) {
    if results.len() >= cap {
        return;
    }
    if remaining == 0 {
        results.push(current.clone());
        return;
    }
    if index >= denominations.len() {
        return;
    }

    let denomination = denominations[index];
    let max_count = remaining / denomination;
    for count in (0..=max_count).rev() {
        if count > 0 {
            current.push(CoinGroup {
                denomination,
                count,
            });
        }
        search(
            denominations,
            index + 1,
            remaining - denomination * count,
            current,
            results,
            cap,
        );
        if count > 0 {
            current.pop();
        }
        if results.len() >= cap {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_pence_and_pounds() {
        assert_eq!(format_pence(45), "45p");
        assert_eq!(format_pence(100), "£1");
        assert_eq!(format_pence(145), "£1.45");
        assert_eq!(format_pence(1205), "£12.05");
    }

    #[test]
    fn greedy_is_exact_with_unit_coin() {
        let (groups, remaining) = greedy_decomposition(87, &UK_DENOMINATIONS);
        assert_eq!(remaining, 0);
        assert_eq!(coin_total(&groups), 87);
        // 50 + 20 + 10 + 5 + 2
        assert_eq!(coin_count(&groups), 5);
    }

    #[test]
    fn greedy_reports_remainder_when_infeasible() {
        let (groups, remaining) = greedy_decomposition(13, &[5, 10]);
        assert_eq!(remaining, 3);
        assert_eq!(coin_total(&groups), 10);
    }

    #[test]
    fn enumeration_sums_are_exact() {
        let combinations = enumerate_combinations(10, &[1, 2, 5, 10], 10);
        assert!(!combinations.is_empty());
        for combo in &combinations {
            assert_eq!(coin_total(combo), 10);
        }
    }

    #[test]
    fn enumeration_lists_single_coin_first() {
        let combinations = enumerate_combinations(10, &[1, 2, 5, 10], 10);
        assert_eq!(
            combinations[0],
            vec![CoinGroup {
                denomination: 10,
                count: 1
            }]
        );
    }

    #[test]
    fn enumeration_respects_cap() {
        let combinations = enumerate_combinations(50, &UK_DENOMINATIONS, 10);
        assert_eq!(combinations.len(), 10);
    }

    #[test]
    fn normalized_key_ignores_order_and_zero_counts() {
        let a = vec![
            CoinGroup {
                denomination: 5,
                count: 1,
            },
            CoinGroup {
                denomination: 2,
                count: 2,
            },
        ];
        let b = vec![
            CoinGroup {
                denomination: 2,
                count: 2,
            },
            CoinGroup {
                denomination: 10,
                count: 0,
            },
            CoinGroup {
                denomination: 5,
                count: 1,
            },
        ];
        assert_eq!(normalized_key(&a), normalized_key(&b));
    }
}
