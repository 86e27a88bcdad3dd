use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::generators::currency::{
    coin_count, greedy_decomposition, normalized_key, UK_DENOMINATIONS,
};
use crate::generators::types::{CoinGroup, IntRange, Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

const ALTERNATIVE_ATTEMPTS: usize = 25;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub target_range: IntRange,
    pub denominations: Vec<u32>,
    /// Feasibility cap on the minimum-coin solution.
    pub max_coins: u32,
    /// Also enumerate randomized alternative decompositions.
    pub multiple_solutions: bool,
    pub max_solutions: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            target_range: IntRange { min: 1, max: 20 },
            denominations: vec![1, 2, 5, 10, 20],
            max_coins: 10,
            multiple_solutions: false,
            max_solutions: 3,
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            target_range: IntRange { min: 1, max: 10 },
            denominations: vec![1, 2, 5, 10],
            ..Params::default()
        },
        2 => Params {
            target_range: IntRange { min: 1, max: 20 },
            ..Params::default()
        },
        3 => Params {
            target_range: IntRange { min: 5, max: 50 },
            denominations: vec![1, 2, 5, 10, 20, 50],
            ..Params::default()
        },
        4 => Params {
            target_range: IntRange { min: 10, max: 100 },
            denominations: UK_DENOMINATIONS.to_vec(),
            max_coins: 12,
            ..Params::default()
        },
        _ => Params {
            target_range: IntRange { min: 20, max: 200 },
            denominations: UK_DENOMINATIONS.to_vec(),
            max_coins: 15,
            multiple_solutions: true,
            ..Params::default()
        },
    }
}

/// Make a target amount from coins. The greedy largest-first pass yields the
/// minimum-coin solution for canonical denomination sets; an inexact greedy
/// result or a blown coin cap means the target is infeasible as posed, and
/// the generator degrades to the all-unit-coins decomposition.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let target = sampler.int_in(
        params.target_range.min.max(1),
        params.target_range.max.max(1),
    ) as u32;

    let (greedy, remaining) = greedy_decomposition(target, &params.denominations);
    let coins = if remaining == 0 && coin_count(&greedy) <= params.max_coins.max(1) {
        greedy
    } else {
        warn!(
            target,
            remaining, "coin target infeasible under denomination set, using unit coins"
        );
        vec![CoinGroup {
            denomination: 1,
            count: target,
        }]
    };

    let detail = if params.multiple_solutions {
        let mut solutions = vec![coins.clone()];
        collect_alternatives(target, &params.denominations, params.max_solutions, sampler, &mut solutions);
        QuestionDetail::Combinations {
            combinations: solutions,
        }
    } else {
        QuestionDetail::Coins {
            total_coins: coin_count(&coins),
            coins,
        }
    };

    QuestionOutput::money(Operation::CoinCounting, vec![target as i64], target as i64, detail)
}

/// Randomized decompositions, de-duplicated by normalized multiset key.
fn collect_alternatives(
    target: u32,
    denominations: &[u32],
    max_solutions: usize,
    sampler: &mut ValueSampler,
    solutions: &mut Vec<Vec<CoinGroup>>,
) {
    let usable: Vec<u32> = denominations.iter().copied().filter(|d| *d > 0).collect();
    if usable.is_empty() {
        return;
    }

    let mut seen: Vec<Vec<(u32, u32)>> = solutions.iter().map(|s| normalized_key(s)).collect();
    for _ in 0..ALTERNATIVE_ATTEMPTS {
        if solutions.len() >= max_solutions.max(1) {
            break;
        }
        if let Some(candidate) = random_decomposition(target, &usable, sampler) {
            let key = normalized_key(&candidate);
            if !seen.contains(&key) {
                seen.push(key);
                solutions.push(candidate);
            }
        }
    }
}

fn random_decomposition(
    target: u32,
    denominations: &[u32],
    sampler: &mut ValueSampler,
) -> Option<Vec<CoinGroup>> {
    let mut remaining = target;
    let mut counts: Vec<(u32, u32)> = Vec::new();
    while remaining > 0 {
        let feasible: Vec<u32> = denominations
            .iter()
            .copied()
            .filter(|d| *d <= remaining)
            .collect();
        let denomination = *sampler.pick(&feasible)?;
        remaining -= denomination;
        match counts.iter_mut().find(|(d, _)| *d == denomination) {
            Some((_, count)) => *count += 1,
            None => counts.push((denomination, 1)),
        }
    }
    counts.sort_unstable_by(|a, b| b.0.cmp(&a.0));
    Some(
        counts
            .into_iter()
            .map(|(denomination, count)| CoinGroup {
                denomination,
                count,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::currency::coin_total;

    #[test]
    fn coins_sum_to_target() {
        let mut sampler = ValueSampler::seeded(50);
        let params = default_params(3);
        for _ in 0..200 {
            let out = generate(&params, &mut sampler);
            let target = out.operands[0] as u32;
            match &out.detail {
                QuestionDetail::Coins { coins, total_coins } => {
                    assert_eq!(coin_total(coins), target);
                    assert_eq!(*total_coins, coin_count(coins));
                }
                other => panic!("unexpected detail: {other:?}"),
            }
        }
    }

    #[test]
    fn infeasible_target_degrades_to_unit_coins() {
        let mut sampler = ValueSampler::seeded(51);
        let params = Params {
            target_range: IntRange { min: 13, max: 13 },
            denominations: vec![5, 10],
            ..Params::default()
        };
        let out = generate(&params, &mut sampler);
        match &out.detail {
            QuestionDetail::Coins { coins, .. } => {
                assert_eq!(
                    coins.as_slice(),
                    &[CoinGroup {
                        denomination: 1,
                        count: 13
                    }]
                );
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn multiple_solutions_are_distinct_and_exact() {
        let mut sampler = ValueSampler::seeded(52);
        let params = Params {
            target_range: IntRange { min: 20, max: 20 },
            denominations: vec![1, 2, 5, 10, 20],
            multiple_solutions: true,
            max_solutions: 4,
            ..Params::default()
        };
        let out = generate(&params, &mut sampler);
        match &out.detail {
            QuestionDetail::Combinations { combinations } => {
                assert!(!combinations.is_empty());
                let mut keys: Vec<_> = combinations.iter().map(|c| normalized_key(c)).collect();
                keys.sort();
                keys.dedup();
                assert_eq!(keys.len(), combinations.len(), "duplicate decomposition");
                for combo in combinations {
                    assert_eq!(coin_total(combo), 20);
                }
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }
}
