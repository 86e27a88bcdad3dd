use serde::{Deserialize, Serialize};

use crate::generators::currency::{greedy_decomposition, UK_DENOMINATIONS};
use crate::generators::types::{CoinGroup, Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

/// Round amounts a customer would realistically hand over, in pence.
const PAYMENT_AMOUNTS: [i64; 9] = [5, 10, 20, 50, 100, 200, 500, 1000, 2000];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub max_cost: i64,
    /// Year-appropriate ceiling keeping payments realistic for the age group.
    pub max_payment: i64,
    pub denominations: Vec<u32>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_cost: 100,
            max_payment: 200,
            denominations: UK_DENOMINATIONS.to_vec(),
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            max_cost: 9,
            max_payment: 20,
            ..Params::default()
        },
        2 => Params {
            max_cost: 18,
            max_payment: 50,
            ..Params::default()
        },
        3 => Params {
            max_cost: 45,
            max_payment: 100,
            ..Params::default()
        },
        4 => Params {
            max_cost: 95,
            max_payment: 200,
            ..Params::default()
        },
        5 => Params {
            max_cost: 450,
            max_payment: 1000,
            ..Params::default()
        },
        _ => Params {
            max_cost: 950,
            max_payment: 2000,
            ..Params::default()
        },
    }
}

/// Buy an item, pay with a round amount, compute the change. The payment is
/// the realistic amount closest to twice the cost that still exceeds it.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let cost = sampler.int_in(1, params.max_cost.max(1));
    let payment = select_payment(cost, params.max_payment);
    let change = payment - cost;

    let breakdown = change_breakdown(change as u32, &params.denominations);
    QuestionOutput::money(
        Operation::ChangeCalculation,
        vec![payment, cost],
        change,
        QuestionDetail::Coins {
            total_coins: breakdown.iter().map(|g| g.count).sum(),
            coins: breakdown,
        },
    )
}

fn select_payment(cost: i64, max_payment: i64) -> i64 {
    let ideal = cost * 2;
    let candidate = PAYMENT_AMOUNTS
        .iter()
        .copied()
        .filter(|p| *p > cost && *p <= max_payment.max(cost + 1))
        .min_by_key(|p| ((p - ideal).abs(), *p));
    // Out-of-range costs fall back to the next whole pound.
    candidate.unwrap_or_else(|| (cost / 100 + 1) * 100)
}

fn change_breakdown(change: u32, denominations: &[u32]) -> Vec<CoinGroup> {
    let (mut groups, remaining) = greedy_decomposition(change, denominations);
    if remaining > 0 {
        // Denomination sets without a unit coin cannot express every change
        // amount; the remainder is handed over in 1p pieces.
        groups.push(CoinGroup {
            denomination: 1,
            count: remaining,
        });
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::currency::coin_total;

    #[test]
    fn payment_always_exceeds_cost() {
        let mut sampler = ValueSampler::seeded(60);
        for year in 1..=6 {
            let params = default_params(year);
            for _ in 0..100 {
                let out = generate(&params, &mut sampler);
                let payment = out.operands[0] as i64;
                let cost = out.operands[1] as i64;
                assert!(payment > cost, "payment {payment} <= cost {cost}");
                assert_eq!(out.result as i64, payment - cost);
            }
        }
    }

    #[test]
    fn payment_prefers_double_the_cost() {
        // Cost 45p, ideal 90p: £1 is the nearest round amount above cost.
        assert_eq!(select_payment(45, 200), 100);
        // Cost 9p, ideal 18p: 20p wins over 10p.
        assert_eq!(select_payment(9, 200), 20);
    }

    #[test]
    fn payment_respects_year_ceiling() {
        // Ideal would be £9 but the ceiling forces the nearest allowed amount.
        assert_eq!(select_payment(450, 500), 500);
    }

    #[test]
    fn change_breakdown_is_exact() {
        let mut sampler = ValueSampler::seeded(61);
        let params = default_params(4);
        for _ in 0..100 {
            let out = generate(&params, &mut sampler);
            match &out.detail {
                QuestionDetail::Coins { coins, .. } => {
                    assert_eq!(coin_total(coins) as f64, out.result);
                }
                other => panic!("unexpected detail: {other:?}"),
            }
        }
    }
}
