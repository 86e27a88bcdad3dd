use serde::{Deserialize, Serialize};

use crate::generators::currency::{denomination_name, UK_DENOMINATIONS};
use crate::generators::types::{Operation, QuestionDetail, QuestionOutput};
use crate::sampler::ValueSampler;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub denominations: Vec<u32>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            denominations: UK_DENOMINATIONS.to_vec(),
        }
    }
}

pub fn default_params(year: u8) -> Params {
    match year.clamp(1, 6) {
        1 => Params {
            denominations: vec![1, 2, 5, 10],
        },
        2 => Params {
            denominations: vec![1, 2, 5, 10, 20, 50],
        },
        _ => Params::default(),
    }
}

/// Identify a coin by its face value.
pub fn generate(params: &Params, sampler: &mut ValueSampler) -> QuestionOutput {
    let denomination = sampler.pick(&params.denominations).copied().unwrap_or(1);
    QuestionOutput::money(
        Operation::CoinRecognition,
        vec![denomination as i64],
        denomination as i64,
        QuestionDetail::Coin {
            name: denomination_name(denomination),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_denominations() {
        let mut sampler = ValueSampler::seeded(80);
        let params = default_params(6);
        for _ in 0..50 {
            let out = generate(&params, &mut sampler);
            let denomination = out.result as u32;
            assert!(params.denominations.contains(&denomination));
            match &out.detail {
                QuestionDetail::Coin { name } => {
                    assert_eq!(*name, denomination_name(denomination));
                }
                other => panic!("unexpected detail: {other:?}"),
            }
        }
    }
}
