//! Rule-based difficulty controller.
//!
//! A pure function of `(current level, history tail, streak count,
//! confidence mode)`. Rules fire in precedence order: confidence-mode
//! handling, correct-streak advancement, incorrect-streak reduction or
//! lock, windowed accuracy, then hold.

use crate::adaptive::types::{AdjustmentAction, DifficultyAdjustment};
use crate::level::DifficultyLevel;
use crate::session::PerformanceRecord;

const STREAK_ADVANCE_FAST: usize = 7;
const STREAK_ADVANCE_MID: usize = 5;
const STREAK_ADVANCE_SLOW: usize = 3;
const STREAK_LOCK: usize = 4;
const STREAK_REDUCE_FAST: usize = 3;
const STREAK_REDUCE_SLOW: usize = 2;

const ACCURACY_WINDOW: usize = 10;
const ACCURACY_LOW: f64 = 0.5;
const ACCURACY_HIGH: f64 = 0.8;

const CONFIDENCE_WINDOW: usize = 20;
const CONFIDENCE_EXIT_ACCURACY: f64 = 0.8;

/// Accuracy over no history defaults to an uninformative midpoint.
const DEFAULT_ACCURACY: f64 = 0.5;

pub fn recommend(
    current_level: DifficultyLevel,
    records: &[PerformanceRecord],
    streak_count: i32,
    confidence_mode: bool,
) -> DifficultyAdjustment {
    let (correct_run, incorrect_run) = tail_runs(records, streak_count);
    let evidence = records.len();

    if confidence_mode {
        let recent = accuracy_over(records, CONFIDENCE_WINDOW);
        return if recent >= CONFIDENCE_EXIT_ACCURACY {
            adjustment(
                AdjustmentAction::Maintain,
                current_level,
                current_level,
                format!(
                    "recent accuracy {:.0}% shows the learner is ready to exit confidence mode",
                    recent * 100.0
                ),
                confidence(0.8, evidence),
                "disable confidence mode to resume difficulty progression".to_string(),
            )
        } else {
            adjustment(
                AdjustmentAction::Maintain,
                current_level,
                current_level,
                "still building confidence at the current level".to_string(),
                confidence(0.6, evidence),
                "keep practising at this level until accuracy recovers".to_string(),
            )
        };
    }

    if correct_run >= STREAK_ADVANCE_SLOW {
        let (increment, base) = if correct_run >= STREAK_ADVANCE_FAST {
            (0.3, 0.9)
        } else if correct_run >= STREAK_ADVANCE_MID {
            (0.2, 0.8)
        } else {
            (0.1, 0.7)
        };
        return adjustment(
            AdjustmentAction::Advance,
            current_level,
            current_level.offset(increment),
            format!("{correct_run} consecutive correct answers"),
            confidence(base, evidence),
            "offer harder questions to keep the learner challenged".to_string(),
        );
    }

    if incorrect_run >= STREAK_LOCK {
        return adjustment(
            AdjustmentAction::Lock,
            current_level,
            current_level,
            format!("{incorrect_run} consecutive incorrect answers"),
            confidence(0.9, evidence),
            "hold difficulty steady and enter confidence mode".to_string(),
        );
    }
    if incorrect_run >= STREAK_REDUCE_SLOW {
        let (decrement, base) = if incorrect_run >= STREAK_REDUCE_FAST {
            (0.2, 0.8)
        } else {
            (0.1, 0.7)
        };
        return adjustment(
            AdjustmentAction::Reduce,
            current_level,
            current_level.offset(-decrement),
            format!("{incorrect_run} consecutive incorrect answers"),
            confidence(base, evidence),
            "step difficulty down to rebuild momentum".to_string(),
        );
    }

    let recent = accuracy_over(records, ACCURACY_WINDOW);
    if recent < ACCURACY_LOW {
        return adjustment(
            AdjustmentAction::Reduce,
            current_level,
            current_level.offset(-0.1),
            format!("recent accuracy {:.0}% below 50%", recent * 100.0),
            confidence(0.6, evidence),
            "slightly easier questions should restore accuracy".to_string(),
        );
    }
    if recent > ACCURACY_HIGH {
        return adjustment(
            AdjustmentAction::Advance,
            current_level,
            current_level.offset(0.1),
            format!("recent accuracy {:.0}% above 80%", recent * 100.0),
            confidence(0.6, evidence),
            "a small difficulty increase keeps practice productive".to_string(),
        );
    }

    adjustment(
        AdjustmentAction::Maintain,
        current_level,
        current_level,
        "performance is steady at the current level".to_string(),
        confidence(0.5, evidence),
        "continue at the current level".to_string(),
    )
}

/// Lengths of the correct / incorrect runs at the tail of the log. With an
/// empty slice the signed streak counter stands in for the missing history.
fn tail_runs(records: &[PerformanceRecord], streak_count: i32) -> (usize, usize) {
    if records.is_empty() {
        return if streak_count > 0 {
            (streak_count as usize, 0)
        } else {
            (0, (-streak_count).max(0) as usize)
        };
    }

    let mut iter = records.iter().rev();
    let Some(last) = iter.next() else {
        return (0, 0);
    };
    let mut run = 1;
    for record in iter {
        if record.is_correct == last.is_correct {
            run += 1;
        } else {
            break;
        }
    }
    if last.is_correct {
        (run, 0)
    } else {
        (0, run)
    }
}

/// Accuracy over the most recent `window` attempts; 0.5 with no history.
fn accuracy_over(records: &[PerformanceRecord], window: usize) -> f64 {
    let start = records.len().saturating_sub(window);
    let tail = &records[start..];
    if tail.is_empty() {
        return DEFAULT_ACCURACY;
    }
    tail.iter().filter(|r| r.is_correct).count() as f64 / tail.len() as f64
}

/// Rule confidence scaled by evidence volume, floored so thin histories
/// still express a usable signal.
fn confidence(base: f64, evidence: usize) -> f64 {
    let volume = (evidence as f64 / ACCURACY_WINDOW as f64).clamp(0.3, 1.0);
    (base * volume).max(0.3)
}

fn adjustment(
    action: AdjustmentAction,
    from_level: DifficultyLevel,
    to_level: DifficultyLevel,
    reason: String,
    confidence: f64,
    recommendation: String,
) -> DifficultyAdjustment {
    DifficultyAdjustment {
        action,
        from_level,
        to_level,
        reason,
        confidence,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(results: &[bool]) -> Vec<PerformanceRecord> {
        results
            .iter()
            .enumerate()
            .map(|(i, is_correct)| PerformanceRecord {
                question_id: format!("q{i}"),
                model_id: "ADDITION".to_string(),
                level: DifficultyLevel::new(3, 1),
                is_correct: *is_correct,
                time_spent_ms: 4000,
                hint_used: false,
                attempts_required: 1,
                timestamp: 1_700_000_000_000 + i as i64,
            })
            .collect()
    }

    fn level() -> DifficultyLevel {
        DifficultyLevel::new(3, 1)
    }

    #[test]
    fn seven_correct_advance_three_sublevels() {
        let records = history(&[true; 7]);
        let adj = recommend(level(), &records, 7, false);
        assert_eq!(adj.action, AdjustmentAction::Advance);
        assert_eq!(adj.to_level, DifficultyLevel::new(3, 4));
        assert!(adj.to_level > adj.from_level);
    }

    #[test]
    fn five_correct_advance_two_sublevels() {
        let records = history(&[false, true, true, true, true, true]);
        let adj = recommend(level(), &records, 5, false);
        assert_eq!(adj.action, AdjustmentAction::Advance);
        assert_eq!(adj.to_level, DifficultyLevel::new(3, 3));
    }

    #[test]
    fn three_correct_advance_one_sublevel() {
        let records = history(&[false, true, true, true]);
        let adj = recommend(level(), &records, 3, false);
        assert_eq!(adj.action, AdjustmentAction::Advance);
        assert_eq!(adj.to_level, DifficultyLevel::new(3, 2));
    }

    #[test]
    fn four_incorrect_lock_at_current_level() {
        let records = history(&[true, false, false, false, false]);
        let adj = recommend(level(), &records, -4, false);
        assert_eq!(adj.action, AdjustmentAction::Lock);
        assert_eq!(adj.to_level, level());
    }

    #[test]
    fn incorrect_streaks_reduce() {
        let from = DifficultyLevel::new(3, 3);
        let records = history(&[true, false, false, false]);
        let adj = recommend(from, &records, -3, false);
        assert_eq!(adj.action, AdjustmentAction::Reduce);
        assert_eq!(adj.to_level, DifficultyLevel::new(3, 1));

        let records = history(&[true, false, false]);
        let adj = recommend(from, &records, -2, false);
        assert_eq!(adj.action, AdjustmentAction::Reduce);
        assert_eq!(adj.to_level, DifficultyLevel::new(3, 2));
    }

    #[test]
    fn reduction_crosses_year_boundaries() {
        // 3.1 - 0.2 lands on 2.9; the sub-level clamp settles on 2.4.
        let records = history(&[true, false, false, false]);
        let adj = recommend(DifficultyLevel::new(3, 1), &records, -3, false);
        assert_eq!(adj.to_level, DifficultyLevel::new(2, 4));
    }

    #[test]
    fn low_windowed_accuracy_reduces_without_a_streak() {
        // Alternating tail: no streak of 2, accuracy 40% over the window.
        let records = history(&[
            false, true, false, true, false, false, true, false, true, false,
        ]);
        let adj = recommend(DifficultyLevel::new(3, 2), &records, -1, false);
        assert_eq!(adj.action, AdjustmentAction::Reduce);
        assert_eq!(adj.to_level, DifficultyLevel::new(3, 1));
    }

    #[test]
    fn steady_performance_maintains() {
        let records = history(&[true, false, true, false, true, false, true, false]);
        let adj = recommend(level(), &records, 1, false);
        assert_eq!(adj.action, AdjustmentAction::Maintain);
        assert_eq!(adj.to_level, level());
    }

    #[test]
    fn no_history_defaults_to_maintain() {
        let adj = recommend(level(), &[], 0, false);
        assert_eq!(adj.action, AdjustmentAction::Maintain);
    }

    #[test]
    fn empty_slice_falls_back_to_streak_counter() {
        let adj = recommend(level(), &[], 7, false);
        assert_eq!(adj.action, AdjustmentAction::Advance);
        let adj = recommend(level(), &[], -4, false);
        assert_eq!(adj.action, AdjustmentAction::Lock);
    }

    #[test]
    fn confidence_mode_holds_until_ready() {
        let struggling = history(&[false, true, false, false, true, false]);
        let adj = recommend(level(), &struggling, -1, true);
        assert_eq!(adj.action, AdjustmentAction::Maintain);
        assert!(adj.reason.contains("still building confidence"));

        let recovered = history(&[true; 20]);
        let adj = recommend(level(), &recovered, 20, true);
        assert_eq!(adj.action, AdjustmentAction::Maintain);
        assert!(adj.reason.contains("ready to exit"));
    }

    #[test]
    fn confidence_mode_shadows_streak_rules() {
        // Seven straight correct answers would advance, but confidence mode
        // has precedence and only reports exit readiness.
        let records = history(&[true; 7]);
        let adj = recommend(level(), &records, 7, true);
        assert_eq!(adj.action, AdjustmentAction::Maintain);
    }

    #[test]
    fn advancement_clamps_at_ceiling() {
        let records = history(&[true; 7]);
        let adj = recommend(DifficultyLevel::new(6, 4), &records, 7, false);
        assert_eq!(adj.action, AdjustmentAction::Advance);
        assert_eq!(adj.to_level, DifficultyLevel::new(6, 4));
    }

    #[test]
    fn confidence_scales_with_evidence() {
        let thin = recommend(level(), &history(&[true, true, true]), 3, false);
        let mut results = vec![false; 7];
        results.extend([true; 3]);
        let thick = recommend(level(), &history(&results), 3, false);
        // Same rule fires in both cases; more evidence, more confidence.
        assert_eq!(thin.action, AdjustmentAction::Advance);
        assert_eq!(thick.action, AdjustmentAction::Advance);
        assert!(thick.confidence > thin.confidence);
    }
}
