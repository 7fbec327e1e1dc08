//! Problem generation.
//!
//! A session ramps through the stage table of its difficulty: early problems
//! use the first (easiest) stage, the last problems use the final one.

use mathcards_common::{Difficulty, Mode, Operator, Problem};
use rand::Rng;

/// Generate `count` problems for the given mode and difficulty
pub fn generate(mode: Mode, difficulty: Difficulty, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let stages = difficulty.stages();

    (0..count)
        .map(|index| {
            let stage = stages[stage_index(index, count, stages.len())];
            let operator = pick_operator(mode, rng);
            let a = generate_number(stage.digits_a, rng);
            let b = generate_number(stage.digits_b, rng);
            Problem::new(a, b, operator)
        })
        .collect()
}

/// Stage used at `index` (0-based) of `count` problems.
///
/// `clamp(floor((index + 1) / count * num_stages) - 1, 0, num_stages - 1)`,
/// evaluated in integers so boundaries are exact.
pub fn stage_index(index: usize, count: usize, num_stages: usize) -> usize {
    if count == 0 || num_stages == 0 {
        return 0;
    }
    let scaled = (index + 1) * num_stages / count;
    scaled.saturating_sub(1).min(num_stages - 1)
}

/// Draw a number with exactly `digits` decimal digits (1-9 for a single digit)
pub fn generate_number(digits: u32, rng: &mut impl Rng) -> i64 {
    match digits {
        0 | 1 => rng.random_range(1..=9),
        _ => {
            let low = 10_i64.pow(digits - 1);
            rng.random_range(low..=low * 10 - 1)
        }
    }
}

fn pick_operator(mode: Mode, rng: &mut impl Rng) -> Operator {
    match mode {
        Mode::Sum => Operator::Add,
        Mode::Sub => Operator::Sub,
        Mode::Mix => {
            if rng.random_bool(0.5) {
                Operator::Add
            } else {
                Operator::Sub
            }
        }
    }
}
