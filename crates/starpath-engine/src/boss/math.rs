use serde::Serialize;

use crate::core::rng::Rng;

/// Number of answer buttons.
pub const OPTION_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Multiply,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Multiply => 'x',
        }
    }
}

/// One speed-math question with its shuffled answer buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MathQuestion {
    pub a: i32,
    pub b: i32,
    pub op: Operator,
    pub answer: i32,
    pub options: [i32; OPTION_COUNT],
}

impl MathQuestion {
    /// Operands 2..=10, `+` or `x` with equal odds; two distinct positive
    /// distractors within 5 of the answer.
    pub fn generate(rng: &mut Rng) -> Self {
        let a = rng.range_inclusive(2, 10);
        let b = rng.range_inclusive(2, 10);
        let op = if rng.coin() { Operator::Add } else { Operator::Multiply };
        let answer = match op {
            Operator::Add => a + b,
            Operator::Multiply => a * b,
        };

        let mut options = vec![answer];
        while options.len() < OPTION_COUNT {
            let fake = answer + rng.range_inclusive(-5, 5);
            if fake > 0 && !options.contains(&fake) {
                options.push(fake);
            }
        }
        rng.shuffle(&mut options);

        Self {
            a,
            b,
            op,
            answer,
            options: [options[0], options[1], options[2]],
        }
    }

    /// Whether the button at `index` holds the answer. Out-of-range is simply wrong.
    pub fn is_correct(&self, index: usize) -> bool {
        self.options.get(index) == Some(&self.answer)
    }

    /// Display form, e.g. `7 x 3 = ?`.
    pub fn text(&self) -> String {
        format!("{} {} {} = ?", self.a, self.op.symbol(), self.b)
    }
}
