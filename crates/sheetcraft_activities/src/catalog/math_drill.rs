use super::{offline_pages, page_object, page_title};
use crate::{ActivityBlueprint, ActivityId, OfflineGenerator};
use rand::Rng;
use serde_json::{Value, json};
use sheetcraft_core::{ActivityOptions, Difficulty, ResultPages, SchemaDescriptor};
use sheetcraft_error::SheetcraftResult;

/// Arithmetic practice problems.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathDrill;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '×',
            Operation::Divide => '÷',
        }
    }

    fn from_variant(variant: &str) -> Option<Self> {
        match variant.to_lowercase().as_str() {
            "addition" | "add" => Some(Operation::Add),
            "subtraction" | "subtract" => Some(Operation::Subtract),
            "multiplication" | "multiply" => Some(Operation::Multiply),
            "division" | "divide" => Some(Operation::Divide),
            _ => None,
        }
    }

    fn for_difficulty(difficulty: Difficulty) -> &'static [Operation] {
        use Operation::*;
        match difficulty {
            Difficulty::Beginner => &[Add],
            Difficulty::Medium => &[Add, Subtract],
            Difficulty::Hard => &[Add, Subtract, Multiply],
            Difficulty::Expert => &[Add, Subtract, Multiply, Divide],
        }
    }
}

fn default_max(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Beginner => 10,
        Difficulty::Medium => 20,
        Difficulty::Hard => 50,
        Difficulty::Expert => 100,
    }
}

fn problem<R: Rng>(rng: &mut R, operation: Operation, max: u32) -> (u32, u32, u32) {
    match operation {
        Operation::Add => {
            let a = rng.gen_range(0..=max);
            let b = rng.gen_range(0..=max - a);
            (a, b, a + b)
        }
        Operation::Subtract => {
            let a = rng.gen_range(0..=max);
            let b = rng.gen_range(0..=a);
            (a, b, a - b)
        }
        Operation::Multiply => {
            let factor_max = ((max as f64).sqrt() as u32).max(2);
            let a = rng.gen_range(1..=factor_max);
            let b = rng.gen_range(1..=factor_max);
            (a, b, a * b)
        }
        Operation::Divide => {
            let factor_max = ((max as f64).sqrt() as u32).max(2);
            let divisor = rng.gen_range(1..=factor_max);
            let quotient = rng.gen_range(1..=factor_max);
            (divisor * quotient, divisor, quotient)
        }
    }
}

impl ActivityBlueprint for MathDrill {
    fn activity_id(&self) -> ActivityId {
        ActivityId::MathDrill
    }

    fn page_schema(&self, _options: &ActivityOptions) -> SchemaDescriptor {
        page_object()
            .required(
                "problems",
                SchemaDescriptor::array(
                    SchemaDescriptor::object()
                        .required("question", SchemaDescriptor::string())
                        .required("answer", SchemaDescriptor::number())
                        .optional("story", SchemaDescriptor::string())
                        .build(),
                ),
            )
            .build()
    }

    fn instructions(&self, options: &ActivityOptions) -> String {
        let max = options.max_number_or(default_max(*options.difficulty()));
        let focus = options
            .variant()
            .clone()
            .unwrap_or_else(|| "mixed operations".to_string());
        format!(
            "Write {} arithmetic problems ({focus}) using numbers up to {max}. \
             Where it helps, set a problem in a short story about {}. \
             Answers are whole numbers.",
            options.item_count_or(10),
            options.topic_or("everyday life"),
        )
    }
}

impl OfflineGenerator for MathDrill {
    fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<ResultPages> {
        let difficulty = *options.difficulty();
        let max = options.max_number_or(default_max(difficulty));
        let count = options.item_count_or(10);
        let fixed = options.variant().as_deref().and_then(Operation::from_variant);
        let operations = Operation::for_difficulty(difficulty);

        offline_pages(ActivityId::MathDrill, options, |rng, index| {
            let problems: Vec<Value> = (0..count)
                .map(|_| {
                    let operation =
                        fixed.unwrap_or_else(|| operations[rng.gen_range(0..operations.len())]);
                    let (a, b, answer) = problem(rng, operation, max);
                    json!({
                        "question": format!("{} {} {} = ___", a, operation.symbol(), b),
                        "answer": answer,
                    })
                })
                .collect();

            json!({
                "title": page_title(ActivityId::MathDrill, "practice", index, options),
                "instructions": "Solve each problem and write the answer on the line.",
                "problems": problems,
            })
        })
    }
}
