use super::{offline_pages, page_object, page_title, words};
use crate::{ActivityBlueprint, ActivityId, OfflineGenerator};
use rand::Rng;
use serde_json::{Value, json};
use sheetcraft_core::{ActivityOptions, Difficulty, ResultPages, SchemaDescriptor};
use sheetcraft_error::SheetcraftResult;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const PLACEMENT_ATTEMPTS: usize = 200;

/// Hidden words in a square letter grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordSearch;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Right,
    Down,
    DownRight,
    UpRight,
    Left,
    Up,
}

impl Direction {
    fn step(&self) -> (i64, i64) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::UpRight => (-1, 1),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::DownRight => "down_right",
            Direction::UpRight => "up_right",
            Direction::Left => "left",
            Direction::Up => "up",
        }
    }

    fn allowed(difficulty: Difficulty) -> &'static [Direction] {
        use Direction::*;
        match difficulty {
            Difficulty::Beginner => &[Right, Down],
            Difficulty::Medium => &[Right, Down, DownRight],
            Difficulty::Hard | Difficulty::Expert => &[Right, Down, DownRight, UpRight, Left, Up],
        }
    }
}

fn default_grid(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Beginner => 8,
        Difficulty::Medium => 10,
        Difficulty::Hard => 12,
        Difficulty::Expert => 14,
    }
}

impl ActivityBlueprint for WordSearch {
    fn activity_id(&self) -> ActivityId {
        ActivityId::WordSearch
    }

    fn page_schema(&self, _options: &ActivityOptions) -> SchemaDescriptor {
        page_object()
            .required("grid", SchemaDescriptor::array(SchemaDescriptor::string()))
            .required("words", SchemaDescriptor::array(SchemaDescriptor::string()))
            .optional(
                "placements",
                SchemaDescriptor::array(
                    SchemaDescriptor::object()
                        .required("word", SchemaDescriptor::string())
                        .required("row", SchemaDescriptor::integer())
                        .required("col", SchemaDescriptor::integer())
                        .required("direction", SchemaDescriptor::string())
                        .build(),
                ),
            )
            .build()
    }

    fn instructions(&self, options: &ActivityOptions) -> String {
        let size = options.grid_size_or(default_grid(*options.difficulty()));
        format!(
            "Build a {size}x{size} word search with {} words about {}. \
             Each grid row is one string of {size} capital letters. \
             Every listed word must really appear in the grid.",
            options.item_count_or(6),
            options.topic_or("animals"),
        )
    }
}

impl OfflineGenerator for WordSearch {
    fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<ResultPages> {
        let difficulty = *options.difficulty();
        let size = options.grid_size_or(default_grid(difficulty)).clamp(5, 20) as usize;
        let topic = options.topic_or("animals");
        let wanted = options.item_count_or(6) as usize;

        offline_pages(ActivityId::WordSearch, options, |rng, index| {
            let candidates = words::pick_words(rng, topic, wanted, Some(size));
            let mut grid = vec![vec![None::<char>; size]; size];
            let mut placed = Vec::new();

            for word in candidates {
                if let Some(placement) = place(rng, &mut grid, &word, Direction::allowed(difficulty)) {
                    placed.push(placement);
                }
            }

            let rows: Vec<String> = grid
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| {
                            cell.unwrap_or_else(|| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
                        })
                        .collect()
                })
                .collect();

            let mut page = json!({
                "title": page_title(ActivityId::WordSearch, topic, index, options),
                "instructions": "Find and circle every word from the list.",
                "grid": rows,
                "words": placed.iter().map(|p| p["word"].clone()).collect::<Vec<_>>(),
            });
            if *options.include_answer_key() {
                page["placements"] = Value::Array(placed);
            }
            page
        })
    }
}

fn place<R: Rng>(
    rng: &mut R,
    grid: &mut [Vec<Option<char>>],
    word: &str,
    directions: &[Direction],
) -> Option<Value> {
    let size = grid.len() as i64;
    let letters: Vec<char> = word.chars().collect();
    let len = letters.len() as i64;

    for _ in 0..PLACEMENT_ATTEMPTS {
        let direction = directions[rng.gen_range(0..directions.len())];
        let (dr, dc) = direction.step();
        let row = rng.gen_range(0..size);
        let col = rng.gen_range(0..size);
        let end_row = row + dr * (len - 1);
        let end_col = col + dc * (len - 1);
        if !(0..size).contains(&end_row) || !(0..size).contains(&end_col) {
            continue;
        }

        let fits = letters.iter().enumerate().all(|(i, letter)| {
            let cell = grid[(row + dr * i as i64) as usize][(col + dc * i as i64) as usize];
            cell.is_none() || cell == Some(*letter)
        });
        if !fits {
            continue;
        }

        for (i, letter) in letters.iter().enumerate() {
            grid[(row + dr * i as i64) as usize][(col + dc * i as i64) as usize] = Some(*letter);
        }
        return Some(json!({
            "word": word,
            "row": row,
            "col": col,
            "direction": direction.name(),
        }));
    }
    None
}
