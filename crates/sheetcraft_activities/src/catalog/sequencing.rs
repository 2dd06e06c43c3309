use super::{offline_pages, page_object, page_title};
use crate::{ActivityBlueprint, ActivityId, OfflineGenerator};
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use sheetcraft_core::{ActivityOptions, ResultPages, SchemaDescriptor};
use sheetcraft_error::SheetcraftResult;

struct Routine {
    name: &'static str,
    steps: &'static [&'static str],
}

const ROUTINES: &[Routine] = &[
    Routine {
        name: "brushing teeth",
        steps: &[
            "Pick up your toothbrush",
            "Squeeze toothpaste onto the brush",
            "Brush every tooth gently",
            "Spit out the toothpaste",
            "Rinse your mouth with water",
            "Rinse the toothbrush and put it away",
        ],
    },
    Routine {
        name: "making a sandwich",
        steps: &[
            "Take out two slices of bread",
            "Spread butter on the bread",
            "Add cheese and lettuce",
            "Put the second slice on top",
            "Cut the sandwich in half",
            "Put it on a plate",
        ],
    },
    Routine {
        name: "planting a seed",
        steps: &[
            "Fill a pot with soil",
            "Make a small hole with your finger",
            "Drop the seed into the hole",
            "Cover the seed with soil",
            "Water the pot",
            "Place the pot in the sun",
        ],
    },
    Routine {
        name: "getting dressed",
        steps: &[
            "Put on your underwear",
            "Put on your shirt",
            "Put on your trousers",
            "Put on your socks",
            "Put on your shoes",
            "Tie your shoelaces",
        ],
    },
    Routine {
        name: "washing hands",
        steps: &[
            "Turn on the tap",
            "Wet your hands",
            "Rub soap between your hands",
            "Scrub the backs of your hands and between your fingers",
            "Rinse off the soap",
            "Dry your hands with a towel",
        ],
    },
    Routine {
        name: "going to school",
        steps: &[
            "Wake up",
            "Eat breakfast",
            "Pack your school bag",
            "Put on your coat",
            "Walk to the bus stop",
            "Arrive at school",
        ],
    },
];

/// Steps of an everyday routine to put in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequencing;

fn routine_for(topic: &str) -> Option<&'static Routine> {
    let topic = topic.trim().to_lowercase();
    if topic.is_empty() {
        return None;
    }
    ROUTINES
        .iter()
        .find(|r| topic.contains(r.name) || r.name.contains(topic.as_str()))
}

impl ActivityBlueprint for Sequencing {
    fn activity_id(&self) -> ActivityId {
        ActivityId::Sequencing
    }

    fn page_schema(&self, _options: &ActivityOptions) -> SchemaDescriptor {
        page_object()
            .required("routine", SchemaDescriptor::string())
            .required(
                "steps",
                SchemaDescriptor::array(
                    SchemaDescriptor::object()
                        .required("label", SchemaDescriptor::string())
                        .required("text", SchemaDescriptor::string())
                        .build(),
                ),
            )
            .optional("answer_order", SchemaDescriptor::array(SchemaDescriptor::string()))
            .build()
    }

    fn instructions(&self, options: &ActivityOptions) -> String {
        format!(
            "Describe the everyday routine \"{}\" in {} short steps. List the steps \
             out of order, each with a letter label (A, B, C...), and give the \
             correct order of labels as answer_order.",
            options.topic_or("washing hands"),
            options.sequence_length_or(5),
        )
    }
}

impl OfflineGenerator for Sequencing {
    fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<ResultPages> {
        let fixed = routine_for(options.topic_or(""));
        let wanted = options.sequence_length_or(5) as usize;

        offline_pages(ActivityId::Sequencing, options, |rng, index| {
            let routine = match fixed {
                Some(routine) => routine,
                None => &ROUTINES[index as usize % ROUTINES.len()],
            };
            let steps = &routine.steps[..wanted.min(routine.steps.len())];

            let mut order: Vec<usize> = (0..steps.len()).collect();
            order.shuffle(rng);
            if order.len() > 1 && order.windows(2).all(|w| w[0] < w[1]) {
                order.rotate_left(1);
            }

            let labelled: Vec<(String, usize)> = order
                .iter()
                .enumerate()
                .map(|(position, step)| (label(position), *step))
                .collect();
            let mut answer: Vec<&(String, usize)> = labelled.iter().collect();
            answer.sort_by_key(|(_, step)| *step);

            let mut page = json!({
                "title": page_title(ActivityId::Sequencing, routine.name, index, options),
                "instructions": "Number the steps in the order they happen.",
                "routine": routine.name,
                "steps": labelled
                    .iter()
                    .map(|(label, step)| json!({"label": label, "text": steps[*step]}))
                    .collect::<Vec<Value>>(),
            });
            if *options.include_answer_key() {
                page["answer_order"] = json!(answer.iter().map(|(l, _)| l).collect::<Vec<_>>());
            }
            page
        })
    }
}

fn label(position: usize) -> String {
    char::from(b'A' + (position % 26) as u8).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_order_restores_the_routine() {
        let options = ActivityOptions::default()
            .with_topic("planting a seed")
            .with_sequence_length(6u32)
            .with_include_answer_key(true);
        let pages = Sequencing.generate(&options).unwrap();
        let page = pages.first();
        assert_eq!(page["routine"], "planting a seed");

        let steps = page["steps"].as_array().unwrap();
        let restored: Vec<&str> = page["answer_order"]
            .as_array()
            .unwrap()
            .iter()
            .map(|label| {
                let step = steps.iter().find(|s| &s["label"] == label).unwrap();
                step["text"].as_str().unwrap()
            })
            .collect();
        assert_eq!(restored, ROUTINES[2].steps);

        let shown: Vec<&str> = steps.iter().map(|s| s["text"].as_str().unwrap()).collect();
        assert_ne!(shown, ROUTINES[2].steps);
    }

    #[test]
    fn unknown_topic_cycles_routines() {
        let options = ActivityOptions::default().with_worksheet_count(2u32);
        let pages = Sequencing.generate(&options).unwrap();
        assert_eq!(pages.pages()[0]["routine"], ROUTINES[0].name);
        assert_eq!(pages.pages()[1]["routine"], ROUTINES[1].name);
    }
}
