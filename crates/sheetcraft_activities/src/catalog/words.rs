//! Topic word banks for offline generation.

use rand::Rng;
use rand::seq::SliceRandom;

struct Bank {
    keys: &'static [&'static str],
    words: &'static [&'static str],
}

const BANKS: &[Bank] = &[
    Bank {
        keys: &["animal", "pet", "zoo", "wildlife"],
        words: &[
            "cat", "dog", "lion", "tiger", "zebra", "horse", "rabbit", "monkey", "panda",
            "giraffe", "camel", "otter", "parrot", "turtle", "wolf", "koala",
        ],
    },
    Bank {
        keys: &["farm", "garden", "plant"],
        words: &[
            "barn", "cow", "goat", "sheep", "tractor", "hay", "seed", "corn", "carrot",
            "pumpkin", "hen", "duck", "pig", "fence", "field", "apple",
        ],
    },
    Bank {
        keys: &["ocean", "sea", "beach", "water", "fish"],
        words: &[
            "whale", "shark", "crab", "coral", "wave", "shell", "squid", "seal", "sand",
            "dolphin", "tide", "reef", "boat", "starfish", "anchor", "kelp",
        ],
    },
    Bank {
        keys: &["space", "planet", "star", "astronomy"],
        words: &[
            "moon", "sun", "comet", "orbit", "rocket", "mars", "venus", "galaxy", "saturn",
            "jupiter", "meteor", "crater", "earth", "nebula", "pluto", "astronaut",
        ],
    },
    Bank {
        keys: &["food", "fruit", "kitchen", "cook", "meal"],
        words: &[
            "bread", "cheese", "pasta", "soup", "salad", "grape", "lemon", "melon", "rice",
            "honey", "butter", "pizza", "cookie", "banana", "peach", "bean",
        ],
    },
    Bank {
        keys: &["weather", "season", "climate"],
        words: &[
            "rain", "snow", "cloud", "storm", "windy", "sunny", "frost", "thunder", "fog",
            "breeze", "summer", "winter", "autumn", "spring", "rainbow", "puddle",
        ],
    },
    Bank {
        keys: &["sport", "game", "play"],
        words: &[
            "ball", "goal", "team", "run", "swim", "jump", "bat", "net", "race", "skate",
            "tennis", "soccer", "coach", "medal", "score", "kick",
        ],
    },
];

const GENERAL: &[&str] = &[
    "house", "tree", "book", "chair", "river", "clock", "pencil", "bridge", "window",
    "garden", "school", "train", "flower", "candle", "mirror", "basket",
];

/// Words for a topic; a general list when no bank matches.
pub fn bank_for(topic: &str) -> &'static [&'static str] {
    let topic = topic.to_lowercase();
    BANKS
        .iter()
        .find(|bank| bank.keys.iter().any(|key| topic.contains(key)))
        .map(|bank| bank.words)
        .unwrap_or(GENERAL)
}

/// A different bank from the one for `topic`, for distractors.
pub fn other_bank(topic: &str) -> &'static [&'static str] {
    let own = bank_for(topic);
    BANKS
        .iter()
        .map(|bank| bank.words)
        .find(|words| !std::ptr::eq(*words, own))
        .unwrap_or(GENERAL)
}

/// Up to `count` distinct words from the topic's bank, respecting
/// `max_len` when given.
pub fn pick_words<R: Rng>(
    rng: &mut R,
    topic: &str,
    count: usize,
    max_len: Option<usize>,
) -> Vec<String> {
    let mut words: Vec<&str> = bank_for(topic)
        .iter()
        .copied()
        .filter(|w| max_len.is_none_or(|max| w.chars().count() <= max))
        .collect();
    words.shuffle(rng);
    words.into_iter().take(count).map(str::to_uppercase).collect()
}
