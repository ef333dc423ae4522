//! Example incident command

use rand::Rng;
use ticketify_core::samples;
use ticketify_core::Language;

/// Pick a bundled example, at random unless an index is given
pub fn pick_example(language: Language, index: Option<usize>) -> &'static str {
    let seed = index.unwrap_or_else(|| rand::rng().random_range(0..samples::examples(language).len()));
    samples::example(language, seed)
}

/// Handle example command
pub fn handle_example_command(language: Language, index: Option<usize>) {
    println!("{}", pick_example(language, index));
}
