/// Fortune Booth example — demonstrates nested dynamic values.
///
/// The `omen` variable samples structured values; templates reach into
/// them with dotted paths like `{{ dynamic.omen.meaning }}`. Runs on
/// entropy, so every invocation tells different fortunes.
///
/// Run with: cargo run --example fortune_booth

use outcome_engine::core::document::TemplateDocument;
use outcome_engine::core::generator::OutcomeGenerator;
use outcome_engine::schema::outcome::Outcome;
use std::path::Path;

fn main() {
    let document = TemplateDocument::load_from_json(Path::new("templates/fortune_booth.json"))
        .expect("Failed to load fortune booth template");

    let generator = OutcomeGenerator::new(document);

    println!("========================================");
    println!("   FORTUNE BOOTH");
    println!("   Insert coin, receive destiny");
    println!("========================================");
    println!();

    // --- Three coin drops ---
    for coin in 1..=3 {
        let outcome = generator.generate().expect("Failed to generate fortune");
        print_fortune(coin, &outcome);
    }

    // --- The warning lever always dispenses a warning ---
    let outcome = generator
        .generate_typed("warning")
        .expect("Failed to generate warning");
    println!("--- Warning lever ---");
    print_fortune(4, &outcome);
}

fn print_fortune(coin: u32, outcome: &Outcome) {
    println!("--- Coin {} [{}] ---", coin, outcome.outcome_type);
    if let Some(prompt) = outcome.rendered("prompt") {
        println!("{}", prompt);
    }
    if let Some(system) = outcome.rendered("systemPrompt") {
        println!("({})", system);
    }
    if let Some(footer) = outcome.rendered("footer") {
        println!("{}", footer);
    }
    println!();
}
