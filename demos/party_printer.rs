/// Party Printer example — demonstrates the joke/image/meme document.
///
/// Simulates a run of button presses on the appliance: each press picks
/// one outcome by weight, samples the dynamic variables, and renders the
/// prompts that would be handed to the generation services.
///
/// Run with: cargo run --example party_printer

use outcome_engine::core::document::TemplateDocument;
use outcome_engine::core::generator::OutcomeGenerator;
use outcome_engine::schema::outcome::{Outcome, RENDERED_SUFFIX, TEMPLATE_SUFFIX};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

fn main() {
    // --- Load the party printer template document ---
    let document = TemplateDocument::load_from_json(Path::new("templates/party_printer.json"))
        .expect("Failed to load party printer template");

    let generator = OutcomeGenerator::new(document);
    let mut rng = StdRng::seed_from_u64(2026);

    println!("========================================");
    println!("   PARTY PRINTER");
    println!("   One receipt per button press");
    println!("========================================");
    println!();

    // --- Six button presses, weighted across joke/image/meme ---
    for press in 1..=6 {
        let outcome = generator
            .generate_with(None, &mut rng)
            .expect("Failed to generate outcome");
        print_receipt(press, &outcome);
    }

    // --- The dedicated meme button ---
    let outcome = generator
        .generate_with(Some("meme"), &mut rng)
        .expect("Failed to generate meme outcome");
    println!("--- Meme button ---");
    print_receipt(7, &outcome);
}

fn print_receipt(press: u32, outcome: &Outcome) {
    println!("--- Press {} [{}] ---", press, outcome.outcome_type);
    if let Some(prompt) = outcome.rendered("prompt") {
        println!("prompt: {}", prompt);
    }
    if let Some(system) = outcome.rendered("systemPrompt") {
        println!("system: {}", system);
    }
    for (field, value) in &outcome.fields {
        if field.ends_with(TEMPLATE_SUFFIX) || field.ends_with(RENDERED_SUFFIX) {
            continue;
        }
        println!("{}: {}", field, value);
    }
    println!();
}
