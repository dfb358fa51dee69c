/// Preview — interactive generation shell for testing template documents.
///
/// Usage: preview <template.json> [--seed <n>]
///
/// Commands:
///   <type>    — generate an outcome of that type
///   (empty)   — generate an outcome from the full list
///   seed <n>  — set RNG seed
///   types     — list outcome types in the document
///   help      — list commands
///   quit      — exit

use outcome_engine::core::document::TemplateDocument;
use outcome_engine::core::generator::{GenerateError, OutcomeGenerator};
use outcome_engine::schema::outcome::Outcome;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let template_path = args[1].clone();
    let mut rng: Option<StdRng> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" if i + 1 < args.len() => {
                i += 1;
                let seed = args[i].parse().unwrap_or(42);
                rng = Some(StdRng::seed_from_u64(seed));
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let document = match TemplateDocument::load_from_json(Path::new(&template_path)) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("ERROR loading template {}: {}", template_path, e);
            std::process::exit(1);
        }
    };

    println!(
        "Loaded {} outcomes ({} types), {} dynamic variables",
        document.outcomes.len(),
        document.types().len(),
        document.dynamics.len()
    );
    println!("Press Enter to generate, or type 'help' for commands.\n");

    let generator = OutcomeGenerator::new(document);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();

        // An empty line is the button press: generate from the full list
        if line.is_empty() {
            generate_and_print(&generator, None, &mut rng);
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "types" => {
                for type_name in generator.document().types() {
                    println!("  {}", type_name);
                }
            }
            "seed" => {
                if parts.len() < 2 {
                    println!("Usage: seed <n>");
                    continue;
                }
                match parts[1].parse::<u64>() {
                    Ok(seed) => {
                        rng = Some(StdRng::seed_from_u64(seed));
                        println!("Seed set to {}", seed);
                    }
                    Err(_) => {
                        println!("Invalid seed: {}", parts[1]);
                    }
                }
            }
            _ => {
                // Anything else is an outcome type code
                generate_and_print(&generator, Some(parts[0]), &mut rng);
            }
        }
    }
}

fn generate_and_print(
    generator: &OutcomeGenerator,
    type_filter: Option<&str>,
    rng: &mut Option<StdRng>,
) {
    let result = match rng {
        Some(rng) => generator.generate_with(type_filter, rng),
        None => match type_filter {
            Some(wanted) => generator.generate_typed(wanted),
            None => generator.generate(),
        },
    };

    match result {
        Ok(outcome) => print_outcome(&outcome),
        Err(e) => {
            println!("ERROR: {}", e);
            if let GenerateError::UnknownType(_) = e {
                println!("Known types: {}", generator.document().types().join(", "));
            }
        }
    }
}

fn print_outcome(outcome: &Outcome) {
    println!("\n--- Generated Outcome ---");
    println!("type: {}", outcome.outcome_type);
    println!("weight: {}", outcome.weight);
    for (field, value) in &outcome.fields {
        match value.as_str() {
            Some(text) => println!("{}: {}", field, text),
            None => println!("{}: {}", field, value),
        }
    }
    println!("--- End ---\n");
}

fn print_usage() {
    println!("Preview — interactive generation shell for testing template documents.");
    println!();
    println!("Usage: preview <template.json> [--seed <n>]");
    println!();
    println!("  <template.json>  Path to a template document");
    println!("  --seed <n>       Fixed RNG seed for reproducible runs");
}

fn print_help() {
    println!("Commands:");
    println!("  <type>    Generate an outcome of that type (see 'types')");
    println!("  (empty)   Generate an outcome from the full list");
    println!("  seed <n>  Set RNG seed");
    println!("  types     List outcome types in the document");
    println!("  help      Show this help");
    println!("  quit      Exit");
}
