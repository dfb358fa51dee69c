/// Template Linter — validates template document coverage and quality.
///
/// Usage: template_linter <template.json>

use outcome_engine::core::document::TemplateDocument;
use outcome_engine::core::template::Template;
use std::collections::HashSet;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: template_linter <template.json>");
        process::exit(0);
    }

    let path = Path::new(&args[1]);
    let document = match TemplateDocument::load_from_json(path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("ERROR: Failed to load template document: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded {} outcomes, {} dynamic variables",
        document.outcomes.len(),
        document.dynamics.len()
    );

    let (errors, warnings) = lint_document(&document);

    println!("\n=== Template Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_document(document: &TemplateDocument) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if document.outcomes.is_empty() {
        errors.push("document defines no outcomes".to_string());
    } else {
        let total: f64 = document.outcomes.iter().map(|outcome| outcome.weight).sum();
        if total <= 0.0 {
            errors.push("outcomes have zero total weight".to_string());
        }
    }

    for unbound in document.unbound_paths() {
        errors.push(format!(
            "outcome type '{}' field '{}' references unbound path '{}'",
            unbound.outcome_type, unbound.field, unbound.path
        ));
    }

    // Per-type selectability
    for type_name in document.types() {
        let total: f64 = document
            .outcomes
            .iter()
            .filter(|outcome| outcome.outcome_type == type_name)
            .map(|outcome| outcome.weight)
            .sum();
        if total <= 0.0 {
            warnings.push(format!(
                "outcomes of type '{}' have zero total weight and can never be selected",
                type_name
            ));
        }
    }

    // Dead or degenerate dynamic variables
    let referenced = referenced_dynamics(document);
    for (name, options) in &document.dynamics {
        if !referenced.contains(name.as_str()) {
            warnings.push(format!(
                "dynamic variable '{}' is never referenced by any template",
                name
            ));
        }
        if options.len() < 2 {
            warnings.push(format!(
                "dynamic variable '{}' has a single option (minimum 2 recommended)",
                name
            ));
        }
    }

    (errors, warnings)
}

fn referenced_dynamics(document: &TemplateDocument) -> HashSet<String> {
    let mut referenced = HashSet::new();
    for outcome in &document.outcomes {
        for (_, value) in outcome.template_fields() {
            let text = match value.as_str() {
                Some(text) => text,
                None => continue,
            };
            let template = match Template::parse(text) {
                Ok(template) => template,
                Err(_) => continue,
            };
            for path in template.variables() {
                let mut parts = path.split('.');
                if parts.next() == Some("dynamic") {
                    if let Some(name) = parts.next() {
                        referenced.insert(name.to_string());
                    }
                }
            }
        }
    }
    referenced
}
