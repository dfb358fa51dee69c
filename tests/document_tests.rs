/// Document integration tests — loading and checking the shipped
/// template documents.

use outcome_engine::core::document::TemplateDocument;
use outcome_engine::core::template::Template;
use std::collections::HashSet;
use std::path::Path;

#[test]
fn shipped_party_printer_template_loads_clean() {
    let document =
        TemplateDocument::load_from_json(Path::new("templates/party_printer.json")).unwrap();

    assert_eq!(document.types(), vec!["joke", "image", "meme"]);
    assert_eq!(document.dynamics.len(), 3);
    assert!(document.statics.contains_key("persona"));
    assert!(document.unbound_paths().is_empty());
}

#[test]
fn shipped_fortune_booth_template_loads_clean() {
    let document =
        TemplateDocument::load_from_json(Path::new("templates/fortune_booth.json")).unwrap();

    assert_eq!(document.types(), vec!["fortune", "warning"]);
    assert!(document.dynamics.contains_key("omen"));
    assert!(document.unbound_paths().is_empty());
}

#[test]
fn shipped_templates_reference_every_dynamic_variable() {
    for path in ["templates/party_printer.json", "templates/fortune_booth.json"] {
        let document = TemplateDocument::load_from_json(Path::new(path)).unwrap();

        let mut referenced = HashSet::new();
        for outcome in &document.outcomes {
            for (_, value) in outcome.template_fields() {
                let template = Template::parse(value.as_str().unwrap()).unwrap();
                for var in template.variables() {
                    let mut parts = var.split('.');
                    if parts.next() == Some("dynamic") {
                        referenced.insert(parts.next().unwrap().to_string());
                    }
                }
            }
        }

        for name in document.dynamics.keys() {
            assert!(
                referenced.contains(name),
                "dynamic variable '{}' is unused in {}",
                name,
                path
            );
        }
    }
}

#[test]
fn unbound_reference_loads_but_is_reported() {
    // Binding problems are a generation-time failure, not a load
    // failure; the document itself is well-formed.
    let document =
        TemplateDocument::load_from_json(Path::new("tests/fixtures/unbound.json")).unwrap();

    let unbound = document.unbound_paths();
    assert_eq!(unbound.len(), 1);
    assert_eq!(unbound[0].outcome_type, "joke");
    assert_eq!(unbound[0].field, "promptTemplate");
    assert_eq!(unbound[0].path, "dynamic.missing");
}

#[test]
fn shipped_templates_keep_every_type_selectable() {
    for path in ["templates/party_printer.json", "templates/fortune_booth.json"] {
        let document = TemplateDocument::load_from_json(Path::new(path)).unwrap();
        for type_name in document.types() {
            let total: f64 = document
                .outcomes
                .iter()
                .filter(|outcome| outcome.outcome_type == type_name)
                .map(|outcome| outcome.weight)
                .sum();
            assert!(
                total > 0.0,
                "type '{}' in {} has zero total weight",
                type_name,
                path
            );
        }
    }
}
