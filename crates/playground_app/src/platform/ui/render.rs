use std::fmt::Write as _;

use playground_core::{
    AppViewModel, ExtractedRecipe, ExtractionResponse, FetchStatus, SourceKind, SubmissionView,
};

use super::layout::{welcome_text, BODY_INDENT, RULE};

/// Render the whole view as text, newest card first.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "API key: {}   URL: {}",
        mask_credential(&view.credential),
        if view.url_input.is_empty() {
            "(empty)"
        } else {
            view.url_input.as_str()
        }
    );
    let _ = writeln!(out, "{RULE}");

    if view.submissions.is_empty() {
        let _ = writeln!(out, "{}", welcome_text());
        return out;
    }

    for submission in &view.submissions {
        render_card(&mut out, submission);
        let _ = writeln!(out, "{RULE}");
    }
    out
}

fn render_card(out: &mut String, card: &SubmissionView) {
    let chevron = if card.expanded { "v" } else { ">" };
    let _ = write!(
        out,
        "[#{id}] {chevron} [{badge}] {name}",
        id = card.position_id,
        badge = source_badge(card.source_kind),
        name = card.display_name
    );
    if let Some(response) = &card.response {
        let _ = write!(
            out,
            "   {} tok in / {} tok out",
            response.metadata.prompt_token_count, response.metadata.candidates_token_count
        );
    } else if !card.expanded && card.error.is_some() {
        let _ = write!(out, "   [x] failed");
    }
    let _ = writeln!(out);

    if !card.expanded {
        return;
    }

    let mut body = String::new();
    match (card.status, &card.response, &card.error) {
        (FetchStatus::Loading, _, _) => body.push_str("Loading...\n"),
        (FetchStatus::Idle, _, _) => body.push_str("Waiting to start...\n"),
        (_, Some(response), _) => render_recipe(&mut body, response),
        (_, None, Some(error)) => {
            let _ = writeln!(body, "Error processing recipe");
            let _ = writeln!(body, "{error}");
            let _ = writeln!(body, "Please try again or contact support.");
            let _ = writeln!(body, "Type `retry {}` to try again.", card.position_id);
        }
        (_, None, None) => {}
    }
    for line in body.lines() {
        if line.is_empty() {
            let _ = writeln!(out);
        } else {
            let _ = writeln!(out, "{BODY_INDENT}{line}");
        }
    }
}

fn render_recipe(out: &mut String, response: &ExtractionResponse) {
    let recipe: &ExtractedRecipe = &response.recipe;

    if !recipe.description.is_empty() {
        let _ = writeln!(out, "Description");
        let _ = writeln!(out, "{}\n", recipe.description);
    }

    let _ = writeln!(out, "Servings ........ {}", recipe.servings);
    let _ = writeln!(out, "Total Time ...... {} m", recipe.total_time);
    let _ = writeln!(out, "Prep Time ....... {} m", recipe.prep_time);
    let _ = writeln!(out, "Cook Time ....... {} m", recipe.cook_time);
    if let Some(difficulty) = recipe.difficulty {
        let _ = writeln!(out, "Difficulty ...... {}", difficulty_label(difficulty));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Ingredients");
    for ingredient in &recipe.ingredients {
        let amount = [ingredient.quantity.as_str(), ingredient.unit.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if amount.is_empty() {
            let _ = writeln!(out, "- {}", ingredient.name);
        } else {
            let _ = writeln!(out, "- {} .... {}", ingredient.name, amount);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Instructions");
    let mut step = 0;
    for (index, section) in recipe.sections.iter().enumerate() {
        if index > 0 {
            let _ = writeln!(out);
        }
        for instruction in &section.instructions {
            step += 1;
            let marker = if instruction.optional { "[Optional] " } else { "" };
            let _ = writeln!(out, "{step}. {marker}{}", instruction.text);
        }
    }
    let _ = writeln!(out);

    if !recipe.notes.is_empty() {
        let _ = writeln!(out, "Notes");
        let _ = writeln!(out, "{}", recipe.notes);
        if !recipe.url.is_empty() {
            let _ = writeln!(out, "Source: {}", recipe.url);
        }
        let _ = writeln!(out);
    }

    let nutrition = &recipe.nutritional_info;
    let _ = writeln!(out, "Nutritional Information (100g)");
    let _ = writeln!(out, "Energy          {} kcal", nutrition.calories);
    let _ = writeln!(out, "Protein         {} g", nutrition.protein);
    let _ = writeln!(out, "Carbohydrates   {} g", nutrition.carbohydrates);
    let _ = writeln!(out, "Fats            {} g", nutrition.fats);
    let _ = writeln!(out, "Fiber           {} g", nutrition.fiber);
    let _ = writeln!(out, "Sugar           {} g", nutrition.sugar);
}

fn source_badge(kind: SourceKind) -> &'static str {
    kind.as_str()
}

fn difficulty_label(level: u8) -> &'static str {
    match level {
        0 | 1 => "easy",
        2 => "medium",
        _ => "hard",
    }
}

fn mask_credential(credential: &str) -> String {
    if credential.is_empty() {
        "(not set)".to_string()
    } else {
        "*".repeat(credential.chars().count().min(12))
    }
}
