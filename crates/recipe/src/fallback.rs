//! Templated recipes used when no provider produced text
//!
//! Rendering is deterministic and never touches the network, so it is total
//! over every ingredient list, including an empty one.

use std::collections::HashMap;

use crate::validate::IngredientList;

/// Pantry staples listed under every fallback recipe
pub const PANTRY_ITEMS: [&str; 2] = ["Salt and pepper to taste", "Olive oil for cooking"];

/// Closing note marking the text as a fallback
pub const FALLBACK_NOTE: &str =
    "*Note: The recipe assistant is temporarily unavailable. This is a basic recipe template.*";

/// Steps of the default template
const DEFAULT_STEPS: [&str; 4] = [
    "Prepare and wash all ingredients",
    "Heat olive oil in a pan over medium heat",
    "Cook the ingredients according to their cooking times, seasoning with salt and pepper",
    "Serve hot and enjoy",
];

/// Built-in table keyed by sorted, comma-joined ingredients
const BUILTIN_TEMPLATES: &[(&str, &str, [&str; 4])] = &[
    (
        "avocado,cucumber,olive oil,potato",
        "Mediterranean Potato Salad with Avocado and Cucumber",
        [
            "Boil the potatoes in salted water until tender, about 15 minutes, then drain and let cool",
            "Dice the cucumber and avocado into bite-sized pieces",
            "Cut the cooled potatoes into cubes and combine them with the cucumber and avocado in a large bowl",
            "Dress with olive oil, season with salt and pepper, toss gently and serve",
        ],
    ),
    (
        "cheese,pasta,tomato",
        "Classic Tomato Pasta with Melted Cheese",
        [
            "Cook the pasta in salted boiling water until al dente, then drain",
            "Chop the tomatoes and simmer them in olive oil for 10 minutes to make a quick sauce",
            "Toss the pasta with the tomato sauce and season with salt and pepper",
            "Top with grated cheese and serve while hot",
        ],
    ),
    (
        "chicken,garlic,rice",
        "Garlic Chicken Rice Bowl",
        [
            "Rinse the rice and cook it with twice its volume of water until tender",
            "Mince the garlic and slice the chicken into strips",
            "Saute the garlic in olive oil, add the chicken and cook until golden and cooked through",
            "Serve the garlic chicken over the rice",
        ],
    ),
    (
        "eggs,onion,spinach",
        "Spinach and Onion Frittata",
        [
            "Slice the onion and soften it in olive oil over medium heat",
            "Add the spinach and stir until wilted",
            "Whisk the eggs with salt and pepper and pour them over the vegetables",
            "Cook on low heat until the eggs are set, then slice and serve",
        ],
    ),
];

/// Title and ordered steps of one recipe template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTemplate {
    pub title: String,
    pub steps: Vec<String>,
}

impl RecipeTemplate {
    pub fn new<S: Into<String>>(title: impl Into<String>, steps: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: title.into(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }

    /// Template used when no table entry matches
    pub fn default_for(ingredients: &IngredientList) -> Self {
        Self::new(format!("Simple {} Recipe", ingredients.joined()), DEFAULT_STEPS)
    }
}

/// Deterministic recipe renderer backed by a read-only template table
#[derive(Debug, Clone)]
pub struct FallbackSynthesizer {
    templates: HashMap<String, RecipeTemplate>,
}

impl Default for FallbackSynthesizer {
    fn default() -> Self {
        let templates = BUILTIN_TEMPLATES
            .iter()
            .map(|(key, title, steps)| (key.to_string(), RecipeTemplate::new(*title, *steps)))
            .collect();
        Self { templates }
    }
}

impl FallbackSynthesizer {
    /// Synthesizer over a custom table
    pub fn with_templates(templates: HashMap<String, RecipeTemplate>) -> Self {
        Self { templates }
    }

    /// Number of table entries
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template for the ingredients, falling back to the default one
    pub fn template_for(&self, ingredients: &IngredientList) -> RecipeTemplate {
        self.templates
            .get(&ingredients.canonical_key())
            .cloned()
            .unwrap_or_else(|| RecipeTemplate::default_for(ingredients))
    }

    /// Render the fallback recipe as Markdown
    pub fn synthesize(&self, ingredients: &IngredientList) -> String {
        let template = self.template_for(ingredients);
        render(&template, ingredients)
    }
}

fn render(template: &RecipeTemplate, ingredients: &IngredientList) -> String {
    let mut out = format!("# {}\n\n", template.title);

    out.push_str("## Ingredients:\n");
    for item in ingredients.as_slice().iter().map(String::as_str).chain(PANTRY_ITEMS) {
        out.push_str(&format!("- {}\n", item));
    }
    out.push('\n');

    out.push_str("## Instructions:\n");
    for (i, step) in template.steps.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }
    out.push('\n');

    out.push_str(FALLBACK_NOTE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section<'a>(text: &'a str, heading: &str) -> Vec<&'a str> {
        text.split(heading)
            .nth(1)
            .unwrap_or_default()
            .lines()
            .skip(1)
            .take_while(|line| !line.is_empty())
            .collect()
    }

    #[test]
    fn test_mediterranean_entry() {
        let synthesizer = FallbackSynthesizer::default();
        let ingredients = IngredientList::from(&["avocado", "potato", "olive oil", "cucumber"][..]);
        let text = synthesizer.synthesize(&ingredients);

        assert!(text.starts_with("# Mediterranean Potato Salad with Avocado and Cucumber\n"));

        let steps = section(&text, "## Instructions:");
        assert_eq!(steps.len(), 4);
        assert_eq!(
            steps[0],
            "1. Boil the potatoes in salted water until tender, about 15 minutes, then drain and let cool"
        );
        assert!(steps[3].starts_with("4. Dress with olive oil"));
    }

    #[test]
    fn test_lookup_ignores_input_order() {
        let synthesizer = FallbackSynthesizer::default();
        let a = IngredientList::from(&["rice", "chicken", "garlic"][..]);
        let b = IngredientList::from(&["garlic", "rice", "chicken"][..]);
        assert_eq!(synthesizer.template_for(&a), synthesizer.template_for(&b));
        assert_eq!(synthesizer.template_for(&a).title, "Garlic Chicken Rice Bowl");
    }

    #[test]
    fn test_ingredients_listed_verbatim_in_input_order() {
        let synthesizer = FallbackSynthesizer::default();
        let ingredients = IngredientList::from(&["Zucchini ", "apple", "apple"][..]);
        let text = synthesizer.synthesize(&ingredients);

        let listed = section(&text, "## Ingredients:");
        assert_eq!(
            listed,
            vec![
                "- Zucchini ",
                "- apple",
                "- apple",
                "- Salt and pepper to taste",
                "- Olive oil for cooking",
            ]
        );
        assert_eq!(ingredients.as_slice()[0], "Zucchini ");
    }

    #[test]
    fn test_default_template() {
        let synthesizer = FallbackSynthesizer::default();
        let ingredients = IngredientList::from(&["beans", "corn"][..]);
        let text = synthesizer.synthesize(&ingredients);

        assert!(text.starts_with("# Simple beans, corn Recipe\n"));
        assert!(text.ends_with(FALLBACK_NOTE));

        let steps = section(&text, "## Instructions:");
        for (i, step) in steps.iter().enumerate() {
            assert!(step.starts_with(&format!("{}. ", i + 1)));
        }
        assert_eq!(steps.len(), DEFAULT_STEPS.len());
    }

    #[test]
    fn test_empty_list() {
        let synthesizer = FallbackSynthesizer::default();
        let text = synthesizer.synthesize(&IngredientList::default());

        assert!(text.starts_with("# Simple  Recipe\n"));
        assert_eq!(
            section(&text, "## Ingredients:"),
            vec!["- Salt and pepper to taste", "- Olive oil for cooking"]
        );
    }

    #[test]
    fn test_deterministic() {
        let synthesizer = FallbackSynthesizer::default();
        let ingredients = IngredientList::from(&["leek", "potato"][..]);
        assert_eq!(synthesizer.synthesize(&ingredients), synthesizer.synthesize(&ingredients));
    }

    #[test]
    fn test_custom_table() {
        let mut templates = HashMap::new();
        templates.insert(
            "bread,butter".to_string(),
            RecipeTemplate::new("Buttered Toast", ["Toast the bread", "Spread the butter"]),
        );
        let synthesizer = FallbackSynthesizer::with_templates(templates);
        assert_eq!(synthesizer.len(), 1);

        let text = synthesizer.synthesize(&IngredientList::from(&["butter", "bread"][..]));
        assert!(text.contains("# Buttered Toast"));
        assert!(text.contains("2. Spread the butter\n"));
    }
}
