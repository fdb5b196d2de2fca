//! Prompt templates for recipe generation

/// System instruction shared by every provider
pub const SYSTEM_PROMPT: &str = "You are a helpful cooking assistant. When given a list of ingredients, \
suggest a creative and practical recipe that uses some or all of those ingredients. You can suggest \
additional common ingredients if needed. Format your response in markdown with clear sections for \
ingredients and instructions.";

/// Prompt pieces for one recipe request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePrompt {
    /// System instruction
    pub system: String,

    /// User turn listing the ingredients
    pub user: String,
}

impl RecipePrompt {
    /// Build the prompt for an ingredient list
    pub fn for_ingredients<S: AsRef<str>>(ingredients: &[S]) -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            user: user_prompt(ingredients),
        }
    }

    /// System instruction and user turn as one text-generation input
    pub fn combined(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }
}

/// User message: "I have a, b. Please give me a recipe you'd recommend I make!"
pub fn user_prompt<S: AsRef<str>>(ingredients: &[S]) -> String {
    let joined = ingredients
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "I have {}. Please give me a recipe you'd recommend I make!",
        joined
    )
}
