//! Prompt template for a participant's turn

/// Builds the instruction each participant receives on its turn
pub struct PromptTemplate;

impl PromptTemplate {
    /// Fixed instruction preceding the context window
    pub fn instruction() -> &'static str {
        "Continue the discussion below. Keep your reply concise and meaningful:"
    }

    /// Full prompt for one turn: instruction followed by the rendered context
    pub fn turn_prompt(context: &str) -> String {
        format!("{}\n{}", Self::instruction(), context)
    }
}
