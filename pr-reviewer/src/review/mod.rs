pub mod prompt;
pub mod suggestions;

pub use suggestions::SuggestionGenerator;
