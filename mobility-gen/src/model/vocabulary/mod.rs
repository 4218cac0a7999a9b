mod graph_vocabulary;
mod token_value;

pub use graph_vocabulary::GraphVocabulary;
pub use token_value::TokenValue;

/// dense integer representation of a vocabulary entry, as consumed by an oracle
pub type Token = usize;
