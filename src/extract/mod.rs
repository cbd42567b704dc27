/// Lexicon scan producing ranked concepts.
pub mod concepts;
