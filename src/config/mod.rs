/// Built-in registry contents.
pub(crate) mod builtin;
/// Swappable registries: lexicon, template catalogs, animation library, palette.
pub mod registry;
