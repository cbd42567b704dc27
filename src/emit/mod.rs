/// Visual graph to animation-script serialization.
pub mod script;
