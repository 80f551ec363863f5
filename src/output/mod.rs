// Terminal presentation.

pub mod terminal;
