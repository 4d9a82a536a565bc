// Engine modules: input

pub mod input;
