pub mod collect;
pub mod commands;
pub mod metadata;
pub mod registry;
pub mod runtime;
