// Vitela: normalization and topic classification for library catalogue exports.
//
// This is the library root. Each module corresponds to a major subsystem
// of the record-cleaning pipeline.

pub mod classify;
pub mod config;
pub mod embedding;
pub mod network;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod schema;
pub mod tables;
pub mod vocabulary;
