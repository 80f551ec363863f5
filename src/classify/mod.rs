// Subject-heading classification against the controlled vocabulary.

pub mod classifier;

pub use classifier::{preprocess_topic, TopicAssignment, TopicClassifier};
