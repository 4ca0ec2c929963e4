use serde::{Deserialize, Serialize};

/// A single puzzle as served by the upstream API: an image URL and the
/// digit that solves it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Puzzle {
    pub question: String,
    pub solution: i64,
}
