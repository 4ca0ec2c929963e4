use crate::errors::ApiError;
use crate::models::puzzle::Puzzle;

pub const DEFAULT_PUZZLE_API_URL: &str = "https://marcconrad.com/uob/banana/api.php";

/// Anything that can produce the next puzzle. The game runner only depends
/// on this, so tests can swap in canned puzzles.
#[trait_variant::make(PuzzleSource: Send)]
pub trait LocalPuzzleSource {
    async fn fetch_puzzle(&self) -> Result<Puzzle, ApiError>;
}

/// Fetches puzzles from the public Banana API over HTTP.
#[derive(Clone, Debug)]
pub struct PuzzleClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PuzzleClient {
    pub fn new(endpoint: impl Into<String>) -> PuzzleClient {
        PuzzleClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_env() -> PuzzleClient {
        let endpoint = std::env::var("PUZZLE_API_URL")
            .unwrap_or_else(|_| DEFAULT_PUZZLE_API_URL.to_string());
        PuzzleClient::new(endpoint)
    }
}

impl PuzzleSource for PuzzleClient {
    async fn fetch_puzzle(&self) -> Result<Puzzle, ApiError> {
        let response = self.http.get(&self.endpoint).send().await?;
        let puzzle = response.error_for_status()?.json::<Puzzle>().await?;
        Ok(puzzle)
    }
}
