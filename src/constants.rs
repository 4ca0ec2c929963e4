pub const DB_NAME: &str = "banana-game";
pub const USERS_COLL: &str = "users";
pub const SCORES_COLL: &str = "scores";

/// Bearer tokens are valid for 30 days from issuance.
pub const TOKEN_TTL_DAYS: i64 = 30;

pub const DEFAULT_TOP_LIMIT: i64 = 20;
pub const DEFAULT_HISTORY_LIMIT: i64 = 10;
