use crate::models::difficulty::Difficulty;

pub const BASE_POINTS: i64 = 10;

/// Points for one solved puzzle: base plus one bonus point per two seconds
/// left on the clock, scaled by the level multiplier and rounded down.
pub fn points_earned(level: Difficulty, time_remaining: u32) -> i64 {
    let time_bonus = (time_remaining / 2) as i64;
    ((BASE_POINTS + time_bonus) as f64 * level.points_multiplier()).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easy_with_forty_seconds_left() {
        assert_eq!(points_earned(Difficulty::Easy, 40), 30);
    }

    #[test]
    fn hard_with_ten_seconds_left() {
        assert_eq!(points_earned(Difficulty::Hard, 10), 30);
    }

    #[test]
    fn medium_rounds_down_after_multiplier() {
        // (10 + 3) * 1.5 = 19.5
        assert_eq!(points_earned(Difficulty::Medium, 7), 19);
    }

    #[test]
    fn no_time_left_still_pays_base_points() {
        assert_eq!(points_earned(Difficulty::Easy, 0), 10);
        assert_eq!(points_earned(Difficulty::Hard, 0), 20);
    }

    #[test]
    fn odd_seconds_round_down_before_bonus() {
        assert_eq!(
            points_earned(Difficulty::Easy, 5),
            points_earned(Difficulty::Easy, 4)
        );
    }
}
