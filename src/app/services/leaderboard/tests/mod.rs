//! Test utilities for leaderboard ranking and privacy

use chrono::{NaiveDate, TimeZone, Utc};

use crate::app::models::{PrivacyLevel, User, UserId};
use crate::app::services::leaderboard::RankInput;


pub fn input(
    user_id: UserId,
    species_count: usize,
    last: Option<&str>,
    privacy_level: PrivacyLevel,
) -> RankInput {
    RankInput {
        user_id,
        name: format!("Birder {}", user_id),
        privacy_level,
        species_count,
        last_observation_date: last
            .map(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()),
    }
}

pub fn user(user_id: UserId, privacy_level: PrivacyLevel) -> User {
    let mut user = User::new(
        user_id,
        format!("birder{}@example.org", user_id),
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    );
    user.privacy_level = privacy_level;
    user
}
