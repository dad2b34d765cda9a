use chrono::{DateTime, Utc};

/// Human label for when a card was last graded, relative to `now`.
#[must_use]
pub fn format_last_review(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last) = last else {
        return "Not reviewed yet".to_string();
    };
    match (now - last).num_days() {
        days if days <= 0 => "Reviewed today".to_string(),
        1 => "Reviewed yesterday".to_string(),
        days => format!("Reviewed {days} days ago"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use study_core::time::fixed_now;

    #[test]
    fn labels_by_day_distance() {
        let now = fixed_now();
        assert_eq!(format_last_review(None, now), "Not reviewed yet");
        assert_eq!(format_last_review(Some(now), now), "Reviewed today");
        assert_eq!(
            format_last_review(Some(now - Duration::hours(30)), now),
            "Reviewed yesterday"
        );
        assert_eq!(
            format_last_review(Some(now - Duration::days(5)), now),
            "Reviewed 5 days ago"
        );
    }
}
