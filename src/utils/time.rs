use chrono::{DateTime, SecondsFormat, Utc};

/// Current UTC time as the RFC 3339 string the row API stores in timestamp columns.
pub fn now_rfc3339() -> String {
    to_rfc3339(&Utc::now())
}

pub fn to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rfc3339_sorts_chronologically() {
        let earlier = to_rfc3339(&Utc.with_ymd_and_hms(2024, 1, 9, 12, 0, 0).unwrap());
        let later = to_rfc3339(&Utc.with_ymd_and_hms(2024, 1, 10, 8, 30, 0).unwrap());
        assert_eq!(earlier, "2024-01-09T12:00:00.000000Z");
        assert!(earlier < later);
    }
}
