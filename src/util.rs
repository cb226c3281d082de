use chrono::{DateTime, Datelike, TimeZone};

pub fn week_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    let week = timestamp.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn uses_iso_week_year() {
        let dt = Utc.with_ymd_and_hms(2025, 6, 16, 0, 0, 0).unwrap();
        assert_eq!(week_key(&dt), "2025-W25");

        // Dec 29 2025 is a Monday in ISO week 1 of 2026
        let dt = Utc.with_ymd_and_hms(2025, 12, 29, 0, 0, 0).unwrap();
        assert_eq!(week_key(&dt), "2026-W01");
    }
}
