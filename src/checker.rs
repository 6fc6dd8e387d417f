use tracing::info;

use crate::constants::BANNER;
use crate::datetime::{current_date, is_leap_year};
use crate::db::Database;
use crate::models::{Birthday, Error};
use crate::telegram::TelegramNotifier;

/// Filter a month's records down to the ones that fall on the given day.
///
/// On Feb 28 of a non-leap year, Feb 29 records match too: the last day of
/// a short February stands in for the missed leap birthday.
pub fn matching_birthdays(
    month: i32,
    day: i32,
    year: i32,
    candidates: Vec<Birthday>,
) -> Vec<Birthday> {
    let leap_day_fallback = month == 2 && day == 28 && !is_leap_year(year);

    candidates
        .into_iter()
        .filter(|birthday| birthday.day == day || (leap_day_fallback && birthday.day == 29))
        .collect()
}

/// Compose the aggregated notification: banner, then one entry per record,
/// separated by blank lines
pub fn build_notification(birthdays: &[Birthday]) -> String {
    let entries: Vec<String> = birthdays.iter().map(|b| b.to_string()).collect();
    format!("{}\n\n{}", BANNER, entries.join("\n\n"))
}

/// Run the daily check: look up this month's records, match against today,
/// and send one aggregated message when anything matches
pub async fn run_daily_check(db: &Database, notifier: &TelegramNotifier) -> Result<(), Error> {
    let (month, day, year) = current_date();

    let candidates = db.get_birthdays_for_month(month).await?;
    let birthdays = matching_birthdays(month, day, year, candidates);

    if birthdays.is_empty() {
        info!("No birthdays today");
        return Ok(());
    }

    let message = build_notification(&birthdays);
    let response = notifier.send_message(&message).await?;
    info!("Notification sent: {:?}", response);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBirthday;

    fn record(first: &str, month: i32, day: i32, note: Option<&str>) -> Birthday {
        Birthday::create(NewBirthday {
            first_name: first.into(),
            last_name: "fake".into(),
            month,
            day,
            note: note.map(String::from),
            updated_at: None,
        })
        .unwrap()
    }

    #[test]
    fn test_matches_exact_day() {
        let candidates = vec![record("a", 5, 2, None), record("b", 5, 9, None)];

        let matches = matching_birthdays(5, 2, 2025, candidates);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].first_name, "a");
    }

    #[test]
    fn test_no_matches_is_empty() {
        let candidates = vec![record("a", 5, 2, None)];
        assert!(matching_birthdays(5, 3, 2025, candidates).is_empty());
    }

    #[test]
    fn test_feb_28_non_leap_year_includes_leap_day_birthday() {
        let candidates = vec![record("leap", 2, 29, None), record("other", 2, 14, None)];

        let matches = matching_birthdays(2, 28, 2025, candidates);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].first_name, "leap");
    }

    #[test]
    fn test_feb_28_leap_year_excludes_leap_day_birthday() {
        let candidates = vec![record("leap", 2, 29, None)];
        assert!(matching_birthdays(2, 28, 2024, candidates).is_empty());
    }

    #[test]
    fn test_feb_28_non_leap_year_keeps_exact_matches_too() {
        let candidates = vec![record("leap", 2, 29, None), record("exact", 2, 28, None)];

        let matches = matching_birthdays(2, 28, 2025, candidates);
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_feb_29_on_leap_year_matches_exactly() {
        let candidates = vec![record("leap", 2, 29, None)];
        assert_eq!(matching_birthdays(2, 29, 2024, candidates).len(), 1);
    }

    #[test]
    fn test_build_notification_single_entry() {
        let birthdays = vec![record("ada", 12, 10, None)];

        assert_eq!(
            build_notification(&birthdays),
            "We've got some birthdays!\n\n<b>Ada Fake</b> (December 10)"
        );
    }

    #[test]
    fn test_build_notification_joins_with_blank_lines() {
        let birthdays = vec![
            record("ada", 12, 10, Some("mathematician")),
            record("alan", 12, 10, None),
        ];

        assert_eq!(
            build_notification(&birthdays),
            "We've got some birthdays!\n\n\
             <b>Ada Fake</b> (December 10):\n<i>Mathematician</i>\n\n\
             <b>Alan Fake</b> (December 10)"
        );
    }
}
