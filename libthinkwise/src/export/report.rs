//! Plain-text progress report

use chrono::{DateTime, Utc};

use crate::types::UserProfile;

pub fn progress_report(
    profile: &UserProfile,
    session_count: usize,
    generated_at: DateTime<Utc>,
) -> String {
    let user = &profile.user;
    let progress = &profile.progress;

    let achievements: String = progress
        .achievements
        .iter()
        .map(|achievement| format!("- {}\n", achievement))
        .collect();

    format!(
        "THINKWISE LEARNING REPORT\n\
         ========================\n\
         \n\
         User Information:\n\
         - Name: {name}\n\
         - Email: {email}\n\
         - Level: {level}\n\
         - Total XP: {total_xp}\n\
         - Current Streak: {streak} days\n\
         - Completed Lessons: {lessons}\n\
         \n\
         Review Sessions Created: {session_count}\n\
         \n\
         Achievements:\n\
         {achievements}\
         \n\
         Report Generated: {generated}\n",
        name = user.name,
        email = user.email,
        level = progress.level(),
        total_xp = progress.total_xp,
        streak = progress.streak,
        lessons = progress.completed_lessons.len(),
        session_count = session_count,
        achievements = achievements,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::TimeZone;

    #[test]
    fn test_report_matches_template() {
        let generated = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let report = progress_report(&seed::demo_profile(), 2, generated);

        let expected = "\
THINKWISE LEARNING REPORT
========================

User Information:
- Name: Alex Johnson
- Email: alex@example.com
- Level: 13
- Total XP: 2450
- Current Streak: 7 days
- Completed Lessons: 3

Review Sessions Created: 2

Achievements:
- First Lesson
- Week Streak
- Math Master

Report Generated: 2024-05-01 08:00:00 UTC
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_report_without_achievements() {
        let mut profile = seed::demo_profile();
        profile.progress.achievements.clear();
        let report = progress_report(&profile, 0, Utc::now());
        assert!(report.contains("Achievements:\n\nReport Generated:"));
    }
}
