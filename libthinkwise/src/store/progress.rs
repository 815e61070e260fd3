//! User progress store
//!
//! Holds one user's XP, streak, completed lessons, achievements and daily
//! goal. The level is read from `UserProgress::level`, which always derives
//! it from total XP.

use tracing::debug;

use crate::seed;
use crate::types::{User, UserProfile, UserProgress};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressAction {
    UpdateStreak(u32),
    /// Credit XP to both the total and today's tally
    AddXp(u32),
    CompleteLesson(String),
    AddAchievement(String),
    SetDailyGoal(u32),
}

fn push_unique(mut items: Vec<String>, item: String) -> Vec<String> {
    if !items.contains(&item) {
        items.push(item);
    }
    items
}

/// Pure reducer: `(UserProgress, ProgressAction) -> UserProgress`
pub fn reduce(progress: UserProgress, action: ProgressAction) -> UserProgress {
    match action {
        ProgressAction::UpdateStreak(streak) => UserProgress { streak, ..progress },
        ProgressAction::AddXp(amount) => UserProgress {
            total_xp: progress.total_xp.saturating_add(amount),
            today_xp: progress.today_xp.saturating_add(amount),
            ..progress
        },
        ProgressAction::CompleteLesson(lesson_id) => UserProgress {
            completed_lessons: push_unique(progress.completed_lessons, lesson_id),
            ..progress
        },
        ProgressAction::AddAchievement(name) => UserProgress {
            achievements: push_unique(progress.achievements, name),
            ..progress
        },
        ProgressAction::SetDailyGoal(daily_goal) => UserProgress {
            daily_goal,
            ..progress
        },
    }
}

/// Container owning one user's profile
#[derive(Debug, Clone)]
pub struct ProgressStore {
    profile: UserProfile,
}

impl ProgressStore {
    pub fn new(profile: UserProfile) -> Self {
        Self { profile }
    }

    /// A newly signed-in user starts from the fixed default progress
    pub fn for_user(user: User) -> Self {
        Self::new(UserProfile {
            user,
            progress: seed::progress(),
        })
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn user(&self) -> &User {
        &self.profile.user
    }

    pub fn progress(&self) -> &UserProgress {
        &self.profile.progress
    }

    pub fn level(&self) -> u32 {
        self.profile.progress.level()
    }

    pub fn dispatch(&mut self, action: ProgressAction) {
        debug!(user = %self.profile.user.id, ?action, "progress dispatch");
        let progress = std::mem::take(&mut self.profile.progress);
        self.profile.progress = reduce(progress, action);
    }

    pub fn add_xp(&mut self, amount: u32) {
        self.dispatch(ProgressAction::AddXp(amount));
    }

    pub fn complete_lesson(&mut self, lesson_id: impl Into<String>) {
        self.dispatch(ProgressAction::CompleteLesson(lesson_id.into()));
    }

    pub fn add_achievement(&mut self, name: impl Into<String>) {
        self.dispatch(ProgressAction::AddAchievement(name.into()));
    }

    pub fn set_daily_goal(&mut self, goal: u32) {
        self.dispatch(ProgressAction::SetDailyGoal(goal));
    }

    pub fn update_streak(&mut self, streak: u32) {
        self.dispatch(ProgressAction::UpdateStreak(streak));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ProgressStore {
        ProgressStore::new(seed::demo_profile())
    }

    #[test]
    fn test_seed_level_is_derived_not_trusted() {
        let store = store();
        assert_eq!(store.progress().total_xp, 2450);
        assert_eq!(store.level(), 13);
    }

    #[test]
    fn test_add_xp_is_additive_and_recomputes_level() {
        let mut store = store();
        store.add_xp(30);
        store.add_xp(120);

        assert_eq!(store.progress().total_xp, 2450 + 30 + 120);
        assert_eq!(store.progress().today_xp, 35 + 30 + 120);
        assert_eq!(store.level(), (2450 + 150) / 200 + 1);
    }

    #[test]
    fn test_add_xp_crosses_level_boundary() {
        let mut store = store();
        store.add_xp(149);
        assert_eq!(store.level(), 13);
        store.add_xp(1);
        assert_eq!(store.progress().total_xp, 2600);
        assert_eq!(store.level(), 14);
    }

    #[test]
    fn test_add_xp_saturates() {
        let mut store = store();
        store.add_xp(u32::MAX);
        assert_eq!(store.progress().total_xp, u32::MAX);
    }

    #[test]
    fn test_complete_lesson_dedupes() {
        let mut store = store();
        store.complete_lesson("math-algebra-2");
        store.complete_lesson("math-algebra-2");
        store.complete_lesson("math-algebra-1");

        let lessons = &store.progress().completed_lessons;
        assert_eq!(lessons.len(), 4);
        assert_eq!(lessons.last().unwrap(), "math-algebra-2");
        assert!(store.progress().has_completed("math-algebra-2"));
    }

    #[test]
    fn test_add_achievement_dedupes() {
        let mut store = store();
        store.add_achievement("Quiz Whiz");
        store.add_achievement("Quiz Whiz");
        assert_eq!(store.progress().achievements.len(), 4);
    }

    #[test]
    fn test_set_daily_goal_and_streak() {
        let mut store = store();
        store.set_daily_goal(100);
        store.update_streak(8);
        assert_eq!(store.progress().daily_goal, 100);
        assert_eq!(store.progress().streak, 8);
        assert_eq!(store.progress().daily_goal_progress(), 35);
    }

    #[test]
    fn test_for_user_uses_default_progress() {
        let user = User {
            id: "u-9".to_string(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            avatar: crate::types::DEFAULT_AVATAR.to_string(),
        };
        let store = ProgressStore::for_user(user.clone());
        assert_eq!(store.user(), &user);
        assert_eq!(store.progress(), &seed::progress());
    }

    #[test]
    fn test_reducer_is_pure() {
        let progress = seed::progress();
        let next = reduce(progress.clone(), ProgressAction::AddXp(10));
        assert_eq!(progress.total_xp, 2450);
        assert_eq!(next.total_xp, 2460);
    }
}
