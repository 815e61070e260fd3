//! Hard-coded content every store starts from
//!
//! Nothing is persisted, so each process begins with exactly this data.

use chrono::Utc;

use crate::lesson::Lesson;
use crate::types::{
    Difficulty, Module, Question, QuestionKind, User, UserProfile, UserProgress, DEFAULT_AVATAR,
};

pub const ADMIN_ID: &str = "admin";

pub const SUBJECTS: [&str; 6] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "Computer Science",
    "Engineering",
];

fn options(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn tags(items: &[&str]) -> Vec<String> {
    options(items)
}

#[allow(clippy::too_many_arguments)]
fn multiple_choice(
    id: &str,
    subject: &str,
    topic: &str,
    difficulty: Difficulty,
    prompt: &str,
    image_url: &str,
    choices: &[&str],
    correct: &str,
    explanation: &str,
    points: u32,
    tag_list: &[&str],
) -> Question {
    Question {
        id: id.to_string(),
        kind: QuestionKind::MultipleChoice {
            options: options(choices),
            correct: correct.to_string(),
        },
        subject: subject.to_string(),
        topic: topic.to_string(),
        difficulty,
        prompt: prompt.to_string(),
        image_url: Some(image_url.to_string()),
        explanation: explanation.to_string(),
        points,
        tags: tags(tag_list),
        created_by: ADMIN_ID.to_string(),
        created_at: Utc::now(),
    }
}

/// The question bank the admin store starts with
pub fn questions() -> Vec<Question> {
    vec![
        multiple_choice(
            "1",
            "Mathematics",
            "Algebra",
            Difficulty::Intermediate,
            "What is the solution to 2x + 5 = 13?",
            "https://images.unsplash.com/photo-1635070041078-e363dbe005cb?w=400&h=300&fit=crop",
            &["x = 3", "x = 4", "x = 5", "x = 6"],
            "x = 4",
            "Subtract 5 from both sides: 2x = 8, then divide by 2: x = 4",
            10,
            &["linear-equations", "solving"],
        ),
        multiple_choice(
            "2",
            "Physics",
            "Mechanics",
            Difficulty::Beginner,
            "What is the formula for calculating force?",
            "https://images.unsplash.com/photo-1446776653964-20c1d3a81b06?w=400&h=300&fit=crop",
            &["F = ma", "F = mv", "F = m/a", "F = a/m"],
            "F = ma",
            "Newton's second law states that Force equals mass times acceleration",
            5,
            &["newton-laws", "force", "acceleration"],
        ),
        multiple_choice(
            "3",
            "Chemistry",
            "Periodic Table",
            Difficulty::Intermediate,
            "What is the chemical symbol for Gold?",
            "https://images.unsplash.com/photo-1518709268805-4e9042af2176?w=400&h=300&fit=crop",
            &["Go", "Gd", "Au", "Ag"],
            "Au",
            "Gold's symbol Au comes from its Latin name \"aurum\"",
            8,
            &["periodic-table", "elements", "symbols"],
        ),
    ]
}

pub fn modules() -> Vec<Module> {
    vec![Module {
        id: "1".to_string(),
        title: "Introduction to Linear Algebra".to_string(),
        subject: "Mathematics".to_string(),
        description: "Learn the fundamentals of linear algebra including vectors, matrices, and systems of equations.".to_string(),
        difficulty: Difficulty::Intermediate,
        questions: Vec::new(),
        estimated_time: 45,
        prerequisites: vec!["basic-algebra".to_string()],
        created_by: ADMIN_ID.to_string(),
        created_at: Utc::now(),
        is_published: true,
    }]
}

/// Progress every freshly signed-in user starts with
pub fn progress() -> UserProgress {
    UserProgress {
        streak: 7,
        total_xp: 2450,
        completed_lessons: options(&["math-algebra-1", "physics-mechanics-1", "chemistry-atoms-1"]),
        achievements: options(&["First Lesson", "Week Streak", "Math Master"]),
        daily_goal: 50,
        today_xp: 35,
    }
}

pub fn demo_user() -> User {
    User {
        id: "1".to_string(),
        name: "Alex Johnson".to_string(),
        email: "alex@example.com".to_string(),
        avatar: DEFAULT_AVATAR.to_string(),
    }
}

/// The demo profile used when no one has signed in (export tooling, tests)
pub fn demo_profile() -> UserProfile {
    UserProfile {
        user: demo_user(),
        progress: progress(),
    }
}

fn algebra_quiz() -> Vec<Question> {
    let quiz = [
        (
            "What is the solution to the equation 2x + 5 = 13?",
            &["x = 3", "x = 4", "x = 5", "x = 6"],
            "x = 4",
            "Subtract 5 from both sides: 2x = 8, then divide by 2: x = 4",
        ),
        (
            "Which of the following is equivalent to (x + 3)²?",
            &["x² + 6x + 9", "x² + 3x + 9", "x² + 6x + 6", "x² + 9"],
            "x² + 6x + 9",
            "Use the formula (a + b)² = a² + 2ab + b²",
        ),
        (
            "What is the vertex of the parabola y = x² - 4x + 3?",
            &["(2, -1)", "(-2, 1)", "(1, 0)", "(4, 3)"],
            "(2, -1)",
            "Complete the square or use the vertex formula x = -b/2a",
        ),
    ];

    quiz.iter()
        .enumerate()
        .map(|(i, (prompt, choices, correct, explanation))| Question {
            id: format!("algebra-quiz-{}", i + 1),
            kind: QuestionKind::MultipleChoice {
                options: options(*choices),
                correct: correct.to_string(),
            },
            subject: "Mathematics".to_string(),
            topic: "Algebra".to_string(),
            difficulty: Difficulty::Intermediate,
            prompt: prompt.to_string(),
            image_url: None,
            explanation: explanation.to_string(),
            points: 10,
            tags: Vec::new(),
            created_by: ADMIN_ID.to_string(),
            created_at: Utc::now(),
        })
        .collect()
}

/// The learning path of a subject. Every lesson runs the same short quiz.
pub fn lessons(subject: &str) -> Vec<Lesson> {
    let slug = match subject {
        "Mathematics" => "math-algebra",
        "Physics" => "physics-mechanics",
        "Chemistry" => "chemistry-atoms",
        other => return generic_lessons(other),
    };

    let titles = [
        ("Introduction to Algebra", 20),
        ("Linear Equations", 25),
        ("Quadratic Functions", 30),
        ("Polynomial Operations", 35),
        ("Factoring", 40),
        ("Rational Expressions", 45),
    ];

    titles
        .iter()
        .enumerate()
        .map(|(i, (title, xp))| Lesson {
            id: format!("{}-{}", slug, i + 1),
            title: title.to_string(),
            subject: subject.to_string(),
            xp: *xp,
            questions: algebra_quiz(),
        })
        .collect()
}

fn generic_lessons(subject: &str) -> Vec<Lesson> {
    let slug = subject.to_lowercase().replace(' ', "-");
    vec![Lesson {
        id: format!("{}-1", slug),
        title: format!("Introduction to {}", subject),
        subject: subject.to_string(),
        xp: 20,
        questions: algebra_quiz(),
    }]
}
