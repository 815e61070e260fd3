//! thinkwise-app - line-driven shell over the ThinkWise stores
//!
//! Reads one command per line from stdin and prints the resulting screen.
//! Type `help` for the command list.

use anyhow::{Context, Result};
use clap::Parser;
use libthinkwise::config::ExportConfig;
use libthinkwise::export::{DirectorySink, ExportKind};
use libthinkwise::logging::LoggingConfig;
use libthinkwise::reviewer::Filter;
use libthinkwise::{Config, Difficulty};
use secrecy::SecretString;
use thinkwise_app::app::state::DEFAULT_SUBJECT;
use thinkwise_app::{Action, AppContext, Screen};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "thinkwise-app")]
#[command(about = "Interactive ThinkWise shell", long_about = None)]
struct Cli {
    /// Directory downloads are written to (default: from config)
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

const HELP: &str = "\
Commands:
  login <email> <password>            sign in
  register <email> <password> <name>  create an account
  logout                              sign out
  go <view> [subject]                 dashboard, learning, lesson, profile,
                                      reviewer-creator, reviewer-list, admin-panel
  path                                lessons of the current subject
  open <n>                            open lesson n of the current subject
  answer <text> | submit | next       work through the open lesson
  questions                           question bank, with the active filters
  filter subject|difficulty <value>   set a reviewer filter (\"all\" clears it)
  toggle <id>                         select or deselect a question
  title <text>                        set the reviewer title
  save                                save the reviewer
  sessions                            your saved reviewers
  subjects                            subjects you can open with `go learning`
  downloads | close                   show or hide the download center
  export <kind>                       profile, reviewers, report, questions, backup
  dismiss                             close the alert
  quit";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env(cli.verbose).init();

    let config = Config::load().context("Failed to load configuration")?;
    let output_dir = match cli.output_dir {
        Some(output_dir) => ExportConfig { output_dir }.resolved_output_dir(),
        None => config.export.resolved_output_dir(),
    };
    let mut sink = DirectorySink::new(output_dir);
    let mut ctx = AppContext::new(&config);

    println!("ThinkWise. Type `help` for commands.");
    render(&ctx);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        ctx.clear_status();
        if let Err(e) = run_command(&mut ctx, &mut sink, line).await {
            if ctx.state().alert.is_none() {
                ctx.dispatch(Action::ShowAlert(e.alert_message()));
            }
        }
        if ctx.state().should_quit {
            break;
        }
        render(&ctx);
    }

    Ok(())
}

async fn run_command(
    ctx: &mut AppContext,
    sink: &mut DirectorySink,
    line: &str,
) -> thinkwise_app::Result<()> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "help" => println!("{}", HELP),
        "quit" | "exit" => ctx.dispatch(Action::Quit),
        "dismiss" => ctx.dismiss_alert(),

        "login" => {
            let (email, password) = rest.split_once(' ').unwrap_or((rest, ""));
            ctx.login(email, SecretString::from(password.to_string())).await?;
        }
        "register" => {
            let mut parts = rest.splitn(3, ' ');
            let email = parts.next().unwrap_or_default();
            let password = parts.next().unwrap_or_default();
            let name = parts.next().unwrap_or_default();
            ctx.register(name, email, SecretString::from(password.to_string()))
                .await?;
        }
        "logout" => ctx.logout(),

        "go" => match rest.split_once(' ') {
            Some(("learning", subject)) => ctx.open_subject(subject.trim()),
            _ => ctx.navigate(rest),
        },

        "path" => {
            let subject = current_subject(ctx);
            for (i, (lesson, status)) in ctx.learning_path(&subject)?.iter().enumerate() {
                println!("  {}. {} ({} XP) [{:?}]", i + 1, lesson.title, lesson.xp, status);
            }
        }
        "open" => {
            let subject = current_subject(ctx);
            let index: usize = rest.parse().unwrap_or(0);
            let path = ctx.learning_path(&subject)?;
            match index.checked_sub(1).and_then(|i| path.get(i)) {
                Some((lesson, status)) if status.is_open() => ctx.open_lesson(lesson.clone()),
                Some(_) => println!("That lesson is locked."),
                None => println!("No lesson {}.", rest),
            }
        }
        "answer" => {
            if let Some(run) = ctx.lesson_run_mut() {
                run.select(rest);
            }
        }
        "submit" => {
            if let Some(verdict) = ctx.lesson_run_mut().and_then(|run| run.submit()) {
                println!("{}", if verdict { "Correct!" } else { "Incorrect." });
            }
        }
        "next" => {
            ctx.lesson_next()?;
        }

        "questions" => {
            for q in ctx.reviewer().filtered(ctx.admin().questions()) {
                let mark = if ctx.reviewer().is_selected(&q.id) { "x" } else { " " };
                println!(
                    "  [{}] {} {} / {} ({}) {}",
                    mark, q.id, q.subject, q.topic, q.difficulty, q.prompt
                );
            }
        }
        "filter" => match rest.split_once(' ') {
            Some(("subject", value)) => {
                let filter = Filter::<String>::from_token(value).unwrap_or_default();
                ctx.reviewer_mut().set_subject_filter(filter);
            }
            Some(("difficulty", value)) => {
                let filter = Filter::<Difficulty>::from_token(value)?;
                ctx.reviewer_mut().set_difficulty_filter(filter);
            }
            _ => println!("Usage: filter subject|difficulty <value>"),
        },
        "toggle" => ctx.reviewer_mut().toggle(rest),
        "title" => {
            ctx.reviewer_mut().title = rest.to_string();
        }
        "save" => {
            ctx.save_reviewer()?;
        }
        "sessions" => {
            for s in ctx.my_review_sessions() {
                println!(
                    "  {} - {} questions, {} points",
                    s.title,
                    s.questions.len(),
                    s.total_points()
                );
            }
        }

        "subjects" => {
            for subject in ctx.subjects() {
                println!("  {}", subject);
            }
        }
        "downloads" => ctx.open_downloads()?,
        "close" => ctx.close_downloads(),
        "export" => {
            let kind: ExportKind = rest.parse()?;
            ctx.download(kind, sink)?;
        }

        other => println!("Unknown command: {} (try `help`)", other),
    }
    Ok(())
}

fn current_subject(ctx: &AppContext) -> String {
    ctx.state()
        .last_subject
        .clone()
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string())
}

fn render(ctx: &AppContext) {
    let state = ctx.state();
    match state.screen() {
        Screen::Login => println!("-- Login --"),
        Screen::Register => println!("-- Register --"),
        Screen::Main(token) => {
            let user = ctx
                .current_user()
                .map(|u| u.name.as_str())
                .unwrap_or_default();
            println!("-- {} ({}) --", token, user);
            if let Some(progress) = ctx.progress() {
                let p = progress.progress();
                println!(
                    "   Level {} | {} XP | streak {} | today {}/{}",
                    p.level(),
                    p.total_xp,
                    p.streak,
                    p.today_xp,
                    p.daily_goal
                );
            }
            if let Some(question) = ctx.lesson_run().and_then(|run| run.current()) {
                println!("   Q: {}", question.prompt);
                if let Some(options) = question.kind.options() {
                    println!("      {}", options.join(" | "));
                }
            }
        }
    }
    if state.downloads_open {
        println!("   Downloads:");
        for kind in ExportKind::ALL {
            println!("     export {:<10} {}", kind.as_str(), kind.title());
        }
    }
    if let Some(status) = &state.status {
        println!("   {}", status);
    }
    if let Some(alert) = &state.alert {
        println!("!! {}", alert);
    }
}
