//! Gradebook - command-line client for the gradebook service
//!
//! Each invocation restores the stored session, loads both collections and
//! then runs one subcommand.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use gradebook_domain::{Config, NewStudent, Notification, Severity, Student, Subject};
use gradebook_lib::utils::logging::{error_label, init_tracing};
use gradebook_lib::{AppContext, CommandOutput};
use tracing::error;

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(about = "Manage subjects and students on a gradebook service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (TOML or JSON); overrides environment and probing
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Service base URL; overrides the configured one
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the issued token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored token
    Logout,
    /// List subjects
    Subjects,
    /// List students
    Students,
    /// Create a subject
    AddSubject {
        name: String,
    },
    /// Create a student account
    AddStudent {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Delete a subject
    DeleteSubject {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a student
    DeleteStudent {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional; values already in the environment win
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_tracing(&config.logging) {
        eprintln!("warning: {err}");
    }
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    match run(cli, config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = %err, "gradebook failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => gradebook_infra::config::load_from_file(Some(path.clone())),
        None => gradebook_infra::config::load(),
    }
    .context("failed to load configuration")?;

    if let Some(url) = &cli.url {
        config.api.base_url = url.clone();
    }
    Ok(config)
}

/// Returns whether the command finished without error notifications.
async fn run(cli: Cli, config: Config) -> anyhow::Result<bool> {
    let ctx = AppContext::new_with_config(config).map_err(|err| {
        anyhow::anyhow!("{} ({})", err, error_label(&err))
    })?;
    let json = cli.json;

    let started = gradebook_lib::start(&ctx).await;
    let mut ok = report(&started.notifications, json);

    match cli.command {
        Commands::Login { username, password } => {
            let output = gradebook_lib::sign_in(&ctx, &username, &password).await;
            ok &= finish(&output, json);
        }
        Commands::Logout => {
            let output = gradebook_lib::sign_out(&ctx).await;
            ok &= finish(&output, json);
        }
        Commands::Subjects => print_subjects(&gradebook_lib::list_subjects(&ctx), json)?,
        Commands::Students => print_students(&gradebook_lib::list_students(&ctx), json)?,
        Commands::AddSubject { name } => {
            let output = gradebook_lib::add_subject(&ctx, &name).await;
            ok &= finish(&output, json);
            if let Some(subject) = &output.value {
                print_subjects(std::slice::from_ref(subject), json)?;
            }
        }
        Commands::AddStudent { email, password, first_name, last_name } => {
            let draft = NewStudent { email, password, first_name, last_name };
            let output = gradebook_lib::add_student(&ctx, draft).await;
            ok &= finish(&output, json);
            if let Some(student) = &output.value {
                print_students(std::slice::from_ref(student), json)?;
            }
        }
        Commands::DeleteSubject { id, yes } => {
            gradebook_lib::stage_subject_deletion(&ctx, id.as_str());
            if yes || confirm(&format!("Delete subject {id}?"))? {
                let output = gradebook_lib::confirm_subject_deletion(&ctx).await;
                ok &= finish(&output, json);
            } else {
                gradebook_lib::cancel_subject_deletion(&ctx);
                println!("Cancelled");
            }
        }
        Commands::DeleteStudent { id, yes } => {
            gradebook_lib::stage_student_deletion(&ctx, id.as_str());
            if yes || confirm(&format!("Delete student {id}?"))? {
                let output = gradebook_lib::confirm_student_deletion(&ctx).await;
                ok &= finish(&output, json);
            } else {
                gradebook_lib::cancel_student_deletion(&ctx);
                println!("Cancelled");
            }
        }
    }

    Ok(ok)
}

fn finish<T>(output: &CommandOutput<T>, json: bool) -> bool {
    report(&output.notifications, json)
}

/// Print notifications; returns false if any is an error.
fn report(notifications: &[Notification], json: bool) -> bool {
    for notification in notifications {
        if json {
            match serde_json::to_string(notification) {
                Ok(line) => eprintln!("{line}"),
                Err(err) => eprintln!("{}: {}", notification.severity, err),
            }
            continue;
        }
        let tag = match notification.severity {
            Severity::Success => "ok",
            Severity::Info => "info",
            Severity::Error => "error",
        };
        eprintln!("[{tag}] {}", notification.message);
    }
    !notifications.iter().any(Notification::is_error)
}

fn print_subjects(subjects: &[Subject], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(subjects)?);
        return Ok(());
    }
    for subject in subjects {
        println!("{:>6}  {}", subject.id, subject.name);
    }
    Ok(())
}

fn print_students(students: &[Student], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(students)?);
        return Ok(());
    }
    for student in students {
        println!("{:>6}  {:<32}  {}", student.id, student.email, student.display_name());
    }
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
