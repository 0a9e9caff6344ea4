use clap::{ArgAction, Parser};
use keiro::prelude::*;
use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt};

// --- Script Format ---
// A script replays a respondent session: one entry per button press.

#[derive(Deserialize, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ScriptStep {
    Next {
        #[serde(default)]
        answer: Answer,
    },
    Back,
    AddAnother {
        #[serde(default)]
        answer: Answer,
    },
}

/// Walks a multi-step form the way a respondent would
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the form definition JSON file
    form_path: Option<String>,
    /// Optional path to a JSON script of next/back/add_another actions
    script_path: Option<String>,

    /// Optional path to a navigation config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Reject forms with dangling rule, default or jump targets
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Run in interactive mode to be prompted for answers
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    if cli.human {
        run_interactive(cli);
    } else {
        run_non_interactive(cli);
    }
}

fn load_session(form_path: &str, config_path: Option<&str>, strict: bool) -> NavigationController {
    let load_start = Instant::now();
    let form = FormDefinition::from_file(form_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load form: {}", e)));
    let config = match config_path {
        Some(path) => NavigationConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => NavigationConfig::default(),
    };

    let graph = StepGraph::builder(form)
        .with_strict_references(strict)
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid form: {}", e)));
    println!(
        "Loaded form with {} steps in {:?}",
        graph.len(),
        load_start.elapsed()
    );

    NavigationController::builder(graph)
        .with_config(config)
        .with_observer(|event: &TransitionEvent| {
            let style = if event.animate { "animated" } else { "swap" };
            println!(
                "  ~ {:?} transition {} -> {} ({} -> {}, {})",
                event.direction, event.from_index, event.to_index, event.from_kind, event.to_kind, style
            );
        })
        .with_submission_handler(|answers: &AnswerSet| {
            println!("\nSubmitting {} answers:", answers.len());
            let mut entries: Vec<_> = answers.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (step_id, answer) in entries {
                let json = serde_json::to_string(answer).unwrap_or_else(|e| e.to_string());
                println!("  {}: {}", step_id, json);
            }
            Ok::<(), SubmissionError>(())
        })
        .build()
}

fn describe_current(session: &NavigationController) {
    let Some(step) = session.current_step() else {
        return;
    };
    let marker = if step.required { " *" } else { "" };
    println!(
        "\n[{}/{}] {} ({}){}",
        step.index + 1,
        session.graph().len(),
        if step.title.is_empty() { step.id.as_str() } else { step.title.as_str() },
        step.kind.tag(),
        marker
    );
    for (i, option) in session.graph().options_of(step.index).iter().enumerate() {
        println!("    {}: {} [{}]", i + 1, option.label, option.id);
    }
}

fn report_advance(result: std::result::Result<AdvanceOutcome, NavigationError>) {
    match result {
        Ok(AdvanceOutcome::Moved { from, to, route }) => {
            println!("  -> Moved {} -> {}", from, to);
            println!("  -> Reason: {}", route.reason());
        }
        Ok(AdvanceOutcome::Completed { submission, .. }) => match submission {
            Ok(()) => println!("\nForm complete."),
            Err(e) => println!("\nForm complete, but the submission failed: {}", e),
        },
        Err(NavigationError::Validation(failure)) => {
            for message in failure.messages() {
                println!("  !! {}", message);
            }
        }
        Err(e) => println!("  !! {}", e),
    }
}

/// Runs the CLI in non-interactive mode, replaying a script file.
fn run_non_interactive(cli: Cli) {
    let form_path = cli.form_path.unwrap_or_else(|| {
        exit_with_error("Form path is required in non-interactive mode.");
    });
    let script_path = cli.script_path.unwrap_or_else(|| {
        exit_with_error("Script path is required in non-interactive mode.");
    });

    let script_json = fs::read_to_string(&script_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read script file '{}': {}", script_path, e))
    });
    let script: Vec<ScriptStep> = serde_json::from_str(&script_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse script JSON: {}", e)));

    let mut session = load_session(&form_path, cli.config.as_deref(), cli.strict);
    let run_start = Instant::now();

    for step in script {
        if session.is_complete() {
            println!("Session already complete, ignoring remaining script entries.");
            break;
        }
        describe_current(&session);
        match step {
            ScriptStep::Next { answer } => report_advance(session.advance(answer)),
            ScriptStep::Back => match session.retreat() {
                Ok(outcome) if outcome.clamped => println!("  <- Back (clamped) to {}", outcome.to),
                Ok(outcome) => println!("  <- Back to {}", outcome.to),
                Err(e) => println!("  !! {}", e),
            },
            ScriptStep::AddAnother { answer } => match session.add_another(answer) {
                Ok(count) => println!("  + Repetition added ({} now)", count),
                Err(e) => println!("  !! {}", e),
            },
        }
    }

    println!("\n--- Session Summary ---");
    println!("Phase:          {:?}", session.phase());
    println!("History:        {:?}", session.history().entries());
    println!("Answers:        {}", session.answers().len());
    println!("Replay Time:    {:?}", run_start.elapsed());
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(cli: Cli) {
    println!("--- Keiro Interactive Mode ---");

    let form_path = match cli.form_path {
        Some(path) => path,
        None => prompt_for_input("Enter form definition path", Some("data/form.json")),
    };
    let mut session = load_session(&form_path, cli.config.as_deref(), cli.strict);

    println!("Commands: <number> pick an option, b = back, + = add another, q = quit.");
    println!("Anything else is taken as a text answer, or as answer JSON if it starts with '{{'.");

    while !session.is_complete() {
        describe_current(&session);
        let input = prompt_for_input("Answer", None);
        match input.as_str() {
            "q" => break,
            "b" => match session.retreat() {
                Ok(outcome) => println!("  <- Back to {}", outcome.to),
                Err(e) => println!("  !! {}", e),
            },
            "+" => {
                let answer = prompt_for_answer(&session);
                match session.add_another(answer) {
                    Ok(count) => println!("  + Repetition added ({} now)", count),
                    Err(e) => println!("  !! {}", e),
                }
            }
            _ => {
                let answer = parse_answer(&session, &input);
                report_advance(session.advance(answer));
            }
        }
    }
}

fn prompt_for_answer(session: &NavigationController) -> Answer {
    let input = prompt_for_input("Frames as answer JSON", Some("{}"));
    parse_answer(session, &input)
}

/// Turns a line of input into an answer for the current step.
fn parse_answer(session: &NavigationController, input: &str) -> Answer {
    if input.starts_with('{') {
        return serde_json::from_str(input).unwrap_or_else(|e| {
            println!("  !! Not a valid answer: {}", e);
            Answer::empty()
        });
    }
    if input.is_empty() {
        return Answer::empty();
    }
    let Some(step) = session.current_step() else {
        return Answer::empty();
    };
    let options = session.graph().options_of(step.index);
    match input.parse::<usize>() {
        Ok(n) if step.kind.has_options() && (1..=options.len()).contains(&n) => {
            Answer::option(options[n - 1].id.clone())
        }
        Ok(n) if matches!(step.kind, StepKind::Rating { .. }) => Answer::rating(n as i32),
        _ => Answer::text(input),
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to flush stdout: {}", e));
    }

    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
