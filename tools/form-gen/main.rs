use clap::Parser;
use keiro::form::{FormDefinition, OptionDefinition, StepDefinition, StepLogicDefinition};
use keiro::graph::{Dimensionality, FrameConfig, StepId, StepKind};
use keiro::logic::{LogicAction, LogicCondition, LogicRule};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

/// A CLI tool to generate random form definitions for exercising the navigation engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_form.json")]
    output: String,

    /// The number of steps to generate
    #[arg(long, default_value_t = 8)]
    steps: usize,

    /// The maximum number of options per option-bearing step
    #[arg(long, default_value_t = 4)]
    max_options: usize,

    /// Probability that a rule or jump targets a step that does not exist
    #[arg(long, default_value_t = 0.0)]
    dangling: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.steps == 0 {
        eprintln!("Error: --steps must be at least 1");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.dangling) {
        eprintln!(
            "Error: --dangling ({}) must be between 0 and 1",
            cli.dangling
        );
        std::process::exit(1);
    }

    println!(
        "Generating a form with {} steps (dangling target rate {})...",
        cli.steps, cli.dangling
    );

    let steps = generate_steps(&mut rng, cli.steps);
    let options = generate_options(&mut rng, &steps, cli.max_options, cli.dangling);
    let step_logic = generate_logic(&mut rng, &steps, &options, cli.dangling);

    let form = FormDefinition {
        steps,
        options,
        step_logic,
    };

    let json_output = serde_json::to_string_pretty(&form)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved form definition to '{}'",
        cli.output
    );

    Ok(())
}

fn generate_steps(rng: &mut ThreadRng, count: usize) -> Vec<StepDefinition> {
    let steps: Vec<_> = (0..count)
        .map(|i| {
            let kind = random_kind(rng);
            StepDefinition {
                id: StepId::new(format!("step-{}", i + 1)),
                order: i as u32 + 1,
                title: format!("Question {} ({})", i + 1, kind.tag()),
                required: rng.random_bool(0.6),
                kind,
            }
        })
        .collect();
    println!("-> Generated {} steps.", steps.len());
    steps
}

fn random_kind(rng: &mut ThreadRng) -> StepKind {
    match rng.random_range(0..8) {
        0 | 1 => StepKind::CardSelection,
        2 => StepKind::MultipleChoice,
        3 => StepKind::Text,
        4 => StepKind::FileUpload {
            allowed_types: vec!["image/jpeg".to_string(), "application/pdf".to_string()],
        },
        5 => StepKind::Dimensions {
            dimensionality: if rng.random_bool(0.5) {
                Dimensionality::ThreeD
            } else {
                Dimensionality::TwoD
            },
            unit: Some("cm".to_string()),
        },
        6 => StepKind::Frames(FrameConfig {
            require_image: rng.random_bool(0.8),
            require_location: rng.random_bool(0.5),
            require_measurement: rng.random_bool(0.3),
            max_frames: Some(rng.random_range(2..=6)),
        }),
        _ => StepKind::Contact,
    }
}

fn generate_options(
    rng: &mut ThreadRng,
    steps: &[StepDefinition],
    max_options: usize,
    dangling: f64,
) -> Vec<OptionDefinition> {
    let last_order = steps.len() as u32;
    let mut options = Vec::new();
    for step in steps.iter().filter(|s| s.kind.has_options()) {
        let count = rng.random_range(2..=max_options.max(2));
        for n in 0..count {
            // Legacy jumps only ever go forward.
            let jump_to_step = if rng.random_bool(0.2) && step.order < last_order {
                Some(random_order(rng, step.order + 1, last_order, dangling))
            } else {
                None
            };
            options.push(OptionDefinition {
                id: format!("{}-opt-{}", step.id, n + 1).into(),
                step_id: step.id.clone(),
                label: format!("Option {}", n + 1),
                jump_to_step,
            });
        }
    }
    println!("-> Generated {} options.", options.len());
    options
}

fn generate_logic(
    rng: &mut ThreadRng,
    steps: &[StepDefinition],
    options: &[OptionDefinition],
    dangling: f64,
) -> Vec<StepLogicDefinition> {
    let mut logic = Vec::new();
    for (i, step) in steps.iter().enumerate() {
        let own: Vec<_> = options.iter().filter(|o| o.step_id == step.id).collect();
        if own.is_empty() || i + 1 >= steps.len() || !rng.random_bool(0.5) {
            continue;
        }

        let rules = (0..rng.random_range(1..=own.len()))
            .map(|n| {
                let option = own[rng.random_range(0..own.len())];
                let condition = if rng.random_bool(0.1) {
                    // Reserved kinds load fine but never match.
                    LogicCondition::Text {
                        operator: None,
                        value: Some("anything".to_string()),
                    }
                } else {
                    LogicCondition::option(option.id.clone())
                };
                LogicRule::new(
                    format!("{}-rule-{}", step.id, n + 1),
                    rng.random_range(0..10),
                    vec![condition],
                    random_target(rng, steps, i, dangling),
                )
            })
            .collect::<Vec<_>>();

        let default_action = rng
            .random_bool(0.5)
            .then(|| random_target(rng, steps, i, dangling));

        println!("-> Step '{}' gets {} rule(s).", step.id, rules.len());
        logic.push(StepLogicDefinition {
            step_id: step.id.clone(),
            rules,
            default_action,
        });
    }
    logic
}

fn random_target(
    rng: &mut ThreadRng,
    steps: &[StepDefinition],
    from: usize,
    dangling: f64,
) -> LogicAction {
    if rng.random_bool(dangling) {
        return LogicAction::to_step(format!("deleted-{}", rng.random_range(0..1000)));
    }
    let target = &steps[rng.random_range(from + 1..steps.len())];
    if rng.random_bool(0.2) {
        LogicAction::to_order(target.order)
    } else {
        LogicAction::to_step(target.id.clone())
    }
}

fn random_order(rng: &mut ThreadRng, min: u32, max: u32, dangling: f64) -> u32 {
    if rng.random_bool(dangling) {
        max + rng.random_range(1..=10)
    } else {
        rng.random_range(min..=max)
    }
}
