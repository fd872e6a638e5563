/*!
  Binary for the CLI of permkit: pk
*/

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

pub mod cli;
pub mod error;

use std::{fs::read_to_string, path::Path};

use clap::Parser;
use cli::{BasisArgs, CliApp, Command, Format, RandomArgs, Reporting};
use colored::Colorize;
use error::CliError;
use num::{BigUint, ToPrimitive};
use permkit::{
    meta::{timing::TimedSorting, TimedCode},
    permutation::{RandomAvoiderOptions, Style},
    AvClass, PermClass, PermSet, Permutation, PermutationClass,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::{json, Value};

/// Log progress of rejection sampling after this many attempts
const SAMPLING_LOG_INTERVAL: u64 = 100_000;

/// Result of a command in both output formats
struct Output {
    text: String,
    json: Value,
}

/// Convert a number that usually fits into JSON's integers.
fn big_number(number: impl Into<BigUint>) -> Value {
    let number = number.into();
    number
        .to_u64()
        .map(Value::from)
        .unwrap_or_else(|| Value::String(number.to_string()))
}

/// Render a JSON value without quotes around strings.
fn plain(value: &Value) -> String {
    match value {
        Value::String(string) => string.clone(),
        Value::Null => "-".to_owned(),
        other => other.to_string(),
    }
}

fn statistics(permutation: &Permutation) -> Vec<(&'static str, Value)> {
    vec![
        ("length", permutation.len().into()),
        ("inversions", permutation.num_inversions().into()),
        ("descents", permutation.descents().len().into()),
        ("ascents", permutation.ascents().len().into()),
        ("peaks", permutation.peaks().len().into()),
        ("valleys", permutation.valleys().len().into()),
        ("bonds", permutation.bonds().len().into()),
        ("major index", permutation.major_index().into()),
        ("fixed points", permutation.fixed_points().len().into()),
        (
            "longest increasing",
            permutation.longest_increasing_subsequence().into(),
        ),
        (
            "longest decreasing",
            permutation.longest_decreasing_subsequence().into(),
        ),
        ("breadth", permutation.breadth().into()),
        ("order", big_number(permutation.order())),
        (
            "rank",
            permutation
                .rank()
                .map(big_number)
                .unwrap_or(Value::Null),
        ),
        ("involution", permutation.is_involution().into()),
        ("simple", permutation.is_simple().into()),
        ("sum decomposable", permutation.sum_decomposable().into()),
        ("skew decomposable", permutation.skew_decomposable().into()),
    ]
}

fn show(
    permutation: &Permutation,
    style: Style,
    plot: bool,
    width: usize,
    with_statistics: bool,
) -> Output {
    let mut lines = vec![permutation.display_with(style).to_string()];
    let mut json = json!({
        "permutation": permutation.to_string(),
        "values": permutation.values(),
        "cycles": permutation.cycle_notation(),
    });

    if plot {
        lines.push(permutation.pretty_out(width));
        json["plot"] = permutation.pretty_lines(width).into();
    }

    if with_statistics {
        TimedCode::instance().sub("Statistics").start();
        let table = statistics(permutation);
        TimedCode::instance().sub("Statistics").stop();

        let name_width = table.iter().map(|(name, _)| name.len()).max().unwrap_or(0) + 1;
        lines.extend(table.iter().map(|(name, value)| {
            format!(
                "   {:<name_width$} {}",
                format!("{name}:"),
                plain(value).bold()
            )
        }));
        json["statistics"] = table
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect::<serde_json::Map<_, _>>()
            .into();
    }

    Output {
        text: lines.join("\n"),
        json,
    }
}

fn contains(text: &Permutation, pattern: &Permutation, count: bool) -> Output {
    let contained = text.involves(pattern);
    log::info!("{pattern} is contained in {text}: {contained}");

    if count {
        let copies = text.num_copies(pattern);
        Output {
            text: format!("{contained}\n{copies}"),
            json: json!({ "contained": contained, "copies": copies }),
        }
    } else {
        Output {
            text: contained.to_string(),
            json: json!({ "contained": contained }),
        }
    }
}

/// Generate the layers of `class` one by one, timing each of them.
fn generate<C: PermutationClass>(class: &mut C, max_length: usize) {
    for length in class.layers().len()..=max_length {
        let block = format!("Generation/layer {length}");

        TimedCode::instance().sub(&block).start();
        let size = class.extend_by_one();
        let duration = TimedCode::instance().sub(&block).stop();

        log::info!(
            "layer {length}: {size} permutations in {}ms",
            duration.as_millis()
        );
    }
}

fn enumerate(args: &BasisArgs) -> Output {
    let mut class = AvClass::new(args.basis.iter().cloned());
    log::info!("enumerating {class} up to length {}", args.max_length);

    generate(&mut class, args.max_length);
    let counts = class.enumeration(args.max_length);

    Output {
        text: counts
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        json: json!({ "class": class.to_string(), "enumeration": counts }),
    }
}

/// Read a file with one permutation per line.
///
/// Empty lines and lines starting with `#` are ignored.
fn read_permutations(filename: &Path) -> Result<PermSet, CliError> {
    let content = read_to_string(filename)?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(|(index, line)| {
            line.parse::<Permutation>()
                .map_err(|error| CliError::InvalidInputLine {
                    filename: filename.to_path_buf(),
                    line: index + 1,
                    error,
                })
        })
        .collect()
}

fn guess_basis<C: PermutationClass>(class: &mut C, max_length: usize) -> Output {
    generate(class, max_length);

    TimedCode::instance().sub("Basis").start();
    let basis = class.guess_basis(max_length);
    TimedCode::instance().sub("Basis").stop();

    let elements: Vec<String> = basis
        .sorted()
        .iter()
        .map(|permutation| permutation.to_string())
        .collect();
    Output {
        text: elements.join("\n"),
        json: json!({ "max_length": max_length, "basis": elements }),
    }
}

fn basis(args: &BasisArgs, from_file: Option<&Path>) -> Result<Output, CliError> {
    let Some(filename) = from_file else {
        let mut class = AvClass::new(args.basis.iter().cloned());
        log::info!("recovering the basis of {class}");
        return Ok(guess_basis(&mut class, args.max_length));
    };

    TimedCode::instance().sub("Reading").start();
    let mut permutations = read_permutations(filename)?;
    TimedCode::instance().sub("Reading").stop();
    // the empty permutation has no line of its own
    permutations.insert(Permutation::default());
    log::info!(
        "read {} permutations from {}",
        permutations.len(),
        filename.display()
    );

    let mut class = PermClass::from_set(&permutations)?;
    let known = class.layers().len();
    if known <= 1 {
        log::warn!("{} contains no permutations", filename.display());
    }

    // longer basis elements cannot be told apart from missing input
    let max_length = args.max_length.min(known.saturating_sub(1));
    if max_length < args.max_length {
        log::warn!("input only covers lengths up to {max_length}");
    }

    Ok(guess_basis(&mut class, max_length))
}

fn random(args: &RandomArgs) -> Result<Output, CliError> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let options = RandomAvoiderOptions {
        simple: args.simple,
        involution: args.involution,
        log_every: Some(SAMPLING_LOG_INTERVAL),
        max_attempts: Some(args.max_attempts),
    };

    TimedCode::instance().sub("Sampling").start();
    let result = Permutation::random_avoider(args.length, &args.avoid, options, &mut rng);
    TimedCode::instance().sub("Sampling").stop();
    let permutation = result?;

    Ok(Output {
        text: permutation.to_string(),
        json: json!({
            "permutation": permutation.to_string(),
            "values": permutation.values(),
        }),
    })
}

fn print_finished_message(reporting: Reporting) {
    if reporting == Reporting::None {
        return;
    }

    let overall_time = TimedCode::instance().total_system_time().as_millis();
    eprintln!(
        "Completed in {}{}.",
        overall_time.to_string().green().bold(),
        "ms".green().bold(),
    );

    if reporting == Reporting::Time {
        eprintln!(
            "\n{}",
            TimedCode::instance().create_tree_string("pk", TimedSorting::Default)
        );
    }
}

fn run(cli: CliApp) -> Result<(), CliError> {
    TimedCode::instance().start();

    let output = match &cli.command {
        Command::Show {
            permutation,
            style,
            plot,
            width,
            stats,
        } => show(permutation, (*style).into(), *plot, *width, *stats),
        Command::Contains {
            text,
            pattern,
            count,
        } => contains(text, pattern, *count),
        Command::Enumerate { class } => enumerate(class),
        Command::Basis { class, from_file } => basis(class, from_file.as_deref())?,
        Command::Random(args) => random(args)?,
        Command::Tikz { permutation } => Output {
            text: permutation.to_tikz(),
            json: json!({ "tikz": permutation.to_tikz() }),
        },
    };

    TimedCode::instance().stop();

    match cli.format {
        Format::Text => println!("{}", output.text),
        Format::Json => println!("{}", serde_json::to_string_pretty(&output.json)?),
    }

    print_finished_message(cli.reporting);

    Ok(())
}

fn main() {
    let cli = CliApp::parse();

    cli.logging.initialize_logging();
    log::info!("Version: {}", clap::crate_version!());
    log::debug!("Command: {:?}", cli.command);

    run(cli).unwrap_or_else(|err| {
        log::error!("{} {err}", "error:".red().bold());
        std::process::exit(1)
    })
}
