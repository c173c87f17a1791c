use std::num::NonZero;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use log::LevelFilter;
use warrant::backend::BackendKind;
use warrant::generation::GeneratorConfig;
use warrant::runner;
use warrant::statistics;
use warrant::SolverOptions;

#[derive(Parser)]
#[command(name = "warrant", about = "A workflow satisfiability solver", version)]
struct Arguments {
    /// Log at debug level instead of warnings only.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a workflow instance file.
    Solve {
        /// The instance file to solve.
        file: PathBuf,

        /// The search backend to use.
        #[arg(long, value_enum, default_value = "enumeration")]
        backend: BackendChoice,

        /// Time budget for the whole solve, in milliseconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Stop counting further solutions after this many.
        #[arg(long, default_value_t = 1000)]
        solution_limit: u64,

        /// Cap the number of steps any single user performs.
        #[arg(long)]
        max_load: Option<NonZero<u32>>,

        /// Print search statistics after solving.
        #[arg(long)]
        statistics: bool,
    },
    /// Generate a random instance.
    Generate {
        /// The number of steps.
        #[arg(long)]
        steps: usize,

        /// The number of users.
        #[arg(long)]
        users: usize,

        /// Seed of the random generator.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// The number of authorisation lines.
        #[arg(long, default_value_t = 0)]
        authorisations: usize,

        /// The number of separation-of-duty constraints.
        #[arg(long, default_value_t = 0)]
        separations: usize,

        /// The number of binding-of-duty constraints.
        #[arg(long, default_value_t = 0)]
        bindings: usize,

        /// The number of at-most-k constraints.
        #[arg(long, default_value_t = 0)]
        at_most_k: usize,

        /// The number of one-team constraints.
        #[arg(long, default_value_t = 0)]
        one_team: usize,

        /// Write to this file instead of standard output.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Mirror of [`BackendKind`] carrying the clap derive.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Enumeration,
    Incremental,
}

impl From<BackendChoice> for BackendKind {
    fn from(choice: BackendChoice) -> BackendKind {
        match choice {
            BackendChoice::Enumeration => BackendKind::Enumeration,
            BackendChoice::Incremental => BackendKind::Incremental,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let arguments = Arguments::parse();
    configure_logging(arguments.verbose);

    match arguments.command {
        Command::Solve {
            file,
            backend,
            timeout,
            solution_limit,
            max_load,
            statistics: log_statistics,
        } => {
            statistics::configure(log_statistics, "%%", None);

            let interrupt = Arc::new(AtomicBool::new(false));
            let _ =
                signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&interrupt))
                    .context("could not install the interrupt handler")?;

            let options = SolverOptions {
                solution_limit,
                max_steps_per_user: max_load,
            };
            let result = runner::solve_file(
                &file,
                backend.into(),
                options,
                timeout.map(Duration::from_millis),
                interrupt,
            )
            .with_context(|| format!("could not solve {}", file.display()))?;
            println!("{}", runner::render_report(&result));
        }
        Command::Generate {
            steps,
            users,
            seed,
            authorisations,
            separations,
            bindings,
            at_most_k,
            one_team,
            output,
        } => {
            let instance = GeneratorConfig::new(steps, users)
                .with_seed(seed)
                .with_authorisations(authorisations)
                .with_separation_of_duty(separations)
                .with_binding_of_duty(bindings)
                .with_at_most_k(at_most_k)
                .with_one_team(one_team)
                .generate();
            match output {
                Some(path) => std::fs::write(&path, instance.to_string())
                    .with_context(|| format!("could not write {}", path.display()))?,
                None => print!("{instance}"),
            }
        }
    }

    Ok(())
}

fn configure_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .init();
}
