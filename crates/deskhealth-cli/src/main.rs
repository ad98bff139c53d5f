use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "deskhealth", version, about = "Desk Health: work sessions, stretch breaks and streaks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timer in the foreground
    Run(commands::run::RunArgs),
    /// Work and meal schedule
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Activity statistics and streaks
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Record activity by hand
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Exercise catalogue
    Exercise {
        #[command(subcommand)]
        action: commands::exercise::ExerciseAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DESKHEALTH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Log { action } => commands::log::run(action),
        Commands::Exercise { action } => commands::exercise::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("deskhealth").chain(args.iter().copied()))
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_schedule_check_with_time() {
        let cli = parse(&["schedule", "check", "--at", "12:30"]).unwrap();
        match cli.command {
            Commands::Schedule {
                action: commands::schedule::ScheduleAction::Check { at },
            } => assert_eq!(at.unwrap().to_string(), "12:30"),
            _ => panic!("Expected schedule check"),
        }
    }

    #[test]
    fn rejects_malformed_time() {
        assert!(parse(&["schedule", "check", "--at", "25:00"]).is_err());
        assert!(parse(&["schedule", "check", "--at", "noon"]).is_err());
    }

    #[test]
    fn parses_focus_minutes() {
        let cli = parse(&["log", "focus", "25"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Log {
                action: commands::log::LogAction::Focus { minutes: 25 }
            }
        ));
        assert!(parse(&["log", "focus", "-3"]).is_err());
    }

    #[test]
    fn parses_exercise_add() {
        let cli = parse(&[
            "exercise", "add", "Calf Raises", "--category", "strength", "--duration", "1 min",
        ])
        .unwrap();
        match cli.command {
            Commands::Exercise {
                action:
                    commands::exercise::ExerciseAction::Add {
                        name,
                        category,
                        duration,
                        ..
                    },
            } => {
                assert_eq!(name, "Calf Raises");
                assert_eq!(category, deskhealth_core::Category::Strength);
                assert_eq!(duration, "1 min");
            }
            _ => panic!("Expected exercise add"),
        }
    }

    #[test]
    fn parses_run_flags() {
        let cli = parse(&["run", "--json", "--start"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert!(args.json);
                assert!(args.start);
            }
            _ => panic!("Expected run"),
        }
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(parse(&["timer", "start"]).is_err());
    }
}
