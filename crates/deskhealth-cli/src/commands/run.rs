//! Foreground timer loop.
//!
//! Drives a [`DeskSession`] from three intervals (countdown, off-duty poll,
//! meal poll) and single-letter commands read from stdin.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use clap::Args;
use deskhealth_core::{
    CatalogStore, Database, DeskSession, Event, LogStore, Notifier,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};

const TICK: Duration = Duration::from_secs(1);
const OFF_DUTY_POLL: Duration = Duration::from_secs(10);
const MEAL_POLL: Duration = Duration::from_secs(30);

const HELP: &str = "commands: p pause/resume, r reset, m meal, d done, e <id> pick exercise, s status, q quit";

#[derive(Args)]
pub struct RunArgs {
    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,
    /// Start the work countdown immediately
    #[arg(long)]
    pub start: bool,
}

/// Prints notifications to the terminal.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, body: &str) {
        println!("** {title} {body}");
    }

    fn focus_window(&self) {
        // Terminal bell.
        print!("\x07");
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let db = Database::open()?;
    let session = DeskSession::new(config, db, ConsoleNotifier);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_loop(session, args))
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

async fn run_loop<S, N>(
    mut session: DeskSession<S, N>,
    args: RunArgs,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: LogStore + CatalogStore,
    N: Notifier,
{
    let mut tick = interval(TICK);
    let mut off_duty_poll = interval(OFF_DUTY_POLL);
    let mut meal_poll = interval(MEAL_POLL);
    for i in [&mut tick, &mut off_duty_poll, &mut meal_poll] {
        i.set_missed_tick_behavior(MissedTickBehavior::Skip);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    if args.start {
        // The off-duty poll fires immediately and may pause this again.
        emit(&args, &[session.toggle_timer(now())]);
    }
    if !args.json {
        println!("{HELP}");
    }
    emit(&args, &[session.snapshot(now())]);

    loop {
        // Arms are polled in order: when the 10s and 30s polls fall due
        // together, off-duty is settled before the meal check reads it.
        let events = tokio::select! {
            biased;
            _ = tick.tick() => poll(&mut session, Poll::Tick, now()),
            _ = off_duty_poll.tick() => poll(&mut session, Poll::OffDuty, now()),
            _ = meal_poll.tick() => poll(&mut session, Poll::Meal, now()),
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => match handle_command(&mut session, line.trim()) {
                        Command::Events(events) => events,
                        Command::Quit => break,
                    },
                    None => {
                        tracing::debug!("stdin closed, running without commands");
                        stdin_open = false;
                        Vec::new()
                    }
                }
            }
            _ = &mut ctrl_c => break,
        };
        emit(&args, &events);
    }

    tracing::info!("session ended");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Poll {
    Tick,
    OffDuty,
    Meal,
}

fn poll<S, N>(session: &mut DeskSession<S, N>, which: Poll, now: NaiveDateTime) -> Vec<Event>
where
    S: LogStore + CatalogStore,
    N: Notifier,
{
    match which {
        Poll::Tick => {
            let mut events = session.tick(now);
            // A completion queued by this tick is handled once the tick has
            // finished, not a full second later.
            events.extend(session.process_completions(now));
            events
        }
        Poll::OffDuty => session.check_off_duty(now),
        Poll::Meal => session.check_meal(now),
    }
}

enum Command {
    Events(Vec<Event>),
    Quit,
}

fn handle_command<S, N>(session: &mut DeskSession<S, N>, line: &str) -> Command
where
    S: LogStore + CatalogStore,
    N: Notifier,
{
    let now = now();
    let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));
    let events = match cmd {
        "" => Vec::new(),
        "p" => vec![session.toggle_timer(now)],
        "r" => vec![session.reset(now)],
        "m" => vec![session.toggle_meal_mode(now)],
        "s" => vec![session.snapshot(now)],
        "d" => session.exercise_done(now).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            Vec::new()
        }),
        "e" => match session.select_exercise(arg.trim(), now) {
            Ok(event) => vec![event],
            Err(e) => {
                eprintln!("error: {e}");
                Vec::new()
            }
        },
        "q" => return Command::Quit,
        _ => {
            println!("{HELP}");
            Vec::new()
        }
    };
    Command::Events(events)
}

fn emit(args: &RunArgs, events: &[Event]) {
    for event in events {
        if args.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "failed to serialise event"),
            }
        } else if let Some(line) = describe(event) {
            println!("{line}");
        }
    }
}

fn clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// One human-readable line per event. Quiet events return `None`.
fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::TimerStarted { mode, time_left_secs, .. } => {
            format!("{mode} started, {} left", clock(*time_left_secs))
        }
        Event::TimerPaused { mode, time_left_secs, .. } => {
            format!("{mode} paused, {} left", clock(*time_left_secs))
        }
        Event::TimerReset { mode, duration_secs, .. } => {
            format!("{mode} reset to {}", clock(*duration_secs))
        }
        Event::TimerCompleted { mode, .. } => format!("{mode} finished"),
        Event::ModeChanged { to, duration_secs, active, .. } => format!(
            "now {to} ({}){}",
            clock(*duration_secs),
            if *active { "" } else { ", paused" }
        ),
        Event::WentOffDuty { .. } => "off duty".to_string(),
        Event::WorkAutoStarted { .. } => "work hours started".to_string(),
        Event::MealStarted { duration_secs, .. } => format!("meal break, {}", clock(*duration_secs)),
        Event::ExerciseDue { exercise: Some(ex), .. } => {
            format!("exercise: {} ({}) {}", ex.name, ex.duration, ex.description)
        }
        Event::ExerciseDue { exercise: None, .. } => {
            "no exercise enabled; pick one with `e <id>`".to_string()
        }
        Event::ExerciseCompleted { today, .. } => {
            format!("exercise done, {} today", today.exercises_completed)
        }
        Event::FocusLogged { .. } => return None,
        Event::StateSnapshot {
            state,
            current_exercise,
            upcoming_exercise,
            ..
        } => {
            let mut line = format!(
                "{} {} / {} ({:.0}%){}{}",
                state.mode,
                clock(state.time_left_secs),
                clock(state.current_duration_secs),
                state.progress() * 100.0,
                if state.is_active { "" } else { " (paused)" },
                if state.is_off_duty { " [off duty]" } else { "" },
            );
            if let Some(ex) = current_exercise {
                line.push_str(&format!(", doing {}", ex.name));
            } else if let Some(ex) = upcoming_exercise {
                line.push_str(&format!(", next {}", ex.name));
            }
            line
        }
    };
    Some(line)
}
