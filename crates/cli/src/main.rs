//! Planner CLI - task lists, goals and a Pomodoro timer.

mod config;

use std::io::Write;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use planner_core::{Category, GoalId, Period, SubTask, SubTaskId, TaskId};
use planner_progress::{group_by_period, render_bar, ProgressRing, ProgressSnapshot};
use planner_storage::JsonFileStore;
use planner_timer::{format_clock, Mode, SessionTimer, TimerDriver, TimerEvent};
use planner_work::Planner;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Task lists, goals and a Pomodoro timer", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskCommand,
    },
    /// Manage goals
    Goal {
        #[command(subcommand)]
        action: GoalCommand,
    },
    /// Run the Pomodoro timer or stopwatch interactively
    Timer {
        /// Starting mode
        #[arg(long, value_enum, default_value = "pomodoro")]
        mode: ModeArg,
        /// Start counting immediately
        #[arg(long)]
        autostart: bool,
    },
    /// Show overall progress
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    /// Add a task
    Add {
        /// Task text
        text: String,
        /// Work, Personal or Anything
        #[arg(
            long,
            default_value = "Work",
            value_parser = PossibleValuesParser::new(Category::CHOICES)
        )]
        category: String,
        /// Custom label when the category is Anything
        #[arg(long, default_value = "")]
        label: String,
    },
    /// List tasks with their sub-tasks
    List,
    /// Tick a task off (or back on)
    Toggle {
        /// Task ID
        id: TaskId,
    },
    /// Delete a task and its sub-tasks
    Delete {
        /// Task ID
        id: TaskId,
    },
    /// Add a sub-task to a task
    SubAdd {
        /// Task ID
        task_id: TaskId,
        /// Sub-task text
        text: String,
        /// Work, Personal or Anything
        #[arg(
            long,
            default_value = "Work",
            value_parser = PossibleValuesParser::new(Category::CHOICES)
        )]
        category: String,
        /// Custom label when the category is Anything
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Tick a sub-task off (or back on)
    SubToggle {
        /// Task ID
        task_id: TaskId,
        /// Sub-task ID
        sub_task_id: SubTaskId,
    },
}

#[derive(Subcommand)]
enum GoalCommand {
    /// Add a goal
    Add {
        /// Goal text
        text: String,
        /// Number of completions that make the goal
        #[arg(long, allow_negative_numbers = true)]
        target: i64,
        /// Daily, Weekly, Monthly or Yearly
        #[arg(long, default_value = "daily")]
        period: Period,
        /// Work, Personal or Anything
        #[arg(
            long,
            default_value = "Work",
            value_parser = PossibleValuesParser::new(Category::CHOICES)
        )]
        category: String,
        /// Custom label when the category is Anything
        #[arg(long, default_value = "")]
        label: String,
    },
    /// List goals grouped by period
    List,
    /// Delete a goal and its sub-tasks
    Delete {
        /// Goal ID
        id: GoalId,
    },
    /// Add a sub-task to a goal
    SubAdd {
        /// Goal ID
        goal_id: GoalId,
        /// Sub-task text
        text: String,
        /// Work, Personal or Anything
        #[arg(
            long,
            default_value = "Work",
            value_parser = PossibleValuesParser::new(Category::CHOICES)
        )]
        category: String,
        /// Custom label when the category is Anything
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Tick a goal's sub-task off (or back on)
    SubToggle {
        /// Goal ID
        goal_id: GoalId,
        /// Sub-task ID
        sub_task_id: SubTaskId,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Pomodoro,
    Stopwatch,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pomodoro => Mode::Pomodoro,
            ModeArg::Stopwatch => Mode::Stopwatch,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.config.env_filter())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Task { action } => {
            let mut planner = open_planner(&cli.config)?;
            run_task_command(&mut planner, action)?;
        }
        Commands::Goal { action } => {
            let mut planner = open_planner(&cli.config)?;
            run_goal_command(&mut planner, action)?;
        }
        Commands::Timer { mode, autostart } => {
            run_timer(&cli.config, mode.into(), autostart).await?;
        }
        Commands::Status { json } => {
            let planner = open_planner(&cli.config)?;
            let snapshot =
                ProgressSnapshot::collect(planner.tasks().tasks(), planner.goals().goals());
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("Planner Status");
                println!(
                    "  Tasks: {}/{} done {}",
                    snapshot.completed_tasks,
                    snapshot.total_tasks,
                    render_bar(f64::from(snapshot.task_percentage()), 20),
                );
                println!(
                    "  Sub-tasks: {}/{} done",
                    snapshot.completed_sub_tasks, snapshot.total_sub_tasks
                );
                println!(
                    "  Goals reached: {}/{}",
                    snapshot.reached_goals, snapshot.total_goals
                );
            }
        }
    }

    Ok(())
}

fn open_planner(config: &Config) -> Result<Planner<JsonFileStore>> {
    let store = JsonFileStore::new(&config.data_dir)?;
    info!(data_dir = %store.root().display(), "opening planner");
    Ok(Planner::open(store)?)
}

fn run_task_command(planner: &mut Planner<JsonFileStore>, action: TaskCommand) -> Result<()> {
    match action {
        TaskCommand::Add { text, category, label } => {
            let category = Category::from_selection(&category, &label);
            match planner.add_task(&text, category)? {
                Some(id) => println!("Added task: {} - {}", id, text),
                None => println!("Nothing added: task text is blank"),
            }
        }
        TaskCommand::List => {
            let tasks = planner.tasks().tasks();
            println!("Tasks ({})", tasks.len());
            for task in tasks {
                println!(
                    "  {} {} | {} ({})",
                    checkbox(task.completed),
                    task.id,
                    task.text,
                    task.category
                );
                for sub in &task.sub_tasks {
                    print_sub_task(sub);
                }
            }
        }
        TaskCommand::Toggle { id } => {
            if planner.toggle_task(id)? {
                println!("Toggled task {}", id);
            } else {
                println!("Task not found");
            }
        }
        TaskCommand::Delete { id } => {
            if planner.delete_task(id)? {
                println!("Deleted task {}", id);
            } else {
                println!("Task not found");
            }
        }
        TaskCommand::SubAdd { task_id, text, category, label } => {
            let category = Category::from_selection(&category, &label);
            match planner.add_task_sub_task(task_id, &text, category)? {
                Some(id) => println!("Added sub-task: {} - {}", id, text),
                None => println!("Nothing added: blank text or unknown task"),
            }
        }
        TaskCommand::SubToggle { task_id, sub_task_id } => {
            if planner.toggle_task_sub_task(task_id, sub_task_id)? {
                println!("Toggled sub-task {}", sub_task_id);
            } else {
                println!("Sub-task not found");
            }
        }
    }
    Ok(())
}

fn run_goal_command(planner: &mut Planner<JsonFileStore>, action: GoalCommand) -> Result<()> {
    match action {
        GoalCommand::Add { text, target, period, category, label } => {
            let category = Category::from_selection(&category, &label);
            match planner.add_goal(&text, target, period, category)? {
                Some(id) => println!("Added {} goal: {} - {}", period, id, text),
                None => println!("Nothing added: goal needs text and a positive target"),
            }
        }
        GoalCommand::List => {
            let groups = group_by_period(planner.goals().goals());
            if groups.is_empty() {
                println!("No goals");
            }
            for group in groups {
                println!("{} Goals ({})", group.period, group.color);
                for goal in group.goals {
                    println!("  {} | {} ({})", goal.id, goal.text, goal.category);
                    println!(
                        "      {} {}/{} completed ({:.0}%)",
                        render_bar(goal.progress(), 20),
                        goal.completed_count(),
                        goal.target(),
                        goal.progress(),
                    );
                    for sub in goal.sub_tasks() {
                        print_sub_task(sub);
                    }
                }
            }
        }
        GoalCommand::Delete { id } => {
            if planner.delete_goal(id)? {
                println!("Deleted goal {}", id);
            } else {
                println!("Goal not found");
            }
        }
        GoalCommand::SubAdd { goal_id, text, category, label } => {
            let category = Category::from_selection(&category, &label);
            match planner.add_goal_sub_task(goal_id, &text, category)? {
                Some(id) => println!("Added sub-task: {} - {}", id, text),
                None => println!("Nothing added: blank text or unknown goal"),
            }
        }
        GoalCommand::SubToggle { goal_id, sub_task_id } => {
            if planner.toggle_goal_sub_task(goal_id, sub_task_id)? {
                if let Some(goal) = planner.goals().get(goal_id) {
                    println!("{}/{} completed", goal.completed_count(), goal.target());
                }
            } else {
                println!("Sub-task not found");
            }
        }
    }
    Ok(())
}

fn checkbox(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

fn print_sub_task(sub: &SubTask) {
    println!(
        "      {} {} | {} ({})",
        checkbox(sub.completed),
        sub.id,
        sub.text,
        sub.category
    );
}

async fn run_timer(config: &Config, mode: Mode, autostart: bool) -> Result<()> {
    let mut timer = SessionTimer::with_durations(config.durations());
    timer.switch_mode(mode);
    let (mut driver, mut events) = TimerDriver::new(timer);
    if autostart {
        driver.start().await;
    }

    println!("Commands: s = start/pause, l = lap, r = reset, m = switch mode, q = quit");
    render_timer(&driver.snapshot().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(event) = events.recv() => match event {
                TimerEvent::Tick { .. } => render_timer(&driver.snapshot().await),
                TimerEvent::SessionComplete(complete) => {
                    println!();
                    println!(
                        "Session Complete! {} is over, next up: {}.",
                        complete.finished, complete.next
                    );
                    println!("Take a break or start the next session. Press enter to close.");
                }
            },
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if driver.snapshot().await.notification().is_some() {
                    driver.dismiss_notification().await;
                    render_timer(&driver.snapshot().await);
                    continue;
                }
                match line.trim() {
                    "s" => driver.toggle().await,
                    "l" => {
                        driver.add_lap().await;
                        print_laps(driver.snapshot().await.laps());
                    }
                    "r" => driver.reset().await,
                    "m" => {
                        let next = match driver.snapshot().await.mode() {
                            Mode::Pomodoro => Mode::Stopwatch,
                            Mode::Stopwatch => Mode::Pomodoro,
                        };
                        driver.switch_mode(next).await;
                    }
                    "q" => break,
                    "" => {}
                    other => println!("Unknown command: {}", other),
                }
                render_timer(&driver.snapshot().await);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    driver.shutdown();
    println!();
    Ok(())
}

fn render_timer(timer: &SessionTimer) {
    let ring = ProgressRing::TIMER.geometry(timer.progress() * 100.0);
    let state = if timer.is_running() { "running" } else { "paused" };
    print!(
        "\r{} {} {} [{}]   ",
        timer.title(),
        format_clock(timer.elapsed()),
        render_bar(ring.shown_percent, 24),
        state,
    );
    std::io::stdout().flush().ok();
}

fn print_laps(laps: &[u64]) {
    println!();
    for (i, lap) in laps.iter().enumerate() {
        println!("Lap {}: {}", i + 1, format_clock(*lap));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_choices() {
        let cli = Cli::try_parse_from(["planner", "task", "add", "Gym", "--category", "Anything"])
            .unwrap();
        let Commands::Task { action: TaskCommand::Add { category, .. } } = cli.command else {
            panic!("expected task add");
        };
        assert_eq!(category, "Anything");

        let err = Cli::try_parse_from(["planner", "task", "add", "Gym", "--category", "Gym"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_goal_target_accepts_negative_numbers() {
        let args = ["planner", "goal", "add", "Run", "--target", "-3"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Commands::Goal { action: GoalCommand::Add { target, period, .. } } = cli.command
        else {
            panic!("expected goal add");
        };
        assert_eq!(target, -3);
        assert_eq!(period, Period::Daily);
    }
}
