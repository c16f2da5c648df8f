use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

use cli::session::Session;

#[derive(Parser)]
#[command(name = "sixtysix")]
#[command(about = "66 days, no excuses - daily habit challenge tracker")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.sixtysix/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory from the config file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's checklist and challenge progress
    Status,

    /// Check or uncheck a habit on today's checklist
    Toggle {
        /// Habit id as shown by `status`
        id: u32,
    },

    /// Mark today as done
    Complete,

    /// Admit today is lost and start over at day 1
    Fail,

    /// Replace today's notes
    Notes {
        /// Note text (words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Move today's notes into the history
    SaveNote,

    /// Show or change the bedtime
    Bedtime {
        /// New bedtime as HH:MM
        time: Option<String>,
    },

    /// Finish onboarding
    Onboard {
        /// Bedtime as HH:MM
        #[arg(long, default_value = "22:00")]
        bedtime: String,
    },

    /// Wipe progress and start again at day 1
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Manage the habit list
    Habits {
        #[command(subcommand)]
        command: HabitsCommands,
    },

    /// List unlocked and upcoming achievements
    Achievements,

    /// Show the day history
    History {
        /// Show at most this many entries, newest first
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Workout photos
    Photo {
        #[command(subcommand)]
        command: PhotoCommands,
    },

    /// Subscription plan and trial
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },

    /// Daily reminder
    Remind {
        #[command(subcommand)]
        command: RemindCommands,
    },

    /// Squad invite codes
    Squad {
        #[command(subcommand)]
        command: SquadCommands,
    },

    /// Configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum HabitsCommands {
    /// Show the current habit list
    List,
    /// Replace the habit list
    Set {
        /// One argument per habit
        #[arg(required = true)]
        habits: Vec<String>,
    },
    /// Use a preset list: medium, hard or extreme
    Preset { level: String },
}

#[derive(Subcommand)]
enum PhotoCommands {
    /// Attach a photo payload to a day
    Set {
        payload: String,
        /// Day to attach it to (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// List days with a photo
    List,
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Show the active plan and its limits
    Show,
    /// Start a free trial
    Trial {
        #[arg(default_value_t = sixtysix::subscription::DEFAULT_TRIAL_DAYS)]
        days: u32,
    },
    /// Record a purchase: monthly, annual or lifetime
    Purchase { period: String },
}

#[derive(Subcommand)]
enum RemindCommands {
    /// Enable the reminder (defaults to the configured time)
    Set { hour: Option<u32>, minute: Option<u32> },
    /// Disable the reminder
    Off,
    /// Print the reminder if it is due
    Check,
}

#[derive(Subcommand)]
enum SquadCommands {
    /// Generate a new invite code
    Code,
    /// Validate an invite code
    Check { code: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let command = cli.command.unwrap_or(Commands::Status);

    // Commands that never touch challenge data
    match &command {
        Commands::Config { command } => {
            return match command {
                ConfigCommands::Init { force } => cli::setup::init_command(config_path, *force),
                ConfigCommands::Show => cli::setup::show_command(config_path),
            };
        }
        Commands::Squad { command } => {
            return match command {
                SquadCommands::Code => cli::squad::code_command(),
                SquadCommands::Check { code } => cli::squad::check_command(code),
            };
        }
        _ => {}
    }

    let mut session = Session::open(config_path, cli.data_dir.as_deref())?;

    let result = match command {
        Commands::Status => cli::challenge::status_command(&session),
        Commands::Toggle { id } => cli::challenge::toggle_command(&mut session, id),
        Commands::Complete => cli::challenge::complete_command(&mut session),
        Commands::Fail => cli::challenge::fail_command(&mut session),
        Commands::Notes { text } => cli::challenge::notes_command(&mut session, &text.join(" ")),
        Commands::SaveNote => cli::challenge::save_note_command(&mut session),
        Commands::Bedtime { time } => cli::challenge::bedtime_command(&mut session, time.as_deref()),
        Commands::Onboard { bedtime } => cli::challenge::onboard_command(&mut session, &bedtime),
        Commands::Reset { yes } => cli::challenge::reset_command(&mut session, yes),
        Commands::History { limit } => cli::challenge::history_command(&session, limit),
        Commands::Achievements => cli::achievements::achievements_command(&session),
        Commands::Habits { command } => match command {
            HabitsCommands::List => cli::habits::list_command(&session),
            HabitsCommands::Set { habits } => cli::habits::set_command(&mut session, &habits),
            HabitsCommands::Preset { level } => cli::habits::preset_command(&mut session, &level),
        },
        Commands::Photo { command } => match command {
            PhotoCommands::Set { payload, date } => {
                cli::photo::set_command(&mut session, &payload, date.as_deref())
            }
            PhotoCommands::List => cli::photo::list_command(&session),
        },
        Commands::Plan { command } => match command {
            PlanCommands::Show => cli::plan::show_command(&session),
            PlanCommands::Trial { days } => cli::plan::trial_command(&session, days),
            PlanCommands::Purchase { period } => cli::plan::purchase_command(&session, &period),
        },
        Commands::Remind { command } => match command {
            RemindCommands::Set { hour, minute } => cli::remind::set_command(&session, hour, minute),
            RemindCommands::Off => cli::remind::off_command(&session),
            RemindCommands::Check => cli::remind::check_command(&session),
        },
        Commands::Config { .. } | Commands::Squad { .. } => Ok(()),
    };

    // Let queued mirror writes go out even when the command failed
    session.finish();
    result
}
