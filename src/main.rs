// src/main.rs

//! Command-line entry point: a `watch` poll loop plus one-shot panel
//! views and mutation commands.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use postdash::config::Config;
use postdash::dashboard::{Dashboard, IntervalUnit, PanelId};
use postdash::error::{AppError, Result};
use postdash::locale::Lang;
use postdash::models::ScheduleSpec;
use postdash::panels::{Surface, TerminalSurface};

#[derive(Parser, Debug)]
#[command(name = "postdash", version, about = "Dashboard client for the posting bot")]
struct Cli {
    /// Path to the config file
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    /// UI language (ru/en); overrides the persisted choice
    #[arg(long)]
    lang: Option<Lang>,

    /// Only warnings and errors on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the backend and re-render panels as their data changes
    Watch {
        /// Restrict background polling to this panel (plus status)
        #[arg(long)]
        panel: Option<PanelId>,
    },
    /// Render one panel once
    Show { panel: PanelId },
    /// Render every panel once
    ShowAll,

    /// Add a group or channel by link, @username or ID
    AddGroup { input: String },
    /// Remove a group by chat ID
    RemoveGroup { chat_id: String },
    /// Pause or resume publishing to a group
    ToggleGroup {
        chat_id: String,
        /// Pause instead of resume
        #[arg(long)]
        disable: bool,
    },

    /// Set the publication interval
    SetInterval {
        value: String,
        #[arg(long, default_value = "minutes")]
        unit: IntervalUnit,
    },
    /// Publish the current post immediately
    PostNow,
    /// Start the scheduler
    StartScheduler,
    /// Stop the scheduler
    StopScheduler,
    /// Re-read the post source on the backend
    ReloadPost,

    /// History page navigation and filters
    History {
        #[arg(long)]
        next: bool,
        #[arg(long)]
        prev: bool,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Delete all history records
    ClearHistory,

    /// Statistics over an optional date range (YYYY-MM-DD)
    Statistics {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },

    /// Preview the post as rendered for a specific chat
    Preview {
        #[arg(long)]
        chat_id: Option<String>,
        #[arg(long, default_value = "")]
        chat_title: String,
    },

    /// Create a post template
    CreateTemplate { name: String, content: String },
    /// Update a template
    UpdateTemplate {
        id: i64,
        name: String,
        content: String,
    },
    /// Make a template the active one
    ActivateTemplate { id: i64 },
    /// Delete a template
    DeleteTemplate { id: i64 },

    /// Create a schedule
    CreateSchedule {
        #[command(flatten)]
        spec: SpecArgs,
        /// Activate it immediately
        #[arg(long)]
        active: bool,
    },
    /// Update a schedule
    UpdateSchedule {
        id: i64,
        #[command(flatten)]
        spec: SpecArgs,
        #[arg(long)]
        active: bool,
    },
    /// Make a schedule the active one
    ActivateSchedule { id: i64 },
    /// Delete a schedule
    DeleteSchedule { id: i64 },

    /// Switch the UI language and persist the choice
    SetLanguage { lang: Lang },
    /// End the backend session
    Logout,
}

/// Schedule fields as the web form exposed them; `build` picks the
/// variant from `schedule_type`.
#[derive(clap::Args, Debug)]
struct SpecArgs {
    /// interval | time | days | hours
    #[arg(long = "type")]
    schedule_type: String,

    #[arg(long)]
    minutes: Option<u32>,

    #[arg(long)]
    hour: Option<u8>,

    #[arg(long)]
    minute: Option<u8>,

    /// Comma-separated weekday numbers, Monday-based 0-6
    #[arg(long)]
    days: Option<String>,

    #[arg(long)]
    start_hour: Option<u8>,

    #[arg(long)]
    end_hour: Option<u8>,

    #[arg(long)]
    interval_minutes: Option<u32>,
}

impl SpecArgs {
    fn build(&self) -> Result<ScheduleSpec> {
        match self.schedule_type.as_str() {
            "interval" => Ok(ScheduleSpec::Interval {
                minutes: self.minutes.unwrap_or(0),
            }),
            "time" => Ok(ScheduleSpec::Time {
                hour: self.hour.unwrap_or(0),
                minute: self.minute.unwrap_or(0),
            }),
            "days" => {
                let days = self
                    .days
                    .as_deref()
                    .unwrap_or("")
                    .split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| {
                        s.trim()
                            .parse::<u8>()
                            .map_err(|_| AppError::config(format!("invalid day: {s}")))
                    })
                    .collect::<Result<Vec<u8>>>()?;
                Ok(ScheduleSpec::Days {
                    days,
                    hour: self.hour.unwrap_or(0),
                    minute: self.minute.unwrap_or(0),
                })
            }
            "hours" => Ok(ScheduleSpec::Hours {
                start_hour: self.start_hour.unwrap_or(0),
                end_hour: self.end_hour.unwrap_or(0),
                interval_minutes: self.interval_minutes.unwrap_or(0),
            }),
            other => Err(AppError::config(format!("unknown schedule type: {other}"))),
        }
    }
}

fn init_logging(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let config = Config::load_or_default(&cli.config);
    config.validate()?;
    let surface: Arc<dyn Surface> = Arc::new(TerminalSurface);
    let mut dash = Dashboard::with_saved_language(config, cli.lang, surface).await?;

    match cli.command {
        Command::Watch { panel } => dash.run_watch(panel).await,
        Command::Show { panel } => dash.refresh(panel).await,
        Command::ShowAll => dash.refresh_all().await,

        Command::AddGroup { input } => dash.add_group(&input).await,
        Command::RemoveGroup { chat_id } => dash.remove_group(&chat_id).await,
        Command::ToggleGroup { chat_id, disable } => dash.toggle_group(&chat_id, disable).await,

        Command::SetInterval { value, unit } => dash.set_interval(&value, unit).await,
        Command::PostNow => dash.publish_now().await,
        Command::StartScheduler => dash.start_scheduler().await,
        Command::StopScheduler => dash.stop_scheduler().await,
        Command::ReloadPost => dash.reload_post().await,

        Command::History {
            next,
            prev,
            status,
            search,
            start_date,
            end_date,
        } => {
            if status.is_some() || search.is_some() || start_date.is_some() || end_date.is_some() {
                dash.history_set_filters(status, search, start_date, end_date)
                    .await;
            } else if next {
                dash.history_next_page().await;
            } else if prev {
                dash.history_prev_page().await;
            } else {
                dash.refresh(PanelId::History).await;
            }
        }
        Command::ClearHistory => dash.clear_history().await,

        Command::Statistics {
            start_date,
            end_date,
        } => dash.statistics_set_range(start_date, end_date).await,

        Command::Preview {
            chat_id,
            chat_title,
        } => match chat_id {
            Some(chat_id) => dash.preview_for_chat(&chat_id, &chat_title).await,
            None => dash.refresh(PanelId::Preview).await,
        },

        Command::CreateTemplate { name, content } => dash.create_template(&name, &content).await,
        Command::UpdateTemplate { id, name, content } => {
            dash.update_template(id, &name, &content).await
        }
        Command::ActivateTemplate { id } => dash.activate_template(id).await,
        Command::DeleteTemplate { id } => dash.delete_template(id).await,

        Command::CreateSchedule { spec, active } => {
            dash.create_schedule(spec.build()?, active).await
        }
        Command::UpdateSchedule { id, spec, active } => {
            dash.update_schedule(id, spec.build()?, active).await
        }
        Command::ActivateSchedule { id } => dash.activate_schedule(id).await,
        Command::DeleteSchedule { id } => dash.delete_schedule(id).await,

        Command::SetLanguage { lang } => {
            dash.set_language(lang).await?;
            dash.refresh_all().await;
        }
        Command::Logout => dash.logout().await,
    }

    for notice in dash.notifier().active() {
        println!("[{}] {}", notice.kind.as_str(), notice.message);
    }
    Ok(())
}
