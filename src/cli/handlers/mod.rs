mod config;

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::storage::{self, Storage};
use crate::io::{config_io, logging};
use crate::model::config::AppConfig;
use crate::model::{Priority, TaskStatus, TaskTag};
use crate::ops::kanban::{self, MoveOutcome, TaskDraft};
use crate::ops::store::AppState;
use crate::ops::{auth, market, seed, settings};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Resolve the data directory, load config.toml and start logging
pub fn prepare(data_dir: Option<&str>) -> Result<(PathBuf, AppConfig), Box<dyn std::error::Error>> {
    let dir = storage::data_dir(data_dir.map(Path::new));
    let config = config_io::load_config(&dir)?;
    logging::init_logging(&dir, &config.log)?;
    Ok((dir, config))
}

/// Open the persisted state for a data directory
pub fn open_state(dir: &Path, config: &AppConfig) -> AppState {
    AppState::initialize(Some(Storage::new(dir, config.storage.snapshot_file.clone())))
}

/// Dispatch a parsed CLI command
pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let Some(command) = cli.command else {
        return Ok(());
    };
    let (dir, config) = prepare(cli.data_dir.as_deref())?;

    match command {
        Commands::Config(cmd) => config::cmd_config(cmd, &dir, json),
        Commands::Companies(args) => cmd_companies(args, json),
        command => {
            let mut state = open_state(&dir, &config);
            match command {
                Commands::Status => cmd_status(&state, &dir, json),
                Commands::Login(args) => cmd_login(&mut state, args, json),
                Commands::Logout => cmd_logout(&mut state),
                Commands::Tasks(args) => cmd_tasks(&state, args, json),
                Commands::Add(args) => cmd_add(&mut state, args, json),
                Commands::Move(args) => cmd_move(&mut state, args),
                Commands::Delete(args) => cmd_delete(&mut state, args),
                Commands::Perms => cmd_perms(&state, json),
                Commands::Export(args) => cmd_export(&mut state, args, &dir, &config, json),
                Commands::Reset => cmd_reset(&mut state),
                Commands::Config(_) | Commands::Companies(_) => Ok(()),
            }
        }
    }
}

fn require_user(state: &AppState) -> CmdResult {
    if state.user().is_none() {
        return Err("not signed in (run `edash login <username> <password>`)".into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

fn cmd_status(state: &AppState, dir: &Path, json: bool) -> CmdResult {
    let counts = state.task_counts();
    if json {
        let out = StatusJson {
            user: state.user().map(UserJson::from),
            active_view: state.ui.active_view,
            counts,
            data_dir: dir.display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_status(state.user(), &counts) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_login(state: &mut AppState, args: LoginArgs, json: bool) -> CmdResult {
    let user = state.login(&args.username, &args.password)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&UserJson::from(&user))?);
    } else {
        println!("signed in as {} ({})", user.name, user.role);
    }
    Ok(())
}

fn cmd_logout(state: &mut AppState) -> CmdResult {
    if state.user().is_none() {
        println!("not signed in");
        return Ok(());
    }
    state.logout();
    println!("signed out");
    Ok(())
}

fn cmd_perms(state: &AppState, json: bool) -> CmdResult {
    require_user(state)?;
    let summary = auth::permission_summary(state.user());
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    for (feature, allowed) in &summary.features {
        println!("{:<10} {}", feature, if *allowed { "yes" } else { "no" });
    }
    let statuses: Vec<&str> = summary.allowed_statuses.iter().map(|s| s.label()).collect();
    println!("statuses   {}", statuses.join(", "));
    Ok(())
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

fn cmd_tasks(state: &AppState, args: TasksArgs, json: bool) -> CmdResult {
    require_user(state)?;
    let status: Option<TaskStatus> = args.status.as_deref().map(str::parse).transpose()?;
    let tag: Option<TaskTag> = args.tag.as_deref().map(str::parse).transpose()?;
    let priority: Option<Priority> = args.priority.as_deref().map(str::parse).transpose()?;
    let matcher = args.search.as_deref().and_then(kanban::search_matcher);

    let tasks: Vec<_> = state
        .current_user_tasks()
        .into_iter()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .filter(|t| tag.is_none_or(|g| t.tag == g))
        .filter(|t| priority.is_none_or(|p| t.priority == p))
        .filter(|t| kanban::matches_search(t, matcher.as_ref()))
        .collect();
    let assignee = |id: &str| state.user_by_id(id).map(|u| u.name.as_str());

    if json {
        let rows: Vec<TaskRowJson> = tasks
            .iter()
            .map(|t| TaskRowJson {
                task: t,
                assignee: assignee(&t.assigned_user),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if tasks.is_empty() {
        println!("no tasks");
    } else {
        for task in tasks {
            println!("{}", format_task_line(task, assignee(&task.assigned_user)));
        }
    }
    Ok(())
}

fn cmd_add(state: &mut AppState, args: AddArgs, json: bool) -> CmdResult {
    require_user(state)?;
    let due_date = args
        .due
        .as_deref()
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
        .transpose()
        .map_err(|e| format!("invalid due date: {}", e))?;
    let draft = TaskDraft {
        title: args.title,
        description: args.description.unwrap_or_default(),
        tag: Some(args.tag.parse()?),
        priority: args.priority.parse()?,
        status: args.status.parse()?,
        due_date,
    };
    let task = kanban::save_task(state, None, draft, Utc::now())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("{}", task.id);
    }
    Ok(())
}

fn cmd_move(state: &mut AppState, args: MoveArgs) -> CmdResult {
    require_user(state)?;
    let status: TaskStatus = args.status.parse()?;
    let visible = state
        .task_by_id(&args.id)
        .is_some_and(|t| auth::can_view_task(state.user(), t));
    if !visible {
        return Err(format!("task not found: {}", args.id).into());
    }
    match kanban::move_task(state, &args.id, status)? {
        MoveOutcome::Moved(status) => println!("Task moved to {}", status),
        MoveOutcome::Unchanged => println!("{} is already in {}", args.id, status),
        MoveOutcome::Ignored => return Err(format!("task not found: {}", args.id).into()),
    }
    Ok(())
}

fn cmd_delete(state: &mut AppState, args: DeleteArgs) -> CmdResult {
    require_user(state)?;
    let task = kanban::delete_task(state, &args.id)?;
    println!("deleted {} {}", task.id, task.title);
    Ok(())
}

// ---------------------------------------------------------------------------
// Data commands
// ---------------------------------------------------------------------------

fn cmd_export(
    state: &mut AppState,
    args: ExportArgs,
    data_dir: &Path,
    config: &AppConfig,
    json: bool,
) -> CmdResult {
    require_user(state)?;
    let dir = args
        .output
        .or_else(|| config.storage.export_dir.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.to_path_buf());
    let path = settings::export_data(state, &dir, Utc::now())?;
    if json {
        let out = ExportJson {
            path: path.display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("exported to {}", path.display());
    }
    Ok(())
}

fn cmd_reset(state: &mut AppState) -> CmdResult {
    state.reset();
    println!("state reset to demo data");
    Ok(())
}

fn cmd_companies(args: CompaniesArgs, json: bool) -> CmdResult {
    let companies = seed::companies(seed::GENERATED_COMPANIES);
    let hits = market::search_companies(&companies, &args.query);
    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else if hits.is_empty() {
        println!("no matches");
    } else {
        for c in hits {
            println!("{}", format_company_line(c));
        }
    }
    Ok(())
}
