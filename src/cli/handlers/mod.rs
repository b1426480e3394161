use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, Settings};
use crate::io::storage::FileStorage;
use crate::model::filter::{FilterState, Tab};
use crate::model::task::TaskId;
use crate::ops::controller::TaskList;
use crate::ops::view::visible_tasks;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(
    command: Commands,
    settings: &Settings,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Add(args) => cmd_add(args, settings, json),
        Commands::List(args) => cmd_list(args, settings, json),
        Commands::Toggle(args) => cmd_toggle(args, settings, json),
        Commands::Edit(args) => cmd_edit(args, settings, json),
        Commands::Rm(args) => cmd_rm(args, settings, json),
        Commands::Stats => cmd_stats(settings, json),
        Commands::Config(cmd) => cmd_config(cmd, settings),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_id(raw: &str) -> Result<TaskId, Box<dyn std::error::Error>> {
    raw.parse::<TaskId>()
        .map_err(|_| format!("invalid task id '{}': expected a number", raw).into())
}

fn parse_tab(raw: &str) -> Result<Tab, Box<dyn std::error::Error>> {
    Tab::parse(raw).ok_or_else(|| {
        format!(
            "unknown tab '{}': expected one of all, pending, completed",
            raw
        )
        .into()
    })
}

/// Print the outcome of a mutation. No-ops are reported on stderr but are
/// not errors.
fn report_change(
    list: &TaskList<FileStorage>,
    id: Option<TaskId>,
    changed: bool,
    noop_reason: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let task = id.and_then(|id| list.get(id));
    if json {
        let out = ChangeJson {
            changed,
            task: task.filter(|_| changed),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if let (true, Some(task)) = (changed, task) {
        println!("{}", format_task_line(task));
    } else if changed {
        println!("ok");
    }
    if !changed {
        eprintln!("note: {}", noop_reason);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(
    args: AddArgs,
    settings: &Settings,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut list = settings.open_list();
    let text = args.text.join(" ");
    let id = list.create(&text)?;
    report_change(&list, id, id.is_some(), "task text is blank, nothing added", json)
}

fn cmd_toggle(
    args: IdArgs,
    settings: &Settings,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_id(&args.id)?;
    let mut list = settings.open_list();
    let changed = list.toggle_completed(id)?;
    report_change(&list, Some(id), changed, &format!("no task {}", id), json)
}

fn cmd_edit(
    args: EditArgs,
    settings: &Settings,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_id(&args.id)?;
    let mut list = settings.open_list();
    let text = args.text.join(" ");
    let changed = list.edit_text(id, &text)?;
    let reason = if list.get(id).is_none() {
        format!("no task {}", id)
    } else {
        "task text is blank, nothing changed".to_string()
    };
    report_change(&list, Some(id), changed, &reason, json)
}

fn cmd_rm(
    args: IdArgs,
    settings: &Settings,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_id(&args.id)?;
    let mut list = settings.open_list();
    let changed = list.delete(id)?;
    // The task is gone, so there's nothing to print but the outcome.
    report_change(&list, None, changed, &format!("no task {}", id), json)
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    args: ListArgs,
    settings: &Settings,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tab = parse_tab(&args.tab)?;
    let list = settings.open_list();
    let filter = FilterState::new(args.search.clone().unwrap_or_default(), tab);
    let visible = visible_tasks(list.tasks(), &filter);

    if json {
        let out = TaskListJson {
            tab,
            search: args.search.as_deref(),
            tasks: visible,
            counts: list.counts(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("No tasks");
    }
    for task in visible {
        println!("{}", format_task_line(task));
    }
    Ok(())
}

fn cmd_stats(settings: &Settings, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let list = settings.open_list();
    let counts = list.counts();
    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        println!("{}", format_counts(&counts));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config(cmd: ConfigCmd, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match cmd.action {
        ConfigAction::Path => {
            println!("config: {}", settings.config_path.display());
            println!("data:   {}", settings.data_dir.display());
        }
        ConfigAction::Set(args) => {
            config_io::set_config_value(&settings.config_path, &args.key, &args.value)?;
            println!("{} = {}", args.key, args.value);
        }
    }
    Ok(())
}
