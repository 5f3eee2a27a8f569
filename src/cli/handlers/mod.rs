use std::collections::HashSet;
use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::board::{Board, BoardError};
use crate::model::config::{BoardConfig, UserConfig};
use crate::model::task::{Document, NewTask, Task, TeamMember};
use crate::ops::deadline;
use crate::ops::filter::TaskFilter;
use crate::ops::search;

/// Board state for one run of the program, plus who is using it
pub struct Session {
    pub board: Board,
    pub user: UserConfig,
}

impl Session {
    /// Build the starting board from config. `empty` skips the sample data.
    pub fn from_config(config: &BoardConfig, empty: bool) -> Result<Self, BoardError> {
        let mut config = config.clone();
        if empty {
            config.seed.sample_data = false;
        }
        Ok(Session {
            board: Board::from_config(&config)?,
            user: config.user,
        })
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(
    session: &mut Session,
    cmd: Commands,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        // Read commands
        Commands::Board(args) => cmd_board(&session.board, args, json, out),
        Commands::List(args) => cmd_list(&session.board, args, json, out),
        Commands::Show(args) => cmd_show(&session.board, args, json, out),
        Commands::Search(args) => cmd_search(&session.board, args, json, out),
        Commands::Columns => cmd_columns(&session.board, json, out),
        Commands::Stats => cmd_stats(&session.board, json, out),
        Commands::Members => cmd_members(&session.board, json, out),
        Commands::Docs => cmd_docs(&session.board, json, out),

        // Write commands
        Commands::Add(args) => cmd_add(&mut session.board, args, json, out),
        Commands::Edit(args) => cmd_edit(&mut session.board, args, out),
        Commands::Rm(args) => cmd_rm(&mut session.board, args, out),
        Commands::Mv(args) => cmd_mv(&mut session.board, args, out),
        Commands::Column(args) => cmd_column(&mut session.board, args, json, out),
        Commands::Comment(args) => cmd_comment(session, args, json, out),
        Commands::Label(args) => cmd_label(&mut session.board, args, out),
        Commands::Assign(args) => cmd_assign(&mut session.board, args, json, out),
        Commands::Unassign(args) => cmd_unassign(&mut session.board, args, out),
        Commands::Attach(args) => cmd_attach(session, args, json, out),
        Commands::Detach(args) => cmd_detach(&mut session.board, args, out),
        Commands::Sub(args) => cmd_sub(&mut session.board, args, json, out),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_json<T: Serialize + ?Sized>(
    out: &mut dyn Write,
    value: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn print_lines(out: &mut dyn Write, lines: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Print the id a write command produced, as text or JSON
fn print_created(
    out: &mut dyn Write,
    json: bool,
    what: &str,
    id: String,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        print_json(out, &IdJson { id })
    } else {
        writeln!(out, "{} {}", what, id)?;
        Ok(())
    }
}

/// Column id for a user-supplied column reference: an exact id, else a
/// case-insensitive title. Unknown references come back unchanged so the
/// board can reject them.
fn resolve_column(board: &Board, reference: &str) -> String {
    if board.has_column(reference) {
        return reference.to_string();
    }
    let lowered = reference.to_lowercase();
    board
        .columns()
        .iter()
        .find(|c| c.title.to_lowercase() == lowered)
        .map(|c| c.id.clone())
        .unwrap_or_else(|| reference.to_string())
}

fn require_task<'a>(board: &'a Board, id: &str) -> Result<&'a Task, Box<dyn std::error::Error>> {
    board
        .task(id)
        .ok_or_else(|| format!("task not found: {}", id).into())
}

/// A known member by id or name (case-insensitive), else a new one
fn member_for(board: &Board, name: &str) -> TeamMember {
    let lowered = name.trim().to_lowercase();
    board
        .members()
        .into_iter()
        .find(|m| m.id == name || m.name.to_lowercase() == lowered)
        .cloned()
        .unwrap_or_else(|| TeamMember::ad_hoc(board.next_id(), name.trim()))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_board(
    board: &Board,
    args: BoardArgs,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let today = deadline::today();
    let only = args.column.as_deref().map(|c| resolve_column(board, c));
    if let Some(id) = &only {
        board.require_column(id)?;
    }
    let lanes: Vec<_> = board
        .lanes()
        .iter()
        .filter(|l| only.as_ref().is_none_or(|id| l.column_id == *id))
        .collect();

    if json {
        let tasks: Vec<Vec<&Task>> = lanes.iter().map(|l| board.column_tasks(&l.column_id)).collect();
        let results: Vec<LaneJson> = lanes
            .iter()
            .zip(&tasks)
            .map(|(lane, tasks)| lane_to_json(lane, tasks, today))
            .collect();
        return print_json(out, &results);
    }

    writeln!(out, "{}", board.name())?;
    for lane in lanes {
        writeln!(out)?;
        let tasks = board.column_tasks(&lane.column_id);
        print_lines(out, &format_lane(lane, &tasks, today))?;
    }
    Ok(())
}

fn cmd_list(
    board: &Board,
    args: ListArgs,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let today = deadline::today();
    let filter = TaskFilter {
        status: args.column.as_deref().map(|c| resolve_column(board, c)),
        priority: args.priority.as_deref().map(parse_priority).transpose()?,
        deadline: args.deadline.as_deref().map(parse_bucket).transpose()?,
    };
    let mut tasks = board.filter_tasks(&filter);
    if let Some(term) = &args.search {
        let matching: HashSet<&str> = board
            .search_tasks(term)
            .into_iter()
            .map(|t| t.id.as_str())
            .collect();
        tasks.retain(|t| matching.contains(t.id.as_str()));
    }

    if json {
        let results: Vec<TaskJson> = tasks.iter().map(|t| task_to_json(t, today)).collect();
        return print_json(out, &results);
    }
    for task in tasks {
        writeln!(out, "{}", format_task_line(task, today))?;
    }
    Ok(())
}

fn cmd_show(
    board: &Board,
    args: IdArg,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let today = deadline::today();
    let task = require_task(board, &args.id)?;
    if json {
        return print_json(out, &task_to_json(task, today));
    }
    let column_title = board
        .column(&task.status)
        .map_or(task.status.as_str(), |c| c.title.as_str());
    print_lines(out, &format_task_detail(task, column_title, today))
}

fn cmd_search(
    board: &Board,
    args: SearchArgs,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    // Nothing to highlight: a blank term lists every task
    if args.term.trim().is_empty() {
        let today = deadline::today();
        let tasks = board.search_tasks(&args.term);
        if json {
            let results: Vec<TaskJson> = tasks.iter().map(|t| task_to_json(t, today)).collect();
            return print_json(out, &results);
        }
        for task in tasks {
            writeln!(out, "{}", format_task_line(task, today))?;
        }
        return Ok(());
    }

    let hits = search::search_hits(board.tasks(), &args.term);
    let with_task: Vec<(&search::SearchHit, &Task)> = hits
        .iter()
        .filter_map(|h| board.task(&h.task_id).map(|t| (h, t)))
        .collect();

    if json {
        let results: Vec<SearchHitJson> = with_task
            .iter()
            .map(|(hit, task)| hit_to_json(hit, &task.title))
            .collect();
        return print_json(out, &results);
    }
    if with_task.is_empty() {
        writeln!(out, "no matches")?;
    }
    for (hit, task) in with_task {
        writeln!(out, "{}", format_hit(hit, task))?;
    }
    Ok(())
}

fn cmd_columns(
    board: &Board,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let results: Vec<ColumnJson> = board
            .lanes()
            .iter()
            .map(|l| ColumnJson {
                id: &l.column_id,
                title: &l.title,
                icon: l.icon,
                tasks: l.task_ids.len(),
            })
            .collect();
        return print_json(out, &results);
    }
    print_lines(out, &format_columns(board.columns(), board.lanes()))
}

fn cmd_stats(
    board: &Board,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = board.stats();
    if json {
        return print_json(out, &stats);
    }
    print_lines(out, &format_stats(&stats))
}

fn cmd_members(
    board: &Board,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let members = board.members();
    if json {
        return print_json(out, &members);
    }
    for member in members {
        writeln!(out, "{}", format_member_line(member))?;
    }
    Ok(())
}

fn cmd_docs(
    board: &Board,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let documents = board.documents();
    if json {
        let results: Vec<DocumentJson> = documents
            .iter()
            .map(|&(task, document)| DocumentJson {
                task_id: &task.id,
                document,
            })
            .collect();
        return print_json(out, &results);
    }
    if documents.is_empty() {
        writeln!(out, "no documents")?;
    }
    for (task, doc) in documents {
        writeln!(out, "{}", format_document_line(task, doc))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(
    board: &mut Board,
    args: AddArgs,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let column = match &args.column {
        Some(c) => resolve_column(board, c),
        None => board
            .columns()
            .first()
            .map(|c| c.id.clone())
            .ok_or(BoardError::NoColumns)?,
    };
    let priority = parse_priority(&args.priority)?;
    let due = parse_deadline(&args.due, deadline::today())?;

    let mut assignees: Vec<TeamMember> = Vec::new();
    for name in args.assignee.iter().filter(|n| !n.trim().is_empty()) {
        let member = member_for(board, name);
        let lowered = member.name.to_lowercase();
        if !assignees
            .iter()
            .any(|a| a.id == member.id || a.name.to_lowercase() == lowered)
        {
            assignees.push(member);
        }
    }
    let labels = args
        .label
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty());

    let new = NewTask::new(args.title, column, priority, due)
        .with_description(args.description.unwrap_or_default())
        .with_assignees(assignees)
        .with_labels(labels);
    let id = board.create_task(new)?;
    print_created(out, json, "created", id)
}

fn cmd_edit(
    board: &mut Board,
    args: EditArgs,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut task = require_task(board, &args.id)?.clone();
    if let Some(title) = args.title {
        task.title = title.trim().to_string();
    }
    if let Some(description) = args.description {
        task.description = description;
    }
    if let Some(p) = args.priority {
        task.priority = parse_priority(&p)?;
    }
    if let Some(due) = args.due {
        task.deadline = parse_deadline(&due, deadline::today())?;
    }
    if let Some(column) = args.column {
        task.status = resolve_column(board, &column);
    }
    board.update_task(task)?;
    writeln!(out, "updated {}", args.id)?;
    Ok(())
}

fn cmd_rm(
    board: &mut Board,
    args: IdArg,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if !board.delete_task(&args.id) {
        return Err(format!("task not found: {}", args.id).into());
    }
    writeln!(out, "deleted {}", args.id)?;
    Ok(())
}

fn cmd_mv(
    board: &mut Board,
    args: MvArgs,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let column = resolve_column(board, &args.column);
    if !board.move_task(&args.id, &column)? {
        return Err(format!("task not found: {}", args.id).into());
    }
    writeln!(out, "moved {} to {}", args.id, column)?;
    Ok(())
}

fn cmd_column(
    board: &mut Board,
    args: ColumnCmd,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match args.action {
        ColumnAction::Add { title, icon } => {
            let icon = icon.as_deref().map(parse_icon).transpose()?;
            let id = board.add_column(&title, icon)?;
            print_created(out, json, "added column", id)
        }
        ColumnAction::Rm { column } => {
            let id = resolve_column(board, &column);
            if !board.delete_column(&id)? {
                return Err(BoardError::ColumnNotFound(id).into());
            }
            writeln!(out, "deleted column {}", id)?;
            Ok(())
        }
        ColumnAction::Rename {
            column,
            title,
            icon,
            no_icon,
        } => {
            let id = resolve_column(board, &column);
            let icon = match icon {
                Some(name) => Some(parse_icon(&name)?),
                None if no_icon => None,
                None => board.column(&id).and_then(|c| c.icon),
            };
            if !board.rename_column(&id, &title, icon)? {
                return Err(BoardError::ColumnNotFound(id).into());
            }
            writeln!(out, "renamed column {}", id)?;
            Ok(())
        }
    }
}

fn cmd_comment(
    session: &mut Session,
    args: CommentArgs,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = session
        .board
        .add_comment(&args.id, &session.user.id, &args.text)?
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    print_created(out, json, "added comment", id)
}

fn cmd_label(
    board: &mut Board,
    args: LabelCmd,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match args.action {
        LabelAction::Add { id, label } => {
            require_task(board, &id)?;
            if board.add_label(&id, &label)? {
                writeln!(out, "labeled {} {}", id, label.trim())?;
            } else {
                writeln!(out, "{} already has label {}", id, label.trim())?;
            }
        }
        LabelAction::Rm { id, label } => {
            require_task(board, &id)?;
            if !board.remove_label(&id, &label) {
                return Err(format!("{} has no label {}", id, label).into());
            }
            writeln!(out, "unlabeled {} {}", id, label)?;
        }
    }
    Ok(())
}

fn cmd_assign(
    board: &mut Board,
    args: AssignArgs,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let member_id = board
        .add_assignee(&args.id, &args.name)?
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    print_created(out, json, "assigned", member_id)
}

fn cmd_unassign(
    board: &mut Board,
    args: AssignArgs,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let task = require_task(board, &args.id)?;
    let lowered = args.name.to_lowercase();
    let member_id = task
        .assignees
        .iter()
        .find(|m| m.id == args.name || m.name.to_lowercase() == lowered)
        .map(|m| m.id.clone())
        .ok_or_else(|| format!("{} is not assigned to {}", args.name, args.id))?;
    board.remove_assignee(&args.id, &member_id);
    writeln!(out, "unassigned {} from {}", member_id, args.id)?;
    Ok(())
}

fn cmd_attach(
    session: &mut Session,
    args: AttachArgs,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let board = &mut session.board;
    require_task(board, &args.id)?;
    let name = args.name.trim();
    if name.is_empty() {
        return Err(BoardError::EmptyInput {
            what: "document name",
        }
        .into());
    }
    let document = Document {
        id: board.next_id(),
        name: name.to_string(),
        mime_type: args
            .mime_type
            .unwrap_or_else(|| guess_mime_type(name).to_string()),
        url: args.url.unwrap_or_else(|| format!("file://{}", name)),
        uploaded_by: session.user.id.clone(),
        uploaded_at: Utc::now(),
    };
    let id = document.id.clone();
    board.attach_document(&args.id, document);
    print_created(out, json, "attached", id)
}

fn cmd_detach(
    board: &mut Board,
    args: DetachArgs,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    require_task(board, &args.id)?;
    if !board.remove_document(&args.id, &args.doc) {
        return Err(format!("document not found: {}", args.doc).into());
    }
    writeln!(out, "detached {} from {}", args.doc, args.id)?;
    Ok(())
}

fn cmd_sub(
    board: &mut Board,
    args: SubCmd,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let subtask_missing = |id: &str, sub: &str| format!("subtask not found: {}/{}", id, sub);
    match args.action {
        SubAction::Add {
            id,
            title,
            assignee,
        } => {
            let assignee = assignee
                .filter(|n| !n.trim().is_empty())
                .map(|n| member_for(board, &n));
            let sub_id = board
                .add_subtask(&id, &title, assignee)?
                .ok_or_else(|| format!("task not found: {}", id))?;
            print_created(out, json, "added subtask", sub_id)
        }
        SubAction::Toggle { id, sub } => {
            require_task(board, &id)?;
            if !board.toggle_subtask(&id, &sub) {
                return Err(subtask_missing(&id, &sub).into());
            }
            let done = board
                .task(&id)
                .and_then(|t| t.subtasks.iter().find(|s| s.id == sub))
                .is_some_and(|s| s.completed);
            writeln!(out, "{} {}", if done { "completed" } else { "reopened" }, sub)?;
            Ok(())
        }
        SubAction::Rm { id, sub } => {
            require_task(board, &id)?;
            if !board.delete_subtask(&id, &sub) {
                return Err(subtask_missing(&id, &sub).into());
            }
            writeln!(out, "deleted subtask {}", sub)?;
            Ok(())
        }
        SubAction::Assign { id, sub, name } => {
            require_task(board, &id)?;
            let member = member_for(board, &name);
            let member_name = member.name.clone();
            if !board.assign_subtask(&id, &sub, member) {
                return Err(subtask_missing(&id, &sub).into());
            }
            writeln!(out, "assigned {} to {}", member_name, sub)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::column::ColumnIcon;

    fn run(session: &mut Session, line: &str) -> Result<String, String> {
        use clap::Parser;
        let words = shell_words::split(line).unwrap();
        let parsed = ShellLine::try_parse_from(words).map_err(|e| e.to_string())?;
        let mut buf = Vec::new();
        dispatch(session, parsed.command, parsed.json, &mut buf).map_err(|e| e.to_string())?;
        Ok(String::from_utf8(buf).unwrap())
    }

    fn seeded() -> Session {
        Session::from_config(&BoardConfig::default(), false).unwrap()
    }

    #[test]
    fn test_session_empty_flag() {
        let session = Session::from_config(&BoardConfig::default(), true).unwrap();
        assert!(session.board.tasks().is_empty());
        assert_eq!(session.board.columns().len(), 4);
        assert_eq!(session.user.id, "current-user-id");
    }

    #[test]
    fn test_resolve_column_by_title() {
        let session = seeded();
        assert_eq!(resolve_column(&session.board, "col-3"), "col-3");
        assert_eq!(resolve_column(&session.board, "in progress"), "col-2");
        assert_eq!(resolve_column(&session.board, "nowhere"), "nowhere");
    }

    #[test]
    fn test_mv_by_title() {
        let mut session = seeded();
        let out = run(&mut session, "mv 3 Done").unwrap();
        assert_eq!(out, "moved 3 to col-4\n");
        assert_eq!(session.board.task("3").unwrap().status, "col-4");
    }

    #[test]
    fn test_mv_unknown_column_and_task() {
        let mut session = seeded();
        let err = run(&mut session, "mv 3 Archive").unwrap_err();
        assert_eq!(err, "column not found: Archive");
        let err = run(&mut session, "mv 99 Done").unwrap_err();
        assert_eq!(err, "task not found: 99");
    }

    #[test]
    fn test_add_then_show() {
        let mut session = seeded();
        let out = run(
            &mut session,
            "add 'Write release notes' --due +3d --column Review --priority high --label docs --assignee Madhura",
        )
        .unwrap();
        let id = out.trim().strip_prefix("created ").unwrap().to_string();
        let task = session.board.task(&id).unwrap();
        assert_eq!(task.status, "col-3");
        // Known member reused rather than created
        assert_eq!(task.assignees[0].id, "tm-2");

        let shown = run(&mut session, &format!("show {}", id)).unwrap();
        assert!(shown.contains("Write release notes"));
        assert!(shown.contains("column:    Review (col-3)"));
        assert!(shown.contains("labels:    docs"));
    }

    #[test]
    fn test_add_skips_repeated_assignee_names() {
        let mut session = seeded();
        let out = run(
            &mut session,
            "add 'Pair on release' --due today --assignee bob --assignee Bob --assignee ' BOB '",
        )
        .unwrap();
        let id = out.trim().strip_prefix("created ").unwrap().to_string();
        let names: Vec<&str> = session
            .board
            .task(&id)
            .unwrap()
            .assignees
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["bob"]);
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let mut session = seeded();
        let err = run(&mut session, "add '   ' --due today").unwrap_err();
        assert_eq!(err, "task title cannot be empty");
        assert_eq!(session.board.tasks().len(), 8);
    }

    #[test]
    fn test_edit_fields() {
        let mut session = seeded();
        run(&mut session, "edit 4 --title 'Set up CI' --priority high --column done").unwrap();
        let task = session.board.task("4").unwrap();
        assert_eq!(task.title, "Set up CI");
        assert_eq!(task.status, "col-4");
        assert_eq!(session.board.column_tasks("col-4").len(), 2);
    }

    #[test]
    fn test_list_filters() {
        let mut session = seeded();
        let out = run(&mut session, "list --column 'In Progress' --priority medium").unwrap();
        let ids: Vec<&str> = out.lines().map(|l| l.split_whitespace().next().unwrap()).collect();
        assert_eq!(ids, vec!["2", "6", "7"]);

        let out = run(&mut session, "list --search LOGIN").unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("3 "));

        let err = run(&mut session, "list --priority urgent").unwrap_err();
        assert!(err.contains("unknown priority"));
    }

    #[test]
    fn test_column_lifecycle() {
        let mut session = seeded();
        let out = run(&mut session, "column add Backlog --icon triangle").unwrap();
        let id = out.trim().strip_prefix("added column ").unwrap().to_string();
        run(&mut session, "column rename Backlog Icebox").unwrap();
        let col = session.board.column(&id).unwrap();
        assert_eq!(col.title, "Icebox");
        assert_eq!(col.icon, Some(ColumnIcon::Triangle));

        run(&mut session, "column rename Icebox Later --icon star").unwrap();
        assert_eq!(session.board.column(&id).unwrap().icon, Some(ColumnIcon::Star));
        run(&mut session, "column rename Later Someday --no-icon").unwrap();
        let col = session.board.column(&id).unwrap();
        assert_eq!(col.title, "Someday");
        assert_eq!(col.icon, None);
        assert!(run(&mut session, "column rename Someday X --icon star --no-icon").is_err());

        run(&mut session, "column rm 'In Progress'").unwrap();
        assert_eq!(session.board.column_tasks("col-1").len(), 6);
    }

    #[test]
    fn test_last_column_error() {
        let mut session = seeded();
        for col in ["col-1", "col-2", "col-3"] {
            run(&mut session, &format!("column rm {}", col)).unwrap();
        }
        let err = run(&mut session, "column rm col-4").unwrap_err();
        assert_eq!(err, "cannot delete the last column");
        assert_eq!(session.board.tasks().len(), 8);
        assert!(session.board.tasks().iter().all(|t| t.status == "col-4"));
    }

    #[test]
    fn test_comment_uses_session_user() {
        let mut session = seeded();
        run(&mut session, "comment 2 'Needs another pass'").unwrap();
        let comment = &session.board.task("2").unwrap().comments[0];
        assert_eq!(comment.author_id, "current-user-id");
        assert_eq!(comment.text, "Needs another pass");
        assert!(run(&mut session, "comment 2 '  '").is_err());
    }

    #[test]
    fn test_labels() {
        let mut session = seeded();
        assert_eq!(
            run(&mut session, "label add 3 Bugfix").unwrap(),
            "3 already has label Bugfix\n"
        );
        run(&mut session, "label add 3 Urgent").unwrap();
        run(&mut session, "label rm 3 Bugfix").unwrap();
        let labels: Vec<&str> = session.board.task("3").unwrap().labels.iter().map(String::as_str).collect();
        assert_eq!(labels, vec!["High Priority", "Urgent"]);
        assert!(run(&mut session, "label rm 3 Bugfix").is_err());
    }

    #[test]
    fn test_assign_and_unassign() {
        let mut session = seeded();
        run(&mut session, "assign 4 'Jane Doe'").unwrap();
        let err = run(&mut session, "assign 4 'jane doe'").unwrap_err();
        assert_eq!(err, "assignee \"jane doe\" already added");
        let jane = session.board.task("4").unwrap().assignees[1].clone();
        assert_eq!(jane.email, "jane.doe@example.com");

        run(&mut session, "unassign 4 'JANE DOE'").unwrap();
        assert_eq!(session.board.task("4").unwrap().assignees.len(), 1);
        assert!(run(&mut session, "unassign 4 Jane").is_err());
    }

    #[test]
    fn test_attach_and_detach() {
        let mut session = seeded();
        let out = run(&mut session, "attach 5 release-notes.pdf").unwrap();
        let doc_id = out.trim().strip_prefix("attached ").unwrap().to_string();
        let doc = &session.board.task("5").unwrap().documents[0];
        assert_eq!(doc.mime_type, "application/pdf");
        assert_eq!(doc.uploaded_by, "current-user-id");
        assert!(run(&mut session, "docs").unwrap().contains("release-notes.pdf"));

        run(&mut session, &format!("detach 5 {}", doc_id)).unwrap();
        assert!(session.board.documents().is_empty());
        assert!(run(&mut session, &format!("detach 5 {}", doc_id)).is_err());
    }

    #[test]
    fn test_subtasks() {
        let mut session = seeded();
        assert_eq!(run(&mut session, "sub toggle 1 st-2").unwrap(), "completed st-2\n");
        assert_eq!(session.board.task("1").unwrap().subtask_progress(), (2, 2));

        run(&mut session, "sub assign 1 st-1 aditya").unwrap();
        let sub = &session.board.task("1").unwrap().subtasks[0];
        assert_eq!(sub.assignee.as_ref().unwrap().id, "tm-3");

        let out = run(&mut session, "sub add 1 'Review with team' --assignee Supriya").unwrap();
        assert!(out.starts_with("added subtask "));
        run(&mut session, "sub rm 1 st-2").unwrap();
        assert_eq!(session.board.task("1").unwrap().subtask_progress(), (1, 2));

        assert!(run(&mut session, "sub toggle 1 st-9").is_err());
        assert!(run(&mut session, "sub add 99 Orphan").is_err());
    }

    #[test]
    fn test_json_output() {
        let mut session = seeded();
        let out = run(&mut session, "board --json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 4);
        assert_eq!(value[2]["tasks"][0]["id"], "3");

        let out = run(&mut session, "search --json v1.0").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["taskId"], "5");
        assert_eq!(value[0]["field"], "title");
        assert_eq!(value[0]["spans"][0][0], 7);
    }

    #[test]
    fn test_board_single_column() {
        let mut session = seeded();
        let out = run(&mut session, "board --column review").unwrap();
        assert!(out.contains("== Review (1) =="));
        assert!(!out.contains("In Progress"));
        assert!(run(&mut session, "board --column Archive").is_err());
    }

    #[test]
    fn test_search_highlights() {
        let mut session = seeded();
        let out = run(&mut session, "search login").unwrap();
        assert!(out.contains("Fix [login] page bug"));
        assert_eq!(run(&mut session, "search kubernetes").unwrap(), "no matches\n");
    }

    #[test]
    fn test_search_blank_term_lists_all_tasks() {
        let mut session = seeded();
        let out = run(&mut session, "search ''").unwrap();
        let ids: Vec<&str> = out.lines().map(|l| l.split_whitespace().next().unwrap()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);

        let out = run(&mut session, "search --json '  '").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let tasks = parsed.as_array().unwrap();
        assert_eq!(tasks.len(), 8);
        assert_eq!(tasks[0]["id"], "1");
        assert_eq!(tasks[7]["id"], "8");
    }
}
