use clap::Parser;
use taskboard::cli::commands::note::CallNoteCommands;
use taskboard::cli::{Cli, Commands};
use taskboard::domain::models::{DueDate, Priority, SortMode, StatusFilter, Tab};

#[test]
fn test_parse_add() {
    let cli = Cli::try_parse_from([
        "taskboard",
        "add",
        "Write report",
        "--description",
        "Quarterly numbers",
        "--due",
        "2024-01-10",
        "--priority",
        "high",
    ])
    .unwrap();

    match cli.command {
        Commands::Add(args) => {
            assert_eq!(args.name, "Write report");
            assert_eq!(args.description, "Quarterly numbers");
            assert_eq!(args.due, Some(DueDate::new("2024-01-10")));
            assert_eq!(args.priority, Some(Priority::High));
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_add_without_priority() {
    // Priority is checked by validation, not by the parser, so the user gets
    // a field error instead of a usage error.
    let cli = Cli::try_parse_from(["taskboard", "add", "Later"]).unwrap();
    match cli.command {
        Commands::Add(args) => {
            assert!(args.priority.is_none());
            assert!(args.description.is_empty());
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_add_rejects_bad_values() {
    assert!(Cli::try_parse_from(["taskboard", "add", "x", "--priority", "urgent"]).is_err());
    assert!(Cli::try_parse_from(["taskboard", "add", "x", "--due", "tomorrow"]).is_err());
}

#[test]
fn test_parse_list_with_filters() {
    let cli = Cli::try_parse_from([
        "taskboard",
        "list",
        "--search",
        "report",
        "--priority",
        "low",
        "--status",
        "incomplete",
        "--sort",
        "latest",
    ])
    .unwrap();

    match cli.command {
        Commands::List(args) => {
            assert_eq!(args.tab, Tab::All);
            assert_eq!(args.search.as_deref(), Some("report"));
            assert_eq!(args.priority, Some(Priority::Low));
            assert_eq!(args.status, Some(StatusFilter::Incomplete));
            assert_eq!(args.sort, Some(SortMode::LatestDueFirst));
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_list_tab() {
    let cli = Cli::try_parse_from(["taskboard", "list", "--tab", "today"]).unwrap();
    match cli.command {
        Commands::List(args) => assert_eq!(args.tab, Tab::Today),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_edit_due_conflicts_with_clear() {
    let result = Cli::try_parse_from([
        "taskboard",
        "edit",
        "abc",
        "--due",
        "2024-01-10",
        "--clear-due",
    ]);
    assert!(result.is_err());

    let cli = Cli::try_parse_from(["taskboard", "edit", "abc", "--clear-due", "-p", "medium"]).unwrap();
    match cli.command {
        Commands::Edit(args) => {
            assert_eq!(args.key, "abc");
            assert!(args.clear_due);
            assert_eq!(args.priority, Some(Priority::Medium));
            assert!(args.name.is_none());
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_delete_alias() {
    let cli = Cli::try_parse_from(["taskboard", "delete", "abc"]).unwrap();
    match cli.command {
        Commands::Rm(args) => assert_eq!(args.key, "abc"),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_call_note_add() {
    let cli = Cli::try_parse_from([
        "taskboard",
        "call-note",
        "add",
        "2024-02-01",
        "Discussed career goals",
    ])
    .unwrap();

    match cli.command {
        Commands::CallNote(CallNoteCommands::Add { date, description }) => {
            assert_eq!(date, DueDate::new("2024-02-01"));
            assert_eq!(description, "Discussed career goals");
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_global_flags() {
    let cli = Cli::try_parse_from(["taskboard", "clear-completed", "--json", "-c", "board.yaml"]).unwrap();
    assert!(cli.json);
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("board.yaml")));
    assert!(matches!(cli.command, Commands::ClearCompleted));
}
