//! History command handler

use std::path::Path;

use chrono::{DateTime, Local, Utc};
use loupe::{HistoryEntry, InspectorConfig};

use crate::commands::{HistoryArgs, HistoryCommand};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::handlers::reporter;
use crate::store::HistoryStore;

/// Open the store at `path`, or at the default location
pub fn open_store(inspector: &InspectorConfig, path: Option<&Path>) -> CliResult<HistoryStore> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => HistoryStore::default_path()?,
    };
    HistoryStore::open(path, inspector.max_history)
}

/// Local wall-clock rendering of a millisecond timestamp
#[must_use]
pub fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

fn entry_line(entry: &HistoryEntry) -> String {
    if entry.element_tag.is_empty() {
        format!("[{}] {}", entry.kind, entry.code)
    } else {
        format!("[{}] {} ({})", entry.kind, entry.code, entry.element_tag)
    }
}

/// Execute a history subcommand
pub fn execute_history(
    config: &CliConfig,
    args: &HistoryArgs,
    store: Option<&Path>,
) -> CliResult<()> {
    let mut history = open_store(&config.inspector, store)?;
    let reporter = reporter(config);

    match &args.command {
        HistoryCommand::List => {
            if history.history().is_empty() {
                reporter.info("History is empty");
            }
            for stored in history.history() {
                reporter.line(&format!(
                    "{}  {}",
                    format_timestamp(stored.timestamp),
                    entry_line(&stored.entry)
                ));
            }
        }
        HistoryCommand::Favorites => {
            if history.favorites().is_empty() {
                reporter.info("No favorites");
            }
            for favorite in history.favorites() {
                reporter.line(&format!("{}  {}", favorite.id, entry_line(&favorite.entry)));
            }
        }
        HistoryCommand::Clear => {
            history.clear();
            history.save()?;
            reporter.success("History cleared");
        }
        HistoryCommand::Favorite { code, kind, tag } => {
            let entry = HistoryEntry::new(code.clone(), *kind, tag.to_ascii_uppercase());
            match history.add_favorite(entry) {
                Some(id) => {
                    history.save()?;
                    reporter.success(&format!("Added to favorites ({id})"));
                }
                None => reporter.warning("Already in favorites"),
            }
        }
        HistoryCommand::Unfavorite { id } => {
            if !history.remove_favorite(*id) {
                return Err(CliError::invalid_argument(format!("no favorite with id {id}")));
            }
            history.save()?;
            reporter.success("Removed from favorites");
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use loupe::StrategyKind;
    use tempfile::TempDir;

    fn run(store: &Path, command: HistoryCommand) -> CliResult<()> {
        execute_history(&CliConfig::new(), &HistoryArgs { command }, Some(store))
    }

    #[test]
    fn test_favorite_then_unfavorite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        run(
            &path,
            HistoryCommand::Favorite {
                code: "page.getByTestId(\"x\")".into(),
                kind: StrategyKind::TestId,
                tag: "div".into(),
            },
        )
        .unwrap();

        let store = open_store(&InspectorConfig::default(), Some(&path)).unwrap();
        let favorite = &store.favorites()[0];
        assert_eq!(favorite.entry.element_tag, "DIV");

        run(&path, HistoryCommand::Unfavorite { id: favorite.id }).unwrap();
        let store = open_store(&InspectorConfig::default(), Some(&path)).unwrap();
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_unfavorite_unknown_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let err = run(&path, HistoryCommand::Unfavorite { id: 42 }).unwrap_err();
        assert!(err.to_string().contains("no favorite with id 42"));
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let mut store = open_store(&InspectorConfig::default(), Some(&path)).unwrap();
        store.record(HistoryEntry::new("page.locator(\"a\")", StrategyKind::Css, "A"));
        store.save().unwrap();

        run(&path, HistoryCommand::Clear).unwrap();
        let store = open_store(&InspectorConfig::default(), Some(&path)).unwrap();
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_store_respects_max_history() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let inspector = InspectorConfig::default().with_max_history(2);
        let mut store = open_store(&inspector, Some(&path)).unwrap();
        for i in 0..4 {
            store.record_at(HistoryEntry::new(format!("c{i}"), StrategyKind::Css, "A"), i);
        }
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
        assert_eq!(format_timestamp(0).len(), "1970-01-01 00:00:00".len());
    }

    #[test]
    fn test_entry_line() {
        let entry = HistoryEntry::new("page.getByText(\"Hi\")", StrategyKind::Text, "P");
        assert_eq!(entry_line(&entry), "[text] page.getByText(\"Hi\") (P)");
    }
}
