use clap::{Args, ValueEnum};
use std::io::{BufRead, Write};

use tracalorie::{App, ClickTarget, Event, EventOutcome, KeyValueStore, Page};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

#[derive(Args)]
pub struct AddCommand {
    /// Name of the food item
    pub name: String,

    /// Calories in the item
    #[arg(allow_hyphen_values = true)]
    pub calories: String,
}

#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct UpdateCommand {
    /// Item ID
    pub id: u32,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New calories
    #[arg(long, allow_hyphen_values = true)]
    pub calories: Option<String>,
}

#[derive(Args)]
pub struct DeleteCommand {
    /// Item ID
    pub id: u32,

    /// Skip confirmation prompt
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(long, short)]
    pub force: bool,
}

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Asks a yes/no question, defaulting to no.
fn confirm(prompt: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> std::io::Result<bool> {
    write!(out, "{} [y/N] ", prompt)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Clicks the edit icon of item `id`.
fn select<S: KeyValueStore>(app: &mut App<S, Page>, id: u32) -> CommandResult {
    app.handle(Event::EditClick(ClickTarget::edit_icon(id)))?;
    Ok(())
}

impl AddCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        app: &mut App<S, Page>,
        out: &mut dyn Write,
    ) -> CommandResult {
        app.view_mut().set_input(self.name.trim(), self.calories.trim());

        match app.handle(Event::AddSubmit)? {
            EventOutcome::Applied => {
                if let Some(item) = app.store().items().last() {
                    writeln!(out, "Added item {}: {}", item.id, item)?;
                }
                writeln!(out, "Total Calories: {}", app.view().total_calories)?;
                Ok(())
            }
            EventOutcome::Ignored => Err("Item name and calories cannot be empty".into()),
        }
    }
}

impl ListCommand {
    pub fn run<S: KeyValueStore>(&self, app: &App<S, Page>, out: &mut dyn Write) -> CommandResult {
        let page = app.view();
        match self.format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(app.store().items())?)?;
            }
            OutputFormat::Html => {
                write!(out, "{}", page.to_html())?;
            }
            OutputFormat::Text => {
                if page.rows.is_empty() {
                    writeln!(out, "No items found")?;
                    return Ok(());
                }

                writeln!(out, "{:<6}  {:<30}  CALORIES", "ID", "NAME")?;
                writeln!(out, "{}", "-".repeat(48))?;
                for item in app.store().items() {
                    let name = if item.name.chars().count() > 30 {
                        format!("{}...", item.name.chars().take(27).collect::<String>())
                    } else {
                        item.name.clone()
                    };
                    writeln!(out, "{:<6}  {:<30}  {}", item.id, name, item.calories)?;
                }
                writeln!(
                    out,
                    "\nTotal Calories: {} ({} item(s))",
                    page.total_calories,
                    page.rows.len()
                )?;
            }
        }
        Ok(())
    }
}

impl UpdateCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        app: &mut App<S, Page>,
        out: &mut dyn Write,
    ) -> CommandResult {
        if self.name.is_none() && self.calories.is_none() {
            return Err("Nothing to update. Provide --name or --calories.".into());
        }

        select(app, self.id)?;

        // The form now holds the current values; overwrite what was given
        if let Some(name) = &self.name {
            app.view_mut().set_name_input(name.trim());
        }
        if let Some(calories) = &self.calories {
            app.view_mut().set_calories_input(calories.trim());
        }

        match app.handle(Event::UpdateSubmit)? {
            EventOutcome::Applied => {
                if let Some(item) = app.store().get_item_by_id(self.id) {
                    writeln!(out, "Updated item {}: {}", item.id, item)?;
                }
                writeln!(out, "Total Calories: {}", app.view().total_calories)?;
                Ok(())
            }
            EventOutcome::Ignored => Err("Item name and calories cannot be empty".into()),
        }
    }
}

impl DeleteCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        app: &mut App<S, Page>,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> CommandResult {
        select(app, self.id)?;

        let name = app.view().name_input.clone();
        if !self.force && !confirm(&format!("Delete item '{}'?", name), input, out)? {
            app.handle(Event::BackClick)?;
            writeln!(out, "Deletion cancelled.")?;
            return Ok(());
        }

        app.handle(Event::DeleteSubmit)?;
        writeln!(out, "Deleted item: {}", name)?;
        writeln!(out, "Total Calories: {}", app.view().total_calories)?;
        Ok(())
    }
}

impl ClearCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        app: &mut App<S, Page>,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> CommandResult {
        let count = app.store().items().len();
        if !self.force && !confirm(&format!("Remove all {} item(s)?", count), input, out)? {
            writeln!(out, "Clear cancelled.")?;
            return Ok(());
        }

        app.handle(Event::ClearAllClick)?;
        writeln!(out, "Removed {} item(s)", count)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tracalorie::{Item, ItemStorage, MemoryStore};

    fn new_app() -> App<MemoryStore, Page> {
        App::init(ItemStorage::new(MemoryStore::new()), Page::new()).unwrap()
    }

    fn add(app: &mut App<MemoryStore, Page>, name: &str, calories: &str) -> String {
        let mut out = Vec::new();
        AddCommand {
            name: name.to_string(),
            calories: calories.to_string(),
        }
        .run(app, &mut out)
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn list(app: &App<MemoryStore, Page>, format: OutputFormat) -> String {
        let mut out = Vec::new();
        ListCommand { format }.run(app, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_command() {
        let mut app = new_app();
        let output = add(&mut app, "Eggs", "300");
        assert!(output.contains("Added item 1: Eggs: 300 Calories"));
        assert!(output.contains("Total Calories: 300"));
    }

    #[test]
    fn test_add_command_rejects_blank_name() {
        let mut app = new_app();
        let mut out = Vec::new();
        let result = AddCommand {
            name: "   ".to_string(),
            calories: "300".to_string(),
        }
        .run(&mut app, &mut out);
        assert!(result.is_err());
        assert!(app.store().is_empty());
    }

    #[test]
    fn test_add_command_rejects_bad_calories() {
        let mut app = new_app();
        let mut out = Vec::new();
        let err = AddCommand {
            name: "Eggs".to_string(),
            calories: "many".to_string(),
        }
        .run(&mut app, &mut out)
        .unwrap_err();
        assert!(err.to_string().contains("Invalid calories 'many'"));
    }

    #[test]
    fn test_list_text() {
        let mut app = new_app();
        assert_eq!(list(&app, OutputFormat::Text), "No items found\n");

        add(&mut app, "Eggs", "300");
        add(&mut app, "Toast", "150");
        let output = list(&app, OutputFormat::Text);
        assert!(output.contains("Eggs"));
        assert!(output.contains("Toast"));
        assert!(output.contains("Total Calories: 450 (2 item(s))"));
    }

    #[test]
    fn test_list_truncates_long_names() {
        let mut app = new_app();
        add(&mut app, &"x".repeat(40), "1");
        let output = list(&app, OutputFormat::Text);
        assert!(output.contains(&format!("{}...", "x".repeat(27))));
        assert!(!output.contains(&"x".repeat(28)));
    }

    #[test]
    fn test_list_json() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        let items: Vec<Item> = serde_json::from_str(&list(&app, OutputFormat::Json)).unwrap();
        assert_eq!(items, vec![Item::new(1, "Eggs", 300)]);
    }

    #[test]
    fn test_list_html() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        let output = list(&app, OutputFormat::Html);
        assert!(output.contains("<li class=\"collection-item\" id=\"item-1\">"));
    }

    #[test]
    fn test_update_command_keeps_unspecified_fields() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");

        let mut out = Vec::new();
        UpdateCommand {
            id: 1,
            name: None,
            calories: Some("320".to_string()),
        }
        .run(&mut app, &mut out)
        .unwrap();

        assert_eq!(app.store().items(), &[Item::new(1, "Eggs", 320)]);
        assert!(String::from_utf8(out).unwrap().contains("Total Calories: 320"));
    }

    #[test]
    fn test_update_command_requires_changes() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        let mut out = Vec::new();
        let result = UpdateCommand {
            id: 1,
            name: None,
            calories: None,
        }
        .run(&mut app, &mut out);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_command_unknown_id() {
        let mut app = new_app();
        let mut out = Vec::new();
        let err = UpdateCommand {
            id: 5,
            name: Some("Soup".to_string()),
            calories: None,
        }
        .run(&mut app, &mut out)
        .unwrap_err();
        assert_eq!(err.to_string(), "Item not found: 5");
    }

    #[test]
    fn test_delete_command_confirmation() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");

        let mut out = Vec::new();
        let mut input = Cursor::new("n\n");
        DeleteCommand { id: 1, force: false }
            .run(&mut app, &mut input, &mut out)
            .unwrap();
        assert_eq!(app.store().items().len(), 1);
        assert!(app.store().current_item().is_none());
        assert!(String::from_utf8(out).unwrap().contains("Deletion cancelled."));

        let mut out = Vec::new();
        let mut input = Cursor::new("y\n");
        DeleteCommand { id: 1, force: false }
            .run(&mut app, &mut input, &mut out)
            .unwrap();
        assert!(app.store().is_empty());
        assert!(String::from_utf8(out).unwrap().contains("Deleted item: Eggs"));
    }

    #[test]
    fn test_clear_command_force() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        add(&mut app, "Toast", "150");

        let mut out = Vec::new();
        let mut input = Cursor::new("");
        ClearCommand { force: true }
            .run(&mut app, &mut input, &mut out)
            .unwrap();
        assert!(app.store().is_empty());
        assert!(app.storage().get_items().unwrap().is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "Removed 2 item(s)\n");
    }
}
