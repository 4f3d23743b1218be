//! Interactive session.
//!
//! Each line either types into the form or presses a button, and every
//! button press is handed to the coordinator as one event.

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracalorie::{App, AppError, ClickTarget, Event, EventOutcome, KeyValueStore, Page};

const HELP: &str = "\
Commands:
  name <text>       Type into the meal name field
  calories <text>   Type into the calories field
  add               Add Meal
  edit <id>         Edit the item with <id>
  update            Update Meal
  delete            Delete Meal
  back              Back to add mode
  clear             Clear All
  show              Show the page
  help              Show this help
  quit              Leave the shell";

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    /// Blank line; nothing is submitted.
    Empty,
    Name(String),
    Calories(String),
    Add,
    Edit(u32),
    Update,
    Delete,
    Back,
    Clear,
    Show,
    Help,
    Quit,
}

impl FromStr for ShellInput {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "" => Ok(ShellInput::Empty),
            "name" => Ok(ShellInput::Name(rest.to_string())),
            "calories" => Ok(ShellInput::Calories(rest.to_string())),
            "add" => Ok(ShellInput::Add),
            "edit" => rest
                .parse()
                .map(ShellInput::Edit)
                .map_err(|_| format!("Invalid item id '{}'", rest)),
            "update" => Ok(ShellInput::Update),
            "delete" => Ok(ShellInput::Delete),
            "back" => Ok(ShellInput::Back),
            "clear" => Ok(ShellInput::Clear),
            "show" => Ok(ShellInput::Show),
            "help" | "?" => Ok(ShellInput::Help),
            "quit" | "exit" => Ok(ShellInput::Quit),
            other => Err(format!("Unknown command '{}'. Type 'help' for commands.", other)),
        }
    }
}

impl ShellInput {
    /// The event this input submits, if it presses a button.
    fn event(&self) -> Option<Event> {
        match self {
            ShellInput::Add => Some(Event::AddSubmit),
            ShellInput::Edit(id) => Some(Event::EditClick(ClickTarget::edit_icon(*id))),
            ShellInput::Update => Some(Event::UpdateSubmit),
            ShellInput::Delete => Some(Event::DeleteSubmit),
            ShellInput::Back => Some(Event::BackClick),
            ShellInput::Clear => Some(Event::ClearAllClick),
            _ => None,
        }
    }
}

/// Runs the shell until `quit` or end of input.
///
/// Errors from individual events are reported and the session continues;
/// only I/O failures on `input` or `out` end it early.
pub fn run_shell<S: KeyValueStore>(
    app: &mut App<S, Page>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    write!(out, "{}", app.view())?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let shell_input = match line.parse::<ShellInput>() {
            Ok(shell_input) => shell_input,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                continue;
            }
        };

        match &shell_input {
            ShellInput::Empty => {}
            ShellInput::Name(name) => app.view_mut().set_name_input(name.clone()),
            ShellInput::Calories(calories) => app.view_mut().set_calories_input(calories.clone()),
            ShellInput::Show => write!(out, "{}", app.view())?,
            ShellInput::Help => writeln!(out, "{}", HELP)?,
            ShellInput::Quit => break,
            _ => {
                if let Some(event) = shell_input.event() {
                    report(app.handle(event), app, out)?;
                }
            }
        }
    }

    Ok(())
}

fn report<S: KeyValueStore>(
    result: Result<EventOutcome, AppError>,
    app: &App<S, Page>,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    match result {
        Ok(EventOutcome::Applied) => write!(out, "{}", app.view()),
        Ok(EventOutcome::Ignored) => writeln!(out, "Nothing to do: fill in meal and calories"),
        Err(e) => writeln!(out, "Error: {}", e),
    }
}
