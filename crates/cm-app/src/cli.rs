//! CLI (Command Line Interface) mode
//!
//! An interactive REPL over the contact views. The active view follows the
//! shared [`Router`]; leaving the edit form goes through the unsaved-changes
//! guard.

use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cm_contacts::ContactService;
use cm_core::{Config, Contact};
use cm_views::{
    Confirm, ContactDetail, ContactEdit, ContactEditGuard, ContactList, DeleteOutcome,
    DisplayMessages, Field, Navigator, Route, Router, SaveOutcome,
};
use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, Completer, DefaultHinter, Emacs, KeyCode, KeyModifiers, Keybindings,
    MenuBuilder, Prompt, Reedline, ReedlineEvent, ReedlineMenu, Signal, Suggestion,
};
use tracing::{info, warn};

use crate::error::{CommandError, Result};

/// Available commands for autocomplete and help
const COMMANDS: &[(&str, &str)] = &[
    ("list", "Show the contact list"),
    ("view", "view <id>: show a contact"),
    ("edit", "edit <id>: edit a contact, 0 adds a new one"),
    ("filter", "filter <text>: filter the list by name"),
    ("set", "set <field> <value>: change a field"),
    ("blur", "blur <field>: leave a field"),
    ("save", "Save the edited contact"),
    ("delete", "Delete the edited contact"),
    ("show", "Redisplay the current view"),
    ("help", "Show this help"),
    ("exit", "Quit"),
];

/// Command completer for reedline
#[derive(Clone)]
pub struct CommandCompleter {
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.to_vec(),
        }
    }
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for CommandCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        // Only the command word is completed
        if line.is_empty() || line.contains(char::is_whitespace) {
            return Vec::new();
        }

        self.commands
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(line))
            .map(|(cmd, desc)| Suggestion {
                value: cmd.to_string(),
                description: Some(desc.to_string()),
                extra: None,
                span: reedline::Span::new(0, pos),
                append_whitespace: true,
                style: None,
            })
            .collect()
    }
}

/// Prompt showing the active route
struct ColoredPrompt {
    style: Style,
    route: Route,
}

impl ColoredPrompt {
    fn new(route: Route) -> Self {
        Self {
            style: Color::Cyan.bold(),
            route,
        }
    }
}

impl Prompt for ColoredPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(self.style.paint(format!("{}> ", self.route)).to_string())
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: reedline::PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
}

/// Yes/no prompt on the terminal
struct TerminalConfirm;

#[async_trait]
impl Confirm for TerminalConfirm {
    async fn confirm(&self, message: &str) -> bool {
        let prompt = format!("{} [y/N] ", message);
        let answer = tokio::task::spawn_blocking(move || -> io::Result<String> {
            print!("{}", prompt);
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            Ok(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(Err(e)) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
            Err(e) => {
                warn!("Confirmation prompt aborted: {}", e);
                false
            }
        }
    }
}

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Go(Route),
    Filter(String),
    Set(Field, String),
    Blur(Field),
    Save,
    Delete,
    Show,
    Help,
    Exit,
}

fn parse_id(arg: &str, usage: &'static str) -> Result<u64> {
    arg.trim().parse().map_err(|_| CommandError::Usage(usage))
}

/// Parse one line of input
///
/// Lines starting with `/` are route paths such as `/contacts/2/edit`.
fn parse_command(input: &str) -> Result<Command> {
    let input = input.trim();
    if input.starts_with('/') {
        return Ok(Command::Go(input.parse()?));
    }

    let (word, rest) = input
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((input, ""));

    match word.to_lowercase().as_str() {
        "list" => Ok(Command::Go(Route::List)),
        "view" => Ok(Command::Go(Route::Detail(parse_id(rest, "view <id>")?))),
        "edit" => Ok(Command::Go(Route::Edit(parse_id(rest, "edit <id>")?))),
        "filter" => Ok(Command::Filter(rest.to_string())),
        "set" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("set <field> <value>"));
            }
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map(|(field, value)| (field, value.trim()))
                .unwrap_or((rest, ""));
            Ok(Command::Set(field.parse()?, value.to_string()))
        }
        "blur" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("blur <field>"));
            }
            Ok(Command::Blur(rest.parse()?))
        }
        "save" => Ok(Command::Save),
        "delete" => Ok(Command::Delete),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "exit" | "quit" | "q" => Ok(Command::Exit),
        _ => Err(CommandError::Unknown(input.to_string())),
    }
}

/// The view behind the active route
enum View {
    List(ContactList),
    Detail(ContactDetail),
    Edit(ContactEdit),
}

/// REPL state: the router and the view it currently points at
struct Session {
    service: ContactService,
    router: Arc<Router>,
    confirm: Arc<dyn Confirm>,
    guard: ContactEditGuard,
    quiet_window: Duration,
    route: Route,
    view: View,
}

impl Session {
    /// Session on an unloaded list view; call [`Session::open`] to load it
    fn new(service: ContactService, quiet_window: Duration, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            guard: ContactEditGuard::new(confirm.clone()),
            view: View::List(ContactList::new(service.clone())),
            service,
            router: Arc::new(Router::default()),
            confirm,
            quiet_window,
            route: Route::List,
        }
    }

    /// Build and load the view for `route`
    async fn open(&mut self, route: Route) {
        if let View::Edit(edit) = &mut self.view {
            edit.destroy();
        }

        self.view = match route {
            Route::List => {
                let mut list = ContactList::new(self.service.clone());
                list.load().await;
                View::List(list)
            }
            Route::Detail(id) => {
                let mut detail = ContactDetail::new(self.service.clone());
                detail.load(id).await;
                View::Detail(detail)
            }
            Route::Edit(_) => {
                let mut edit = ContactEdit::new(
                    self.service.clone(),
                    self.confirm.clone(),
                    self.router.clone(),
                    self.quiet_window,
                );
                edit.follow_route(self.router.subscribe()).await;
                View::Edit(edit)
            }
        };
        self.route = route;
    }

    /// Ask the guard whether the current view may be left
    async fn may_leave(&self) -> bool {
        match &self.view {
            View::Edit(edit) => self.guard.can_deactivate(edit).await,
            _ => true,
        }
    }

    /// Navigate at the user's request
    async fn go(&mut self, route: Route) {
        if !self.may_leave().await {
            println!("Staying on the edit form.");
            return;
        }

        self.router.navigate(route);
        if route == self.route {
            // The router sees no change, so reload here to drop discarded edits
            self.open(route).await;
            self.render();
        } else {
            self.sync().await;
        }
    }

    /// Follow navigation triggered by the views themselves
    async fn sync(&mut self) {
        let current = self.router.current();
        if current != self.route {
            self.open(current).await;
            self.render();
        }
    }

    /// Run one command; returns `false` when the session should end
    async fn execute(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Go(route) => self.go(route).await,
            Command::Filter(text) => {
                let View::List(list) = &mut self.view else {
                    return Err(wrong_view("filter", "list"));
                };
                list.set_list_filter(text);
                self.render();
            }
            Command::Set(field, value) => {
                let View::Edit(edit) = &mut self.view else {
                    return Err(wrong_view("set", "edit"));
                };
                edit.input(field, value);
                settle(edit).await;
            }
            Command::Blur(field) => {
                let View::Edit(edit) = &mut self.view else {
                    return Err(wrong_view("blur", "edit"));
                };
                edit.blur(field);
                settle(edit).await;
            }
            Command::Save => {
                let View::Edit(edit) = &mut self.view else {
                    return Err(wrong_view("save", "edit"));
                };
                match edit.save().await {
                    SaveOutcome::Saved => println!("{}", Color::Green.paint("Saved.")),
                    SaveOutcome::Unchanged => println!("Nothing to save."),
                    SaveOutcome::Invalid | SaveOutcome::Failed => print_error(edit.error_message()),
                }
                self.sync().await;
            }
            Command::Delete => {
                let View::Edit(edit) = &mut self.view else {
                    return Err(wrong_view("delete", "edit"));
                };
                match edit.delete().await {
                    DeleteOutcome::Deleted => println!("{}", Color::Green.paint("Deleted.")),
                    DeleteOutcome::Discarded => println!("Discarded the new contact."),
                    DeleteOutcome::Declined => println!("Kept the contact."),
                    DeleteOutcome::Failed => print_error(edit.error_message()),
                }
                self.sync().await;
            }
            Command::Show => self.render(),
            Command::Help => print_help(),
            Command::Exit => {
                if self.may_leave().await {
                    return Ok(false);
                }
                println!("Staying on the edit form.");
            }
        }

        Ok(true)
    }

    fn render(&self) {
        println!();
        match &self.view {
            View::List(list) => {
                println!("{}", Style::new().bold().paint(list.page_title()));
                if !list.list_filter().is_empty() {
                    println!("Filtered by: {}", list.list_filter());
                }
                print_error(list.error_message());
                if list.filtered_contacts().is_empty() {
                    println!("  (no contacts)");
                }
                for contact in list.filtered_contacts() {
                    println!(
                        "  {:>4}  {:<24} {}",
                        contact.id,
                        contact.name(),
                        contact.contact_email.as_deref().unwrap_or("")
                    );
                }
            }
            View::Detail(detail) => {
                println!("{}", Style::new().bold().paint(detail.page_title()));
                print_error(detail.error_message());
                if let Some(contact) = detail.contact() {
                    print_contact(contact);
                }
            }
            View::Edit(edit) => {
                println!("{}", Style::new().bold().paint(edit.page_title()));
                print_error(edit.error_message());
                for field in Field::ALL {
                    println!(
                        "  {:<8} {}",
                        format!("{}:", field.label()),
                        edit.form().value(field).unwrap_or("")
                    );
                    if let Some(message) = edit.display_message().get(field) {
                        println!("           {}", Color::Yellow.paint(message));
                    }
                }
            }
        }
        println!();
    }
}

fn wrong_view(command: &'static str, view: &'static str) -> CommandError {
    CommandError::WrongView { command, view }
}

/// Wait out the debounce window and show the resulting messages
async fn settle(edit: &mut ContactEdit) {
    if !edit.validation_pending() {
        return;
    }
    let messages = edit.next_validation().await;
    print_messages(messages);
}

fn print_messages(messages: &DisplayMessages) {
    for (field, message) in messages.iter() {
        println!("  {}: {}", field.label(), Color::Yellow.paint(message));
    }
}

fn print_error(message: Option<&str>) {
    if let Some(message) = message {
        eprintln!("{}", Color::Red.paint(message));
    }
}

fn print_contact(contact: &Contact) {
    let values = [
        &contact.contact_name,
        &contact.contact_address,
        &contact.contact_phone,
        &contact.contact_email,
    ];
    for (field, value) in Field::ALL.into_iter().zip(values) {
        println!(
            "  {:<8} {}",
            format!("{}:", field.label()),
            value.as_deref().unwrap_or("")
        );
    }
}

/// Run CLI interactive mode
pub async fn run_cli(config: &Config) -> anyhow::Result<()> {
    let service = ContactService::new(&config.client)?;
    let mut session = Session::new(
        service,
        config.validation.quiet_window(),
        Arc::new(TerminalConfirm),
    );
    session.open(Route::List).await;

    info!("Starting CLI mode against {}", config.client.base_url);

    print_welcome();
    session.render();

    let mut keybindings = default_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::Edit(vec![reedline::EditCommand::Complete]),
    );

    let menu = Box::new(
        ColumnarMenu::default()
            .with_name("command_menu")
            .with_columns(1)
            .with_column_width(Some(48))
            .with_only_buffer_difference(false),
    );

    let hinter = DefaultHinter::default().with_style(Style::new().dimmed());

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(CommandCompleter::new()))
        .with_menu(ReedlineMenu::EngineCompleter(menu))
        .with_hinter(Box::new(hinter))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    loop {
        let prompt = ColoredPrompt::new(session.route);

        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }

                let result = match parse_command(input) {
                    Ok(command) => session.execute(command).await,
                    Err(e) => Err(e),
                };

                match result {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => eprintln!("{}", Color::Red.paint(e.to_string())),
                }
            }
            Ok(Signal::CtrlC) => {
                println!("^C");
                continue;
            }
            Ok(Signal::CtrlD) => {
                if session.may_leave().await {
                    break;
                }
            }
            Err(err) => {
                eprintln!("{}", Color::Red.paint(format!("Input error: {}", err)));
                break;
            }
        }
    }

    println!("Bye.");
    Ok(())
}

/// Default keybindings for reedline
fn default_keybindings() -> Keybindings {
    let mut keybindings = Keybindings::new();
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Enter, ReedlineEvent::Submit);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Esc, ReedlineEvent::Esc);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('c'), ReedlineEvent::CtrlC);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('d'), ReedlineEvent::CtrlD);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Up, ReedlineEvent::Up);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Down, ReedlineEvent::Down);
    keybindings
}

fn print_welcome() {
    println!();
    println!("Contact Manager");
    println!("Type help for commands, Tab completes command names.");
}

fn print_help() {
    println!();
    println!("Commands:");
    for (cmd, desc) in COMMANDS {
        println!("  {:<8} {}", cmd, desc);
    }
    println!();
    println!("Routes can also be typed directly: /contacts, /contacts/2, /contacts/2/edit");
    println!("Fields: name, address, phone, email");
    println!();
}
