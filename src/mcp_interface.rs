//! Text command handlers shared by the terminal browser and the MCP server.
//!
//! Every handler returns the text to show the user; failures become
//! messages, never errors, so either front end can always keep going.

use crate::api::PokeApi;
use crate::errors::{FilterError, LoadError, LoadResult, PokedexError};
use crate::navigation::{parse_type, FilterState, NavigationState, NumPadKey};
use crate::pokedex::Pokedex;
use crate::view::{render_evolution, render_main, render_moves, render_species, render_stats, ViewModel};
use std::fmt;
use std::str::FromStr;

/// Which part of the current view to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Species,
    Stats,
    Moves,
    Evolution,
    All,
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "main" => Ok(Screen::Main),
            "species" | "info" => Ok(Screen::Species),
            "stats" => Ok(Screen::Stats),
            "moves" => Ok(Screen::Moves),
            "evolution" | "evo" => Ok(Screen::Evolution),
            "all" => Ok(Screen::All),
            other => Err(format!(
                "Unknown screen '{}'. Use main, species, stats, moves, evolution or all.",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Step(i64),
    Go(String),
    Key(NumPadKey),
    Filter(String),
    ClearFilter,
    Show(Screen),
    State,
    Help,
    Quit,
}

/// Parses one line of user input.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or("").to_lowercase();
    let args = parts.next().unwrap_or("").trim();

    match verb.as_str() {
        "n" | "next" => Ok(Command::Step(1)),
        "p" | "prev" => Ok(Command::Step(-1)),
        "+10" | "next10" => Ok(Command::Step(10)),
        "-10" | "prev10" => Ok(Command::Step(-10)),
        "step" => args
            .parse::<i64>()
            .map(Command::Step)
            .map_err(|_| "Usage: step <delta>".to_string()),
        "go" | "jump" => {
            if args.is_empty() {
                Err("Usage: go <number>".to_string())
            } else {
                Ok(Command::Go(args.to_string()))
            }
        }
        "key" => args.parse::<NumPadKey>().map(Command::Key),
        "filter" => {
            if args.is_empty() {
                Ok(Command::ClearFilter)
            } else {
                Ok(Command::Filter(args.to_string()))
            }
        }
        "clear" => Ok(Command::ClearFilter),
        "show" => args.parse::<Screen>().map(Command::Show),
        "main" | "species" | "stats" | "moves" | "evo" | "evolution" | "all" => {
            verb.parse::<Screen>().map(Command::Show)
        }
        "state" => Ok(Command::State),
        "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "" => Err(String::new()),
        other => Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
    }
}

pub fn help_text() -> &'static str {
    "Commands:\n\
     \x20 next | prev          move by one (n / p)\n\
     \x20 next10 | prev10      move by ten (+10 / -10)\n\
     \x20 step <delta>         move by any amount\n\
     \x20 go <number>          jump to a number\n\
     \x20 key <0-9|c|enter>    number pad\n\
     \x20 filter <type>        browse one type only\n\
     \x20 clear                drop the type filter\n\
     \x20 show <screen>        main, species, stats, moves, evolution, all\n\
     \x20 state                navigation state\n\
     \x20 quit"
}

struct Rendered<'a>(&'a ViewModel, Screen);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rendered(view, screen) = self;
        match screen {
            Screen::Main => render_main(view, f),
            Screen::Species => render_species(view, f),
            Screen::Stats => render_stats(view, f),
            Screen::Moves => render_moves(view, f),
            Screen::Evolution => render_evolution(view, f),
            Screen::All => write!(f, "{:#}", view),
        }
    }
}

/// Renders one screen of a view.
pub fn display_screen(view: &ViewModel, screen: Screen) -> String {
    Rendered(view, screen).to_string()
}

/// User-facing message for a failed load.
pub fn display_load_error(error: &LoadError) -> String {
    match error {
        LoadError::NotFound { id } => format!("Pokémon no encontrado (#{:03})", id),
        LoadError::Superseded { .. } => "Carga reemplazada por una navegación más reciente.".to_string(),
    }
}

/// User-facing message for a failed filter.
pub fn display_filter_error(error: &FilterError) -> String {
    match error {
        FilterError::UnknownType(name) => format!("Tipo desconocido: {}", name),
        FilterError::NoMatches(_) => "No hay Pokémon de este tipo".to_string(),
        FilterError::Unavailable(_) => "Error al aplicar filtro".to_string(),
    }
}

pub fn display_load_result(result: LoadResult<&ViewModel>) -> String {
    match result {
        Ok(view) => display_screen(view, Screen::Main),
        Err(e) => display_load_error(&e),
    }
}

/// Summary of the navigation state, including the number pad buffer.
pub fn display_navigation_state(navigation: &NavigationState) -> String {
    let mut output = format!("Actual: #{:03}\n", navigation.current_id());
    match navigation.filter() {
        FilterState::Unfiltered => output.push_str("Filtro: ninguno\n"),
        FilterState::Filtered { kind, ids } => {
            let position = ids
                .iter()
                .position(|&id| id == navigation.current_id())
                .map(|index| format!("{}/{}", index + 1, ids.len()))
                .unwrap_or_else(|| format!("fuera del filtro, {} coincidencias", ids.len()));
            output.push_str(&format!("Filtro: {} ({})\n", kind.spanish_name(), position));
        }
    }
    output.push_str(&format!("Teclado: [{}]", navigation.pending_input().display()));
    output
}

/// Runs one command against the session and returns the text to show.
pub async fn execute_command<A: PokeApi + ?Sized>(pokedex: &mut Pokedex<A>, command: Command) -> String {
    match command {
        Command::Step(delta) => display_load_result(pokedex.step(delta).await),
        Command::Go(raw) => {
            let target = crate::ids::clamp_id_input(&raw);
            display_load_result(pokedex.jump_to(i64::from(target)).await)
        }
        Command::Key(key) => {
            if let Some(result) = pokedex.press_key(key).await {
                return display_load_result(result);
            }
            format!("Teclado: [{}]", pokedex.navigation().pending_input().display())
        }
        Command::Filter(name) => {
            let kind = match parse_type(&name) {
                Ok(kind) => kind,
                Err(e) => return display_filter_error(&e),
            };
            match pokedex.apply_filter(kind).await {
                Ok(view) => display_screen(view, Screen::Main),
                Err(PokedexError::Filter(e)) => display_filter_error(&e),
                Err(PokedexError::Load(e)) => display_load_error(&e),
            }
        }
        Command::ClearFilter => display_load_result(pokedex.clear_filter().await),
        Command::Show(screen) => match pokedex.current_view() {
            Some(view) => display_screen(view, screen),
            None => "Nada cargado todavía.".to_string(),
        },
        Command::State => display_navigation_state(pokedex.navigation()),
        Command::Help => help_text().to_string(),
        Command::Quit => String::new(),
    }
}
