//! Shabda - Sanskrit and Ayurveda dictionary lookup
//! Terminal shell over the two screens

use anyhow::Result;
use shabda_lib::{AppState, ClientConfig, FilterTag, HomeScreen, ResultsScreen};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Type to search. Commands:
  :f <headword|definition|reference>  toggle filter
  :go                                 open results for the typed query
  :pick <n>                           open results for suggestion n
  :h [n]                              list history, or open history entry n
  :clear                              clear history
  :fav <n>                            toggle favorite for result n
  :say <n>                            pronounce result n
  :back                               return to search
  :q                                  quit";

enum Screen {
    Home,
    Results(ResultsScreen),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shabda_lib=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let state = AppState::new(ClientConfig::from_env())?;
    let mut home = state.home_screen();
    spawn_suggestion_printer(&home);

    println!("{}", HELP);
    print_history(&home);

    let mut screen = Screen::Home;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        let (command, arg) = match line.strip_prefix(':') {
            Some(rest) => {
                let mut parts = rest.splitn(2, ' ');
                (parts.next().unwrap_or(""), parts.next().unwrap_or("").trim())
            }
            None => {
                if matches!(screen, Screen::Home) {
                    home.on_input_change(line);
                }
                continue;
            }
        };

        match command {
            "q" => break,
            "f" => match arg.parse::<FilterTag>() {
                Ok(tag) => {
                    let active = home.toggle_filter(tag).await;
                    println!("filter: {}", active.map(|t| t.as_str()).unwrap_or("none"));
                }
                Err(e) => println!("{}", e),
            },
            "go" => {
                if let Some(request) = home.submit() {
                    screen = Screen::Results(open_results(&state, request).await);
                }
            }
            "pick" => {
                let suggestions = home.suggestions().entries;
                if let Some(entry) = index_arg(arg).and_then(|i| suggestions.get(i)) {
                    if let Some(request) = home.select_suggestion(entry) {
                        screen = Screen::Results(open_results(&state, request).await);
                    }
                }
            }
            "h" => match index_arg(arg) {
                Some(i) => {
                    let term = home.history().get(i).cloned();
                    if let Some(request) = term.and_then(|t| home.select_history(&t)) {
                        screen = Screen::Results(open_results(&state, request).await);
                    }
                }
                None => print_history(&home),
            },
            "clear" => {
                home.clear_history();
                println!("history cleared");
            }
            "fav" | "say" => {
                let Screen::Results(results) = &mut screen else {
                    println!("open a result list first");
                    continue;
                };
                let entries = results.results();
                let Some(entry) = index_arg(arg).and_then(|i| entries.get(i)) else {
                    println!("no such result");
                    continue;
                };
                if command == "fav" {
                    let now = results.toggle_favorite(&entry.headword);
                    println!("{} {}", entry.headword, if now { "★" } else { "☆" });
                } else {
                    results.speak(entry);
                }
            }
            "back" => {
                screen = Screen::Home;
                home = state.home_screen();
                spawn_suggestion_printer(&home);
                print_history(&home);
            }
            _ => println!("{}", HELP),
        }
    }

    Ok(())
}

fn index_arg(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}

fn print_history(home: &HomeScreen) {
    if home.history().is_empty() {
        return;
    }
    println!("recent:");
    for (i, term) in home.history().iter().enumerate() {
        println!("  {}. {}", i + 1, term);
    }
}

fn spawn_suggestion_printer(home: &HomeScreen) {
    let mut rx = home.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if state.in_flight {
                println!("…");
                continue;
            }
            for (i, entry) in state.entries.iter().enumerate() {
                println!("  {}. {}", i + 1, entry.headword);
            }
        }
    });
}

async fn open_results(state: &AppState, request: shabda_lib::SearchRequest) -> ResultsScreen {
    let mut results = state.results_screen(request);
    if results.is_loading() {
        println!("loading…");
    }
    results.loaded().await;

    let filter = results.request().filter().map(|f| f.as_str()).unwrap_or("any");
    println!("results for \"{}\" ({}):", results.request().term(), filter);
    if results.results().is_empty() {
        println!("  no results");
    }
    for (i, entry) in results.results().iter().enumerate() {
        let star = if results.is_favorite(&entry.headword) { "★" } else { " " };
        let gender = entry.gender.as_deref().map(|g| format!(" ({})", g)).unwrap_or_default();
        println!("{} {}. {}{}", star, i + 1, entry.headword, gender);
        if let Some(definition) = &entry.definition {
            println!("     {}", definition);
        }
        if let Some(meaning) = &entry.meaning {
            println!("     {}", meaning);
        }
        if let Some(reference) = &entry.reference {
            println!("     [{}]", reference);
        }
    }
    results
}
