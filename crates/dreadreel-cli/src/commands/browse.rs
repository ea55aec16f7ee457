use super::progress::Spinner;
use super::render::movie_table;
use super::reviews::print_resolved;
use crate::output::Output;
use color_eyre::Result;
use reel_core::{Pipeline, SearchPhase, SearchSession};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

#[derive(Debug, PartialEq, Eq)]
enum BrowseInput {
    Quit,
    Clear,
    /// Zero-based suggestion index
    Open(usize),
    Text(String),
}

fn parse_input(line: &str) -> BrowseInput {
    match line.trim().strip_prefix(':') {
        Some("q") | Some("quit") => BrowseInput::Quit,
        Some("c") | Some("clear") => BrowseInput::Clear,
        Some(rest) => match rest.trim().parse::<usize>() {
            Ok(n) if n > 0 => BrowseInput::Open(n - 1),
            _ => BrowseInput::Text(line.to_string()),
        },
        None => BrowseInput::Text(line.to_string()),
    }
}

/// Line-driven search session over stdin. Each line replaces the search text,
/// so rapid lines behave like rapid keystrokes and only the last one is searched.
/// At end of input the pending search, if any, is answered before returning.
pub async fn run_browse(pipeline: &Pipeline, output: &Output) -> Result<()> {
    let spinner = Spinner::start("Loading popular movies...", output);
    let listing = pipeline.discover().await;
    spinner.finish();

    if output.is_human() {
        if !listing.is_empty() {
            output.println(movie_table(&listing, pipeline.image_base_url()).to_string());
        }
        output.info("Type to search. ':<n>' opens a suggestion, ':c' clears, ':q' quits.");
    } else {
        output.json(&json!({ "type": "movies", "count": listing.len(), "movies": listing }));
    }

    let mut controller = pipeline.search_controller();
    let printer = tokio::spawn(print_suggestions(controller.subscribe(), *output));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut quit = false;
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            BrowseInput::Quit => {
                quit = true;
                break;
            }
            BrowseInput::Clear => controller.clear(),
            BrowseInput::Open(index) => match controller.select(index) {
                Some(movie) => open_movie(pipeline, movie.id, output).await,
                None => output.warn(format!("No suggestion #{}", index + 1)),
            },
            BrowseInput::Text(text) => controller.input(&text),
        }
    }

    if quit {
        printer.abort();
        return Ok(());
    }

    controller.settle().await;
    // The printer ends once it has seen the last update and the session closes
    drop(controller);
    if let Err(e) = printer.await {
        tracing::debug!("Suggestion printer stopped: {}", e);
    }
    Ok(())
}

async fn open_movie(pipeline: &Pipeline, id: u64, output: &Output) {
    let spinner = Spinner::start(format!("Loading movie {}...", id), output);
    let resolved = pipeline.resolver().resolve(id).await;
    spinner.finish();

    match resolved {
        Ok(resolved) => print_resolved(&resolved, pipeline.image_base_url(), output),
        Err(e) => output.error(format!("Failed to load movie {}: {}", id, e)),
    }
}

async fn print_suggestions(mut rx: watch::Receiver<SearchSession>, output: Output) {
    while rx.changed().await.is_ok() {
        let session = rx.borrow_and_update().clone();
        match session.phase {
            SearchPhase::Resolved if session.is_not_found() => {
                output.warn(format!("No movies found for '{}'", session.query.trim()));
            }
            SearchPhase::Resolved => print_session(&session, &output),
            SearchPhase::Failed => output.warn(format!("Search for '{}' failed", session.query.trim())),
            SearchPhase::Idle | SearchPhase::Pending => {}
        }
    }
}

fn print_session(session: &SearchSession, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "type": "suggestions",
            "query": session.query,
            "movies": session.results,
        }));
        return;
    }
    for (index, movie) in session.results.iter().enumerate() {
        output.println(format!("  {:>2}. {} ({})", index + 1, movie.title, movie.release_year));
    }
}
