use super::progress::Spinner;
use super::render::movie_table;
use crate::output::Output;
use color_eyre::eyre::bail;
use color_eyre::Result;
use reel_core::{Pipeline, SearchPhase};
use serde_json::json;

pub async fn run_search(pipeline: &Pipeline, query: &str, output: &Output) -> Result<()> {
    if query.trim().is_empty() {
        bail!("Search query must not be empty");
    }

    let mut controller = pipeline.search_controller();

    let spinner = Spinner::start(format!("Searching for '{}'...", query), output);
    controller.input(query);
    let session = controller.settle().await;
    spinner.finish();

    if session.phase == SearchPhase::Failed {
        bail!("Search for '{}' failed. Run with -v for details.", query);
    }

    if !output.is_human() {
        output.json(&json!({
            "type": "search",
            "query": session.query,
            "count": session.results.len(),
            "movies": session.results,
        }));
        return Ok(());
    }

    if session.is_not_found() {
        output.warn(format!("No movies found for '{}'", query));
        return Ok(());
    }
    output.println(movie_table(&session.results, pipeline.image_base_url()).to_string());
    Ok(())
}
