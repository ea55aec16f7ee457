use super::progress::Spinner;
use super::render::movie_table;
use crate::output::Output;
use color_eyre::Result;
use reel_core::Pipeline;
use serde_json::json;

pub async fn run_discover(pipeline: &Pipeline, limit: Option<usize>, output: &Output) -> Result<()> {
    let spinner = Spinner::start("Loading popular movies...", output);
    let mut movies = pipeline.discover().await;
    spinner.finish();

    if let Some(limit) = limit {
        movies.truncate(limit);
    }

    if !output.is_human() {
        output.json(&json!({ "type": "movies", "count": movies.len(), "movies": movies }));
        return Ok(());
    }

    if movies.is_empty() {
        output.warn("No movies available right now. Run with -v for details.");
        return Ok(());
    }
    output.println(movie_table(&movies, pipeline.image_base_url()).to_string());
    Ok(())
}
