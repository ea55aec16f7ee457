use super::progress::Spinner;
use super::render::{detail_table, review_table};
use crate::output::Output;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use reel_core::{Pipeline, ResolvedMovie};
use reel_models::ReviewSource;
use serde_json::json;

pub async fn run_reviews(pipeline: &Pipeline, id: u64, output: &Output) -> Result<()> {
    let spinner = Spinner::start(format!("Loading movie {}...", id), output);
    let resolved = pipeline.resolver().resolve(id).await;
    spinner.finish();
    let resolved = resolved.wrap_err_with(|| format!("Failed to load movie {}", id))?;

    print_resolved(&resolved, pipeline.image_base_url(), output);
    Ok(())
}

pub fn print_resolved(resolved: &ResolvedMovie, image_base_url: &str, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "type": "movie",
            "movie": resolved,
            "average_rating": resolved.reviews.average_rating(),
        }));
        return;
    }

    output.println(detail_table(&resolved.detail, image_base_url).to_string());

    for failure in &resolved.failures {
        output.warn(format!("Could not load {}: {}", failure.stage, failure.message));
    }

    if resolved.reviews.is_empty() {
        output.info("No reviews yet.");
        return;
    }

    output.println(review_table(resolved).to_string());
    output.info(format!(
        "{} catalog reviews, {} aggregate ratings",
        resolved.reviews.by_source(ReviewSource::Primary).count(),
        resolved.reviews.by_source(ReviewSource::Secondary).count(),
    ));
}
