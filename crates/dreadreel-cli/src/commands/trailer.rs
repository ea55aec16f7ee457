use super::progress::Spinner;
use crate::output::Output;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use reel_core::Pipeline;
use reel_models::TrailerSite;
use serde_json::json;

pub async fn run_trailer(pipeline: &Pipeline, title: &str, embed: bool, output: &Output) -> Result<()> {
    let spinner = Spinner::start(format!("Looking for a trailer for '{}'...", title), output);
    let trailer = pipeline.trailer_finder().find_trailer(title).await;
    spinner.finish();
    let trailer = trailer.wrap_err_with(|| format!("Could not find a trailer for '{}'", title))?;

    if !output.is_human() {
        output.json(&json!({
            "type": "trailer",
            "trailer": trailer,
            "watch_url": trailer.watch_url(),
            "embed_url": trailer.embed_url(),
        }));
        return Ok(());
    }

    let via = match trailer.site {
        TrailerSite::Catalog => "catalog",
        TrailerSite::VideoPlatform => "video search",
    };
    output.success(format!("{} (found via {})", trailer.title, via));
    output.println(trailer.watch_url());
    if embed {
        output.println(trailer.embed_url());
    }
    Ok(())
}
