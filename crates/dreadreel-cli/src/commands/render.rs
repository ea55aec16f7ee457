use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use reel_core::ResolvedMovie;
use reel_models::{MovieDetail, MovieSummary, Review, ReviewSource};

const POSTER_SIZE: &str = "w500";
const EXCERPT_CHARS: usize = 120;

fn styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Red).add_attribute(Attribute::Bold)),
    );
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn rating_cell(rating: Option<f64>) -> String {
    rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".to_string())
}

/// Cut `text` to at most `max` characters on a char boundary, with an ellipsis
pub fn excerpt(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn movie_table(movies: &[MovieSummary], image_base_url: &str) -> Table {
    let mut table = styled_table(&["#", "ID", "Title", "Year", "Rating", "Poster"]);
    for (index, movie) in movies.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            movie.id.to_string(),
            movie.title.clone(),
            movie.release_year.to_string(),
            rating_cell(movie.rating),
            movie.poster_url(image_base_url, POSTER_SIZE).unwrap_or_default(),
        ]);
    }
    table
}

pub fn detail_table(detail: &MovieDetail, image_base_url: &str) -> Table {
    let summary = &detail.summary;
    let mut table = styled_table(&["Field", "Value"]);
    table.add_row(vec!["Title".to_string(), format!("{} ({})", summary.title, summary.release_year)]);
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        table.add_row(vec!["Tagline".to_string(), tagline.to_string()]);
    }
    table.add_row(vec!["Director".to_string(), detail.director.clone()]);
    if !detail.cast.is_empty() {
        table.add_row(vec!["Cast".to_string(), detail.cast.join(", ")]);
    }
    if let Some(runtime) = detail.runtime_minutes {
        table.add_row(vec!["Runtime".to_string(), format!("{} min", runtime)]);
    }
    if !detail.genres.is_empty() {
        table.add_row(vec!["Genres".to_string(), detail.genres.join(", ")]);
    }
    table.add_row(vec!["Rating".to_string(), rating_cell(summary.rating)]);
    if let Some(poster) = summary.poster_url(image_base_url, POSTER_SIZE) {
        table.add_row(vec!["Poster".to_string(), poster]);
    }
    if !summary.overview.is_empty() {
        table.add_row(vec!["Overview".to_string(), summary.overview.clone()]);
    }
    table
}

fn review_row(review: &Review) -> Vec<String> {
    let source = match review.source {
        ReviewSource::Primary => "catalog",
        ReviewSource::Secondary => "ratings",
    };
    vec![
        source.to_string(),
        review.author.clone(),
        rating_cell(review.rating),
        review.created_at.format("%Y-%m-%d").to_string(),
        excerpt(&review.content, EXCERPT_CHARS),
    ]
}

pub fn review_table(resolved: &ResolvedMovie) -> Table {
    let mut table = styled_table(&["Source", "Author", "Rating", "Date", "Review"]);
    for review in &resolved.reviews {
        table.add_row(review_row(review));
    }
    table
}
