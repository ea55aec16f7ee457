use crate::error::SourceError;
use crate::http::{decode_each, get_json};
use reel_models::{
    parse_release_year, Credits, MovieDetails, MovieSummary, RawPrimaryReview, Video, MAX_CAST, UNKNOWN_DIRECTOR,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub(crate) const SOURCE: &str = "tmdb";

/// Base URL, key and language for one catalog deployment
#[derive(Debug, Clone)]
pub struct TmdbEndpoint {
    pub base_url: String,
    pub api_key: String,
    pub language: String,
}

impl TmdbEndpoint {
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn params(&self, extra: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        let mut params = vec![("api_key", self.api_key.clone()), ("language", self.language.clone())];
        params.extend(extra);
        params
    }
}

#[derive(Debug, Deserialize)]
struct ResultsEnvelope {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    id: u64,
    title: String,
    release_date: Option<String>,
    poster_path: Option<String>,
    overview: Option<String>,
    vote_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    id: u64,
    title: String,
    release_date: Option<String>,
    poster_path: Option<String>,
    overview: Option<String>,
    vote_average: Option<f64>,
    runtime: Option<u32>,
    tagline: Option<String>,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<serde_json::Value>,
    #[serde(default)]
    crew: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TmdbCastMember {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbCrewMember {
    name: String,
    job: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbAuthorDetails {
    rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TmdbReview {
    id: String,
    author: Option<String>,
    content: String,
    author_details: Option<TmdbAuthorDetails>,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct TmdbVideo {
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    site: String,
    #[serde(rename = "type")]
    video_type: String,
}

/// Empty strings count as missing, like every other optional catalog field
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn normalize(
    id: u64,
    title: String,
    release_date: Option<String>,
    poster_path: Option<String>,
    overview: Option<String>,
    vote_average: Option<f64>,
) -> MovieSummary {
    MovieSummary {
        id,
        title,
        release_year: parse_release_year(release_date.as_deref()),
        poster_ref: non_empty(poster_path),
        overview: overview.unwrap_or_default(),
        rating: vote_average,
    }
}

impl From<TmdbMovie> for MovieSummary {
    fn from(movie: TmdbMovie) -> Self {
        normalize(
            movie.id,
            movie.title,
            movie.release_date,
            movie.poster_path,
            movie.overview,
            movie.vote_average,
        )
    }
}

/// Drop records without a poster reference
pub fn retain_with_poster(movies: Vec<MovieSummary>) -> Vec<MovieSummary> {
    movies.into_iter().filter(|movie| movie.poster_ref.is_some()).collect()
}

fn decode_movies(records: Vec<serde_json::Value>) -> Vec<MovieSummary> {
    decode_each::<TmdbMovie>(SOURCE, "movie", records)
        .into_iter()
        .map(MovieSummary::from)
        .collect()
}

/// Popularity-sorted discovery for one genre id
pub async fn discover_movies(client: &Client, endpoint: &TmdbEndpoint, genre_id: u32) -> Result<Vec<MovieSummary>, SourceError> {
    let params = endpoint.params(vec![
        ("with_genres", genre_id.to_string()),
        ("sort_by", "popularity.desc".to_string()),
    ]);
    let envelope: ResultsEnvelope = get_json(client, SOURCE, &endpoint.url("discover/movie"), &params).await?;
    let movies = decode_movies(envelope.results);
    debug!(genre_id, count = movies.len(), "Catalog discovery returned movies");
    Ok(movies)
}

/// Title search, first results page
pub async fn search_movies(
    client: &Client,
    endpoint: &TmdbEndpoint,
    query: &str,
    genre_id: Option<u32>,
) -> Result<Vec<MovieSummary>, SourceError> {
    let mut extra = vec![
        ("query", query.to_string()),
        ("include_adult", "false".to_string()),
        ("page", "1".to_string()),
    ];
    if let Some(genre_id) = genre_id {
        extra.push(("with_genres", genre_id.to_string()));
    }
    let params = endpoint.params(extra);
    let envelope: ResultsEnvelope = get_json(client, SOURCE, &endpoint.url("search/movie"), &params).await?;
    Ok(decode_movies(envelope.results))
}

pub async fn get_movie_details(client: &Client, endpoint: &TmdbEndpoint, id: u64) -> Result<MovieDetails, SourceError> {
    let params = endpoint.params(Vec::new());
    let details: TmdbMovieDetails = get_json(client, SOURCE, &endpoint.url(&format!("movie/{}", id)), &params).await?;

    Ok(MovieDetails {
        summary: normalize(
            details.id,
            details.title,
            details.release_date,
            details.poster_path,
            details.overview,
            details.vote_average,
        ),
        runtime_minutes: details.runtime.filter(|minutes| *minutes > 0),
        tagline: non_empty(details.tagline),
        genres: details.genres.into_iter().map(|genre| genre.name).collect(),
    })
}

pub async fn get_movie_credits(client: &Client, endpoint: &TmdbEndpoint, id: u64) -> Result<Credits, SourceError> {
    let params = endpoint.params(Vec::new());
    let credits: TmdbCredits = get_json(client, SOURCE, &endpoint.url(&format!("movie/{}/credits", id)), &params).await?;
    Ok(extract_credits(credits))
}

fn extract_credits(credits: TmdbCredits) -> Credits {
    let director = decode_each::<TmdbCrewMember>(SOURCE, "crew", credits.crew)
        .into_iter()
        .find(|member| member.job.as_deref() == Some("Director"))
        .map(|member| member.name)
        .unwrap_or_else(|| UNKNOWN_DIRECTOR.to_string());

    let cast = decode_each::<TmdbCastMember>(SOURCE, "cast", credits.cast)
        .into_iter()
        .take(MAX_CAST)
        .map(|member| member.name)
        .collect();

    Credits { director, cast }
}

pub async fn get_movie_reviews(client: &Client, endpoint: &TmdbEndpoint, id: u64) -> Result<Vec<RawPrimaryReview>, SourceError> {
    let params = endpoint.params(Vec::new());
    let envelope: ResultsEnvelope = get_json(client, SOURCE, &endpoint.url(&format!("movie/{}/reviews", id)), &params).await?;

    Ok(decode_each::<TmdbReview>(SOURCE, "review", envelope.results)
        .into_iter()
        .map(|review| RawPrimaryReview {
            id: review.id,
            author: review.author,
            content: review.content,
            rating: review.author_details.and_then(|details| details.rating),
            created_at: review.created_at,
        })
        .collect())
}

pub async fn get_movie_videos(client: &Client, endpoint: &TmdbEndpoint, id: u64) -> Result<Vec<Video>, SourceError> {
    let params = endpoint.params(Vec::new());
    let envelope: ResultsEnvelope = get_json(client, SOURCE, &endpoint.url(&format!("movie/{}/videos", id)), &params).await?;

    Ok(decode_each::<TmdbVideo>(SOURCE, "video", envelope.results)
        .into_iter()
        .map(|video| Video {
            key: video.key,
            name: video.name,
            site: video.site,
            video_type: video.video_type,
        })
        .collect())
}
