use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use reel_config::{Config, PLACEHOLDER_KEY};
use serde_json::json;
use std::path::Path;

use super::config_file;

pub fn run_config(cmd: ConfigCommands, config_path: Option<&Path>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, config_path, output),
        ConfigCommands::Init { force } => init_config(force, config_path, output),
    }
}

fn show_config(full: bool, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let config_file = config_file(config_path);

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Run 'dreadreel config init' to create one.");
        return Ok(());
    }

    let mut config = Config::load_from_file(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config.apply_env_overrides();

    let key = |value: &str| if full { value.to_string() } else { mask_key(value) };
    let video_key = config.video.as_ref().map(|v| key(&v.api_key));
    let video_base = config.video.as_ref().map(|v| v.base_url.clone());
    let problem = config.validate().err().map(|e| e.to_string());

    if !output.is_human() {
        output.json(&json!({
            "type": "config",
            "path": config_file.display().to_string(),
            "catalog": {
                "api_key": key(&config.catalog.api_key),
                "base_url": config.catalog.base_url,
                "image_base_url": config.catalog.image_base_url,
                "language": config.catalog.language,
                "genre_id": config.catalog.genre_id,
            },
            "ratings": {
                "api_key": key(&config.ratings.api_key),
                "base_url": config.ratings.base_url,
            },
            "video": video_key.map(|api_key| json!({ "api_key": api_key, "base_url": video_base })),
            "http": { "request_timeout_ms": config.http.request_timeout_ms },
            "search": { "debounce_ms": config.search.debounce_ms },
            "valid": problem.is_none(),
            "problem": problem,
        }));
        return Ok(());
    }

    if output.is_quiet() {
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Red).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Red).add_attribute(Attribute::Bold),
    ]);
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);

    table.add_row(vec!["Config File".to_string(), config_file.display().to_string()]);
    table.add_row(vec!["catalog.api_key".to_string(), key(&config.catalog.api_key)]);
    table.add_row(vec!["catalog.base_url".to_string(), config.catalog.base_url.clone()]);
    table.add_row(vec!["catalog.image_base_url".to_string(), config.catalog.image_base_url.clone()]);
    table.add_row(vec!["catalog.language".to_string(), config.catalog.language.clone()]);
    table.add_row(vec!["catalog.genre_id".to_string(), config.catalog.genre_id.to_string()]);
    table.add_row(vec!["ratings.api_key".to_string(), key(&config.ratings.api_key)]);
    table.add_row(vec!["ratings.base_url".to_string(), config.ratings.base_url.clone()]);
    table.add_row(vec![
        "video.api_key".to_string(),
        video_key.unwrap_or_else(|| "<not set>".to_string()),
    ]);
    table.add_row(vec![
        "http.request_timeout_ms".to_string(),
        config.http.request_timeout_ms.to_string(),
    ]);
    table.add_row(vec!["search.debounce_ms".to_string(), config.search.debounce_ms.to_string()]);
    output.println(table.to_string());

    match problem {
        None => output.success("Configuration is valid"),
        Some(problem) => output.warn(format!("Configuration is incomplete: {}", problem)),
    }
    Ok(())
}

fn init_config(force: bool, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let config_file = config_file(config_path);

    if config_file.exists() && !force {
        output.warn(format!("Configuration already exists at: {}", config_file.display()));
        output.info("Use --force to overwrite it.");
        return Ok(());
    }

    Config::template()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote starter configuration to {}", config_file.display()));
    output.info("Replace the YOUR_API_KEY placeholders with your catalog and ratings API keys.");
    Ok(())
}

fn mask_key(key: &str) -> String {
    if key.is_empty() || key == PLACEHOLDER_KEY {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key(""), "<not set>");
        assert_eq!(mask_key("YOUR_API_KEY"), "<not set>");
        assert_eq!(mask_key("abc"), "***");
        assert_eq!(mask_key("8f2c91d0e4"), "8f***e4");
    }

    #[test]
    fn test_init_writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dreadreel").join("config.toml");
        let output = Output::new(crate::output::OutputFormat::Json, true);

        init_config(false, Some(path.as_path()), &output).unwrap();
        let written = Config::load_from_file(&path).unwrap();
        assert_eq!(written.catalog.api_key, PLACEHOLDER_KEY);
        assert_eq!(written.search.debounce_ms, Config::template().search.debounce_ms);

        std::fs::write(&path, "not toml at all [").unwrap();
        init_config(false, Some(path.as_path()), &output).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not toml at all [");

        init_config(true, Some(path.as_path()), &output).unwrap();
        assert!(Config::load_from_file(&path).is_ok());
    }
}
