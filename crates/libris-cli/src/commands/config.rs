use anyhow::{Context, Result};
use libris_client::config;
use libris_client::Config;
use toml_edit::{value, DocumentMut};

const VALID_KEYS: &str = "api_base_url, logging.level, logging.coloured";

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  api_base_url: {}", config.api_base_url);
    println!("  logging.level: {}", config.logging.level);
    println!("  logging.coloured: {}", config.logging.coloured);

    println!("\nPriority: CLI args > ENV vars (LIBRIS_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value.
pub fn get_config(key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        let config = Config::load()?;

        match key.as_str() {
            "api_base_url" => println!("{}", config.api_base_url),
            "logging.level" => println!("{}", config.logging.level),
            "logging.coloured" => println!("{}", config.logging.coloured),
            _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS),
        }
    } else {
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'libris config init' to create it.");
        }
    }

    Ok(())
}

/// Apply `key = raw` to a parsed config document.
fn apply_setting(doc: &mut DocumentMut, key: &str, raw: &str) -> Result<()> {
    match key {
        "api_base_url" => {
            if !(raw.starts_with("http://") || raw.starts_with("https://")) {
                anyhow::bail!("api_base_url must start with http:// or https://");
            }
            doc["api_base_url"] = value(raw);
        }
        "logging.level" | "logging.coloured" => {
            if !doc.contains_key("logging") {
                doc["logging"] = toml_edit::table();
            }
            if key == "logging.level" {
                doc["logging"]["level"] = value(raw);
            } else {
                let coloured: bool = raw
                    .parse()
                    .with_context(|| format!("logging.coloured must be true or false, got {raw}"))?;
                doc["logging"]["coloured"] = value(coloured);
            }
        }
        _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS),
    }
    Ok(())
}

/// Set a config value, keeping the rest of the file (comments included) intact.
pub fn set_config(key: &str, raw: &str) -> Result<()> {
    let config_path = config::config_file_path();

    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
    let mut doc: DocumentMut = contents.parse().context("Failed to parse config file")?;

    apply_setting(&mut doc, key, raw)?;

    std::fs::write(&config_path, doc.to_string()).context("Failed to write config file")?;

    println!("✓ Updated {} = {}", key, raw);
    println!("  in {}", config_path.display());

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure libris.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> DocumentMut {
        config::example_config().parse().unwrap()
    }

    #[test]
    fn test_set_api_base_url_keeps_comments() {
        let mut doc = example();
        apply_setting(&mut doc, "api_base_url", "https://library.example").unwrap();
        let text = doc.to_string();
        assert!(text.contains("api_base_url = \"https://library.example\""));
        assert!(text.contains("# Origin of the library backend"));
    }

    #[test]
    fn test_set_logging_values() {
        let mut doc = example();
        apply_setting(&mut doc, "logging.level", "debug").unwrap();
        apply_setting(&mut doc, "logging.coloured", "false").unwrap();
        assert_eq!(doc["logging"]["level"].as_str(), Some("debug"));
        assert_eq!(doc["logging"]["coloured"].as_bool(), Some(false));
    }

    #[test]
    fn test_set_logging_creates_table() {
        let mut doc = DocumentMut::new();
        apply_setting(&mut doc, "logging.level", "warn").unwrap();
        assert_eq!(doc["logging"]["level"].as_str(), Some("warn"));
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut doc = example();
        assert!(apply_setting(&mut doc, "api_base_url", "ftp://x").is_err());
        assert!(apply_setting(&mut doc, "logging.coloured", "sometimes").is_err());
        assert!(apply_setting(&mut doc, "database_path", "/tmp").is_err());
    }
}
