use crate::config::types::{
    Config, CrawlerConfig, DateConfig, FieldSpec, SeedEntry, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_date_config(&config.dates)?;
    validate_seeds(&config.seed)?;
    validate_fields(&config.fields)?;

    if config.output.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler budgets
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    // Basic shape check only; full RFC validation is not worth carrying
    if !config.contact_email.contains('@') || config.contact_email.len() < 3 {
        return Err(ConfigError::Validation(format!(
            "contact_email does not look like an email address: '{}'",
            config.contact_email
        )));
    }

    Ok(())
}

/// Validates the accepted year range
fn validate_date_config(config: &DateConfig) -> Result<(), ConfigError> {
    if config.min_year > config.max_year {
        return Err(ConfigError::Validation(format!(
            "min_year ({}) must not exceed max_year ({})",
            config.min_year, config.max_year
        )));
    }

    if config.min_year < 1000 || config.max_year > 9999 {
        return Err(ConfigError::Validation(format!(
            "year range must stay within four digits, got {}..={}",
            config.min_year, config.max_year
        )));
    }

    Ok(())
}

/// Validates seed URLs
fn validate_seeds(seeds: &[SeedEntry]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[seed]] is required".to_string(),
        ));
    }

    for entry in seeds {
        let url = Url::parse(&entry.url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", entry.url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use http or https",
                entry.url
            )));
        }

        if url.host_str().is_none() {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' has no host",
                entry.url
            )));
        }
    }

    Ok(())
}

/// Validates the target-field alias table
fn validate_fields(fields: &[FieldSpec]) -> Result<(), ConfigError> {
    if fields.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[field]] is required".to_string(),
        ));
    }

    for field in fields {
        if field.name.is_empty() {
            return Err(ConfigError::Validation(
                "field name cannot be empty".to_string(),
            ));
        }

        if field.aliases.is_empty() {
            return Err(ConfigError::Validation(format!(
                "field '{}' must have at least one alias",
                field.name
            )));
        }

        if field.aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "field '{}' has an empty alias",
                field.name
            )));
        }
    }

    // Duplicate canonical names would make the column map ambiguous
    for (i, field) in fields.iter().enumerate() {
        if fields[..i].iter().any(|f| f.name == field.name) {
            return Err(ConfigError::Validation(format!(
                "duplicate field name '{}'",
                field.name
            )));
        }
    }

    Ok(())
}
