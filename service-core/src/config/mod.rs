use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load layered settings for a service.
///
/// Sources, lowest precedence first: `<config_dir>/base.yaml` (optional),
/// `APP_`-prefixed environment variables using `__` as the nesting separator,
/// then the explicit `overrides` (key path, environment variable) pairs.
pub fn load_settings<T: DeserializeOwned>(
    config_dir: &Path,
    overrides: &[(&str, &str)],
) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let mut builder = Cfg::builder()
        .add_source(File::from(config_dir.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

    for (key, env_var) in overrides {
        builder = builder.set_override_option(*key, std::env::var(env_var).ok())?;
    }

    Ok(builder.build()?.try_deserialize()?)
}
