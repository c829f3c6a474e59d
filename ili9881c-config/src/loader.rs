//! TOML front end
//!
//! The whole TOML document describes one panel. Values are converted into
//! the core [`ConfigValue`] tree and resolved by
//! [`PanelConfig::from_document`], so every range and shape check lives in
//! one place.

use alloc::string::String;
use alloc::vec::Vec;

use ili9881c_core::config::ConfigValue;
use ili9881c_core::PanelConfig;

use crate::error::LoadError;

/// Parse TOML text into a configuration document
pub fn document_from_toml(input: &str) -> Result<ConfigValue, LoadError> {
    let table: toml::Table = toml::from_str(input).map_err(|e| {
        #[cfg(feature = "defmt")]
        defmt::warn!("TOML parse error: {}", defmt::Display2Format(&e));

        LoadError::Syntax {
            offset: e.span().map(|span| span.start),
        }
    })?;
    convert_table(&table)
}

/// Parse and validate a panel configuration
pub fn parse_config(input: &str) -> Result<PanelConfig, LoadError> {
    let document = document_from_toml(input)?;
    let config = PanelConfig::from_document(&document)?;

    #[cfg(feature = "defmt")]
    log_config_summary(&config);

    Ok(config)
}

fn convert_table(table: &toml::Table) -> Result<ConfigValue, LoadError> {
    let entries = table
        .iter()
        .map(|(key, value)| Ok((String::from(key.as_str()), convert(value)?)))
        .collect::<Result<Vec<_>, LoadError>>()?;
    Ok(ConfigValue::Table(entries))
}

fn convert(value: &toml::Value) -> Result<ConfigValue, LoadError> {
    Ok(match value {
        toml::Value::Boolean(b) => ConfigValue::Bool(*b),
        toml::Value::Integer(i) => ConfigValue::Integer(*i),
        toml::Value::Float(f) => ConfigValue::Float(*f),
        toml::Value::String(s) => ConfigValue::String(s.clone()),
        toml::Value::Array(items) => {
            ConfigValue::List(items.iter().map(convert).collect::<Result<_, _>>()?)
        }
        toml::Value::Table(table) => convert_table(table)?,
        toml::Value::Datetime(_) => return Err(LoadError::UnsupportedDatetime),
    })
}

#[cfg(feature = "defmt")]
fn log_config_summary(config: &PanelConfig) {
    defmt::info!("Panel configuration loaded");
    defmt::debug!("  model {}", config.model.name());
    defmt::debug!("  {}x{}", config.geometry.width, config.geometry.height);
    defmt::debug!("  {} lanes", config.link.lane_count);
    defmt::debug!("  {} init instructions", config.init_sequence.len());
}
