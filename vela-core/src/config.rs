use serde::{Serialize, Deserialize};
use crate::error::{VelaResult, VelaError};

/// How string elements are turned into numbers during construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringParsing {
    /// Decimal integer prefix parse: `"5.0"` becomes 5, `"12px"` becomes 12.
    #[default]
    Integer,
    /// Full floating point parse: `"5.5"` stays 5.5. Trailing garbage is rejected.
    Float,
}

/// Configuration parameters for vector construction.
///
/// The defaults reproduce the classic construction rules: integer-prefix string
/// parsing, leading whitespace skipped, no size limit. `trim_whitespace` and
/// `max_dimensions` only tighten validation; they never change how an accepted
/// value is stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Parsing mode applied to string elements.
    pub string_parsing: StringParsing,
    /// Skip leading whitespace in string elements before parsing.
    pub trim_whitespace: bool,
    /// Upper bound on the number of components a factory will build. None means unbounded.
    pub max_dimensions: Option<usize>,
}

impl FactoryConfig {
    /// Creates a new configuration with the given parsing mode and no dimension limit.
    pub fn new(string_parsing: StringParsing) -> Self {
        FactoryConfig {
            string_parsing,
            ..FactoryConfig::default()
        }
    }

    /// Sets the dimension limit.
    pub fn with_max_dimensions(mut self, max_dimensions: usize) -> Self {
        self.max_dimensions = Some(max_dimensions);
        self
    }

    /// Loads a configuration from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> VelaResult<Self> {
        let config: FactoryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> VelaResult<()> {
        if self.max_dimensions == Some(0) {
            return Err(VelaError::Configuration("max_dimensions must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        FactoryConfig {
            string_parsing: StringParsing::Integer,
            trim_whitespace: true,
            max_dimensions: None,
        }
    }
}
