//! Vector construction.
//!
//! Construction is routed through the [`VectorFactory`] trait so callers and tests
//! can inject an alternative backend, or none at all, without global state.

use serde_json::Value;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::config::{FactoryConfig, StringParsing};
use crate::error::{VelaError, VelaResult};
use crate::input::{parse_float, parse_integer_prefix, Scalar};
use crate::vector::Vector;

/// Builds vectors from raw input sequences.
pub trait VectorFactory: Send + Sync + Debug {
    /// Creates a vector from `inputs`. `None` stands for an absent sequence, which
    /// is an error; an empty slice yields a zero-dimensional vector.
    fn create(&self, inputs: Option<&[Scalar]>) -> VelaResult<Vector>;
}

/// The production factory.
#[derive(Debug, Clone, Default)]
pub struct DefaultFactory {
    config: FactoryConfig,
}

impl DefaultFactory {
    pub fn new(config: FactoryConfig) -> VelaResult<Self> {
        config.validate()?;
        Ok(DefaultFactory { config })
    }

    pub fn config(&self) -> FactoryConfig {
        self.config
    }

    /// Converts one raw element to a component value.
    fn normalize(&self, position: usize, scalar: &Scalar) -> VelaResult<f64> {
        let value = match scalar {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(text) => match self.config.string_parsing {
                StringParsing::Integer => parse_integer_prefix(text, self.config.trim_whitespace),
                StringParsing::Float => parse_float(text, self.config.trim_whitespace),
            },
            Scalar::Absent | Scalar::Opaque(_) => None,
        };
        match value {
            Some(v) if !v.is_nan() => Ok(v),
            _ => {
                warn!(position, kind = scalar.kind(), "Rejected non-numeric vector element");
                Err(VelaError::InvalidInput(format!(
                    "element {} ({}) is not a number",
                    position, scalar
                )))
            }
        }
    }
}

impl VectorFactory for DefaultFactory {
    fn create(&self, inputs: Option<&[Scalar]>) -> VelaResult<Vector> {
        let inputs = inputs.ok_or_else(|| {
            warn!("Rejected absent input sequence");
            VelaError::InvalidInput(
                "vector cannot be created from null, use an empty sequence for an empty vector".to_string(),
            )
        })?;

        if let Some(max) = self.config.max_dimensions {
            if inputs.len() > max {
                warn!(len = inputs.len(), max, "Rejected input sequence above dimension limit");
                return Err(VelaError::InvalidInput(format!(
                    "{} components exceed the limit of {}",
                    inputs.len(),
                    max
                )));
            }
        }

        // Holes are reported before any parsing happens.
        if let Some(position) = inputs.iter().position(Scalar::is_absent) {
            warn!(position, "Rejected absent vector element");
            return Err(VelaError::InvalidInput(format!(
                "element {} is null or undefined",
                position
            )));
        }

        let components = inputs
            .iter()
            .enumerate()
            .map(|(position, scalar)| self.normalize(position, scalar))
            .collect::<VelaResult<Vec<f64>>>()?;

        debug!(dimensions = components.len(), parsing = ?self.config.string_parsing, "Created vector");
        Ok(Vector::from(components))
    }
}

/// A factory with no backend. Every creation fails with [`VelaError::NotImplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableFactory;

impl VectorFactory for UnavailableFactory {
    fn create(&self, _inputs: Option<&[Scalar]>) -> VelaResult<Vector> {
        warn!("Vector creation attempted without an implementation");
        Err(VelaError::NotImplemented(
            "no valid vector implementation currently available".to_string(),
        ))
    }
}

/// Creates a vector with the default factory.
pub fn create_vector<I, S>(inputs: I) -> VelaResult<Vector>
where
    I: IntoIterator<Item = S>,
    S: Into<Scalar>,
{
    create_vector_with(&DefaultFactory::default(), inputs)
}

/// Creates a vector with the given factory.
pub fn create_vector_with<I, S>(factory: &dyn VectorFactory, inputs: I) -> VelaResult<Vector>
where
    I: IntoIterator<Item = S>,
    S: Into<Scalar>,
{
    let scalars: Vec<Scalar> = inputs.into_iter().map(Into::into).collect();
    factory.create(Some(&scalars))
}

impl Vector {
    /// Creates a vector from a JSON array with the default factory.
    ///
    /// `null` is treated as an absent sequence. Any other non-array document is
    /// rejected with [`VelaError::InvalidInput`].
    pub fn from_json(value: &Value) -> VelaResult<Vector> {
        Vector::from_json_with(&DefaultFactory::default(), value)
    }

    pub fn from_json_with(factory: &dyn VectorFactory, value: &Value) -> VelaResult<Vector> {
        match value {
            Value::Null => factory.create(None),
            Value::Array(items) => {
                let scalars: Vec<Scalar> = items.iter().map(Scalar::from).collect();
                factory.create(Some(&scalars))
            }
            other => Err(VelaError::InvalidInput(format!(
                "expected a JSON array, got {}",
                Scalar::from(other).kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_factory_numbers() {
        let vector = create_vector([1.5, 2.0, -3.25]).unwrap();
        assert_eq!(vector.as_slice(), &[1.5, 2.0, -3.25]);
    }

    #[test]
    fn test_absent_sequence_rejected() {
        let factory = DefaultFactory::default();
        assert!(matches!(factory.create(None), Err(VelaError::InvalidInput(_))));
        assert!(matches!(Vector::from_json(&json!(null)), Err(VelaError::InvalidInput(_))));
    }

    #[test]
    fn test_absent_element_reported_before_bad_string() {
        let inputs = vec![Scalar::from("foo"), Scalar::Absent];
        let err = DefaultFactory::default().create(Some(&inputs)).unwrap_err();
        assert_eq!(err, VelaError::InvalidInput("element 1 is null or undefined".to_string()));
    }

    #[test]
    fn test_non_array_json_rejected() {
        assert!(matches!(Vector::from_json(&json!(5)), Err(VelaError::InvalidInput(_))));
        assert!(matches!(Vector::from_json(&json!({"a": 1})), Err(VelaError::InvalidInput(_))));
    }

    #[test]
    fn test_nan_literal_rejected() {
        assert!(matches!(create_vector([1.0, f64::NAN]), Err(VelaError::InvalidInput(_))));
    }

    #[test]
    fn test_float_parsing_mode() {
        let factory = DefaultFactory::new(FactoryConfig::new(StringParsing::Float)).unwrap();
        let vector = create_vector_with(&factory, ["5.5", "-0.25"]).unwrap();
        assert_eq!(vector.as_slice(), &[5.5, -0.25]);
        assert!(create_vector_with(&factory, ["12px"]).is_err());
        assert!(matches!(create_vector_with(&factory, ["inf"]), Err(VelaError::InvalidInput(_))));
        assert_eq!(create_vector_with(&factory, ["-Infinity"]).unwrap().as_slice(), &[f64::NEG_INFINITY]);

        let truncating = create_vector(["5.5", "-0.25"]).unwrap();
        assert_eq!(truncating.as_slice(), &[5.0, -0.0]);
    }

    #[test]
    fn test_whitespace_handling() {
        assert_eq!(create_vector([" 7"]).unwrap().as_slice(), &[7.0]);

        let strict = DefaultFactory::new(FactoryConfig {
            trim_whitespace: false,
            ..FactoryConfig::default()
        })
        .unwrap();
        assert!(matches!(create_vector_with(&strict, [" 7"]), Err(VelaError::InvalidInput(_))));
    }

    #[test]
    fn test_max_dimensions() {
        let factory = DefaultFactory::new(FactoryConfig::default().with_max_dimensions(2)).unwrap();
        assert!(create_vector_with(&factory, [1, 2]).is_ok());
        assert!(matches!(create_vector_with(&factory, [1, 2, 3]), Err(VelaError::InvalidInput(_))));
        assert!(matches!(
            DefaultFactory::new(FactoryConfig::default().with_max_dimensions(0)),
            Err(VelaError::Configuration(_))
        ));
    }

    #[test]
    fn test_unavailable_factory() {
        let factory = UnavailableFactory;
        assert!(matches!(create_vector_with(&factory, Vec::<f64>::new()), Err(VelaError::NotImplemented(_))));
        assert!(matches!(Vector::from_json_with(&factory, &json!([1, 2])), Err(VelaError::NotImplemented(_))));
        assert!(create_vector_with(&DefaultFactory::default(), Vec::<f64>::new()).is_ok());
    }
}
