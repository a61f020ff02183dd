pub mod config;
pub mod error;
pub mod factory;
pub mod input;
pub mod vector;


// Re-export key types/traits for easier use
pub use config::{FactoryConfig, StringParsing};
pub use error::{VelaError, VelaResult};
pub use factory::{create_vector, create_vector_with, DefaultFactory, UnavailableFactory, VectorFactory};
pub use input::{Position, Scalar};
pub use vector::Vector;
