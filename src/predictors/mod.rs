pub mod http;
pub mod traits;
pub mod types;

pub use http::HttpPredictor;
pub use traits::PricePredictor;
pub use types::PredictorConfig;
