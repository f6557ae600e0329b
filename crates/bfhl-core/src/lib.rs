// Library root: token classification, boundary normalization and the
// identity record echoed in every response.

pub mod classifier;
pub mod error;
pub mod identity;
pub mod token;

pub use classifier::{classify, transform, ClassificationResult};
pub use error::ClassifyError;
pub use identity::UserInfo;
pub use token::{classify_json, tokens_from_json};
