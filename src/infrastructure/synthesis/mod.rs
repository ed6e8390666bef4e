pub mod openai_synthesis_client;
pub mod polly_synthesis_client;
pub mod synthesis_client;

pub use openai_synthesis_client::OpenAiConnector;
pub use polly_synthesis_client::PollyConnector;
pub use synthesis_client::{ClientError, SynthesisClient, SynthesisConnector};
