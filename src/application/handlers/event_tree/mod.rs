//! Event tree analysis handlers.

mod command;
mod error;
mod handler;
mod model_loader;

pub use command::EtaCommand;
pub use error::EtaError;
pub use handler::EventTreeAnalysisHandler;
pub use model_loader::ModelLoader;
