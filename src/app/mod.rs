// Application layer - Use case interactors

pub mod container;
pub mod export_interactor;
pub mod inspect_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use export_interactor::{ExportInteractor, ExportReport, ExportRequest};
pub use inspect_interactor::{InspectInteractor, InspectReport};
