use std::sync::Arc;

use crate::adapters::{AppConfig, FfmpegDurationProbe, PathSearchLocator, TokioProcessRunner};
use crate::app::{export_interactor::ExportInteractor, inspect_interactor::InspectInteractor};
use crate::ports::{LocatorPort, ProbePort, ProcessPort};

pub trait AppContainer: Send + Sync {
    fn export_interactor(&self) -> Arc<ExportInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
}

pub struct DefaultAppContainer {
    export_interactor: Arc<ExportInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Self {
        let process_port = Arc::new(TokioProcessRunner::new());
        let locator_port = Arc::new(PathSearchLocator::new());
        let probe_port = Arc::new(FfmpegDurationProbe::new());

        let export_interactor = Arc::new(
            ExportInteractor::new(
                Arc::clone(&process_port) as Arc<dyn ProcessPort>,
                Arc::clone(&locator_port) as Arc<dyn LocatorPort>,
            )
            .with_temp_root(config.temp_dir.clone()),
        );

        let inspect_interactor = Arc::new(InspectInteractor::new(
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
            Arc::clone(&locator_port) as Arc<dyn LocatorPort>,
        ));

        Self {
            export_interactor,
            inspect_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn export_interactor(&self) -> Arc<ExportInteractor> {
        Arc::clone(&self.export_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }
}
