use crate::core::{
    ConfigState, ConfigUpdate, Configuration, GeometryCache, OrbitControls, ViewState,
};

/// Everything the event handlers and the frame loop share.
///
/// Lives in one `Rc<RefCell<_>>`; every borrow is short and happens on the
/// single browser thread, so handlers and frames never overlap.
#[derive(Default)]
pub struct AppState {
    pub config: ConfigState,
    pub view: ViewState,
    pub orbit: OrbitControls,
    pub geometry: GeometryCache,
}

impl AppState {
    pub fn new(initial: Configuration) -> Self {
        Self {
            config: ConfigState::new(initial),
            ..Default::default()
        }
    }

    /// Merges a partial update and logs the resulting record.
    pub fn update_configuration(&mut self, update: &ConfigUpdate) {
        let before = self.config.revision();
        self.config.update_configuration(update);
        if self.config.revision() != before {
            let next = self.config.current();
            match serde_json::to_string(next) {
                Ok(json) => log::info!("config changed: {}", json),
                Err(_) => log::info!("config changed: {:?}", next),
            }
        }
    }
}
