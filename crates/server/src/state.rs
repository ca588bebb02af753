use std::sync::Arc;

use service::song::CatalogService;

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<CatalogService>,
}

impl ServerState {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog: Arc::new(catalog) }
    }
}
