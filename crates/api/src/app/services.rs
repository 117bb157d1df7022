use startshop_infra::ProductRepository;

use crate::app::views::{ViewError, Views};

/// Dependencies shared by every handler.
#[derive(Debug)]
pub struct AppServices {
    repository: ProductRepository,
    views: Views,
}

impl AppServices {
    pub fn new(repository: ProductRepository) -> Result<Self, ViewError> {
        Ok(Self {
            repository,
            views: Views::new()?,
        })
    }

    pub fn repository(&self) -> &ProductRepository {
        &self.repository
    }

    pub fn views(&self) -> &Views {
        &self.views
    }
}
