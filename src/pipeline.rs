// src/pipeline.rs
//! Pipeline capability traits — abstract the stages of the catalog-to-site
//! generation run.
//!
//! Each trait describes a single capability, enabling testing each stage in
//! isolation.

use crate::assembler::ViewModel;
use crate::error::AppError;
use crate::output::{OutputPlan, OutputReport};

/// Assembles the view-model for one requested route.
#[async_trait::async_trait]
pub trait ViewSource {
    async fn assemble_route(&self, lang: &str, id: &str) -> Result<ViewModel, AppError>;
}

/// Delivers assembled view-models to their destinations.
pub trait ViewDelivery {
    fn deliver(&self, plan: OutputPlan) -> Result<OutputReport, AppError>;
}
