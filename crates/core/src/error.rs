use thiserror::Error;

use crate::model::{CatalogError, QuestionError, StatsError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionCatalog, QuestionId, QuestionRecord};

    fn build_catalog() -> Result<QuestionCatalog, Error> {
        let record = |id| {
            QuestionRecord::new(
                QuestionId::new(id),
                crate::model::Category::Ethics,
                "Prompt",
                ["a", "b", "c", "d"],
                0,
                "because",
            )
        };
        Ok(QuestionCatalog::new([record(1)?, record(1)?])?)
    }

    #[test]
    fn catalog_build_errors_surface_through_the_umbrella() {
        assert!(matches!(build_catalog(), Err(Error::Catalog(_))));

        let err: Error = QuestionError::EmptyPrompt.into();
        assert_eq!(err.to_string(), "question prompt cannot be empty");
    }
}
