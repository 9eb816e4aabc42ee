use crate::content::ContentError;
use crate::model::ProductId;
use thiserror::Error;

/// Why a product page could not be served as a full page.
#[derive(Debug, Error)]
pub enum PageError {
    /// The id is not in the catalog. Always resolves to `NotFound`.
    #[error("product {0} is not in the catalog")]
    CatalogMiss(ProductId),

    /// The content source could not answer. Recoverable unless the failure policy says otherwise.
    #[error("content fetch failed for {id}")]
    ContentFetch {
        id: ProductId,
        #[source]
        source: ContentError,
    },

    #[error("page actor communication error: {0}")]
    ActorCommunicationError(String),
}
