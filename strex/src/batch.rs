//! Extraction over many documents.
//!
//! Each document runs through the chain on its own. A semaphore bounds how
//! many model calls are in flight, and results come back in input order
//! whatever order the calls finish in.

use futures::future::{join_all, try_join_all};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::chain::ExtractionChain;
use crate::config::BatchOptions;
use crate::document::{Document, DocumentExtraction};
use crate::error::{ExtractionError, Result};
use strex_models::ModelError;

/// Run extraction on every document.
///
/// Source uids come from each document's `uid` metadata when
/// [`BatchOptions::use_uid`] is set, else from its position. The result uid
/// is the source uid.
///
/// With [`BatchOptions::return_exceptions`] unset, the first failure fails
/// the whole batch and pending calls are dropped. With it set, failures are
/// returned in place and the other documents carry on.
///
/// # Errors
///
/// Fails before any model call if a document lacks a uid while `use_uid` is
/// set. Without `return_exceptions`, also fails with the first extraction
/// error.
///
/// # Example
///
/// ```rust
/// use strex::prelude::*;
///
/// # tokio_test::block_on(async {
/// let schema = Object::new("name").unwrap();
/// let model = FunctionModel::new(|input: &PromptInput| {
///     let text = input.last_user_text().unwrap_or_default();
///     Ok(format!("<name>{text}</name>"))
/// })
/// .chat(true);
/// let chain = ExtractionChain::new(model, schema, ExtractionOptions::default());
///
/// let documents = vec![Document::new("Ann"), Document::new("Tom")];
/// let options = BatchOptions::new().max_concurrency(2);
/// let results = extract_from_documents(&chain, &documents, &options).await.unwrap();
///
/// let first = results[0].as_ref().unwrap();
/// assert_eq!(first.source_uid, "0");
/// assert_eq!(first.extraction.data, serde_json::json!({"name": ["Ann"]}));
/// # });
/// ```
pub async fn extract_from_documents(
    chain: &ExtractionChain,
    documents: &[Document],
    options: &BatchOptions,
) -> Result<Vec<Result<DocumentExtraction>>> {
    extract_from_documents_with(chain, documents, options, |_doc, source_uid| {
        source_uid.to_string()
    })
    .await
}

/// Like [`extract_from_documents`], deriving each result uid with `uid_fn`.
///
/// `uid_fn` gets the document and its source uid.
///
/// # Errors
///
/// See [`extract_from_documents`].
pub async fn extract_from_documents_with<F>(
    chain: &ExtractionChain,
    documents: &[Document],
    options: &BatchOptions,
    uid_fn: F,
) -> Result<Vec<Result<DocumentExtraction>>>
where
    F: Fn(&Document, &str) -> String,
{
    let mut jobs = Vec::with_capacity(documents.len());
    for (index, document) in documents.iter().enumerate() {
        let source_uid = if options.use_uid {
            document
                .uid()
                .ok_or_else(|| ExtractionError::missing_uid(index))?
        } else {
            index.to_string()
        };
        let uid = uid_fn(document, &source_uid);
        jobs.push((document, uid, source_uid));
    }

    let semaphore = Arc::new(Semaphore::new(options.permits()));
    debug!(
        documents = jobs.len(),
        max_concurrency = options.permits(),
        return_exceptions = options.return_exceptions,
        "Starting batch extraction"
    );

    let tasks = jobs.into_iter().map(|(document, uid, source_uid)| {
        let semaphore = semaphore.clone();
        async move {
            let _permit = semaphore
                .acquire()
                .await
                .map_err(|_| ExtractionError::from(ModelError::Cancelled))?;
            debug!(%uid, %source_uid, "Extracting document");
            let extraction = chain.run(&document.page_content).await?;
            debug!(%uid, errors = extraction.errors.len(), "Document done");
            Ok::<_, ExtractionError>(DocumentExtraction {
                uid,
                source_uid,
                extraction,
            })
        }
    });

    if options.return_exceptions {
        Ok(join_all(tasks).await)
    } else {
        let results = try_join_all(tasks).await?;
        Ok(results.into_iter().map(Ok).collect())
    }
}
