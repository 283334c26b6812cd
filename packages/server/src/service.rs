use crate::remote::RemoteError;
use crate::retry::{retry, RetryPolicy};
use crate::store::{
    sort_by_recent, ClientContext, CreatedDocument, DocumentFilter, DocumentMeta, DocumentStore,
    DEFAULT_TITLE,
};
use docsync_compiler_docs::compile_batch;

/// Compile markup and store it as a new document.
///
/// Compilation finishes before any remote call. Creation is attempted once;
/// the batch submission is retried under `policy`. An empty batch is not sent.
pub async fn save_markup(
    store: &dyn DocumentStore,
    policy: &RetryPolicy,
    ctx: &ClientContext,
    title: Option<&str>,
    markup: &str,
) -> Result<CreatedDocument, RemoteError> {
    let batch = compile_batch(markup);
    let title = title.filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TITLE);

    let created = store.create_document(ctx, title).await?;

    if batch.is_empty() {
        tracing::debug!(document_id = %created.document_id, "no content to submit");
    } else {
        tracing::debug!(
            document_id = %created.document_id,
            requests = batch.len(),
            "submitting batch update"
        );
        retry(policy, "batch update", || {
            store.batch_update(ctx, &created.document_id, &batch)
        })
        .await?;
    }

    Ok(created)
}

/// List documents, most recently modified first
pub async fn list_documents(
    store: &dyn DocumentStore,
    policy: &RetryPolicy,
    ctx: &ClientContext,
    filter: &DocumentFilter,
) -> Result<Vec<DocumentMeta>, RemoteError> {
    let mut documents = retry(policy, "list documents", || store.list_documents(ctx, filter)).await?;
    sort_by_recent(&mut documents);
    Ok(documents)
}
