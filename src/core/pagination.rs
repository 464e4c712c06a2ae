use crate::core::{ProductStore, Record, Result};
use crate::utils::error::ProductApiError;

/// 逐頁掃描整張表。每一頁回傳的續傳鍵原封不動地作為下一頁的起點，
/// 直到某一頁沒有續傳鍵為止。
pub async fn scan_all<S: ProductStore + ?Sized>(store: &S) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut start_key = None;
    let mut pages = 0usize;

    loop {
        let page = store.scan(start_key.clone()).await?;
        pages += 1;
        tracing::debug!(
            "Scan page {} returned {} records (more: {})",
            pages,
            page.items.len(),
            page.last_evaluated_key.is_some()
        );
        records.extend(page.items);

        match page.last_evaluated_key {
            Some(next_key) if !next_key.is_empty() => {
                if start_key.as_ref() == Some(&next_key) {
                    return Err(ProductApiError::store(
                        "Scan",
                        "store returned the same continuation key twice",
                    ));
                }
                start_key = Some(next_key);
            }
            _ => break,
        }
    }

    tracing::debug!("Scan finished: {} records in {} pages", records.len(), pages);
    Ok(records)
}
