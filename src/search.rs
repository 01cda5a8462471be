use std::sync::Arc;
use tokio::sync::mpsc;

use crate::api::{ApiClient, NavLookupError};
use crate::classify::{classify, Classified};
use crate::models::{NavTaxpayerResponse, PublicCompany};

/// Completion of one slice of a search. The NAV and database slices resolve
/// independently and in either order.
#[derive(Debug)]
pub enum SliceResult {
    Nav(Result<NavTaxpayerResponse, NavLookupError>),
    Db(Vec<PublicCompany>),
}

/// A slice completion tagged with the search that issued it. The reducer
/// drops updates whose generation is no longer current.
#[derive(Debug)]
pub struct SearchUpdate {
    pub generation: u64,
    pub result: SliceResult,
}

/// What a submit started, used to prime the display state before any
/// response lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submitted {
    pub generation: u64,
    pub nav_issued: bool,
}

/// Issues the dual fetch for each submitted query. In-flight requests from
/// an earlier submit are never cancelled; their updates arrive with a stale
/// generation and die at the reducer.
pub struct Searcher {
    client: Arc<ApiClient>,
    tx: mpsc::UnboundedSender<SearchUpdate>,
    generation: u64,
}

impl Searcher {
    pub fn new(client: Arc<ApiClient>, tx: mpsc::UnboundedSender<SearchUpdate>) -> Self {
        Self {
            client,
            tx,
            generation: 0,
        }
    }

    /// Starts a new search. Returns `None` without touching the network when
    /// the query is too short to classify. The database search always runs;
    /// the NAV lookup only for tax-ID-shaped queries.
    pub fn submit(&mut self, raw: &str) -> Option<Submitted> {
        let classified = classify(raw)?;
        self.generation += 1;
        let generation = self.generation;
        let nav_issued = classified.is_tax_id();
        let Classified { db_query, nav_root } = classified;

        if let Some(root) = nav_root {
            let client = self.client.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let result = client.nav_lookup(&root).await;
                let _ = tx.send(SearchUpdate {
                    generation,
                    result: SliceResult::Nav(result),
                });
            });
        }

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let companies = client.company_search(&db_query).await;
            let _ = tx.send(SearchUpdate {
                generation,
                result: SliceResult::Db(companies),
            });
        });

        Some(Submitted {
            generation,
            nav_issued,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    // Nothing listens on this port; requests fail fast with a transport
    // error, which is enough to observe which slices were issued.
    const DEAD_URL: &str = "http://127.0.0.1:9";

    fn searcher() -> (Searcher, mpsc::UnboundedReceiver<SearchUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Searcher::new(Arc::new(ApiClient::new(DEAD_URL)), tx), rx)
    }

    async fn recv(rx: &mut mpsc::UnboundedReceiver<SearchUpdate>) -> SearchUpdate {
        timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for slice")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_short_query_issues_nothing() {
        let (mut searcher, mut rx) = searcher();
        assert!(searcher.submit("a").is_none());
        // No task was spawned, so nothing can ever arrive.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_name_query_issues_only_db_slice() {
        let (mut searcher, mut rx) = searcher();
        let submitted = searcher.submit("Teszt Kft.").unwrap();
        assert!(!submitted.nav_issued);
        assert_eq!(submitted.generation, 1);

        let update = recv(&mut rx).await;
        assert_eq!(update.generation, 1);
        // Transport failure on the db path degrades to an empty list.
        match update.result {
            SliceResult::Db(companies) => assert!(companies.is_empty()),
            SliceResult::Nav(_) => panic!("no NAV slice expected for a name query"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_tax_id_query_issues_both_slices() {
        let (mut searcher, mut rx) = searcher();
        let submitted = searcher.submit("12345678").unwrap();
        assert!(submitted.nav_issued);

        let mut saw_nav = false;
        let mut saw_db = false;
        for _ in 0..2 {
            match recv(&mut rx).await.result {
                SliceResult::Nav(result) => {
                    assert_eq!(result.unwrap_err(), NavLookupError::Network);
                    saw_nav = true;
                }
                SliceResult::Db(companies) => {
                    assert!(companies.is_empty());
                    saw_db = true;
                }
            }
        }
        assert!(saw_nav && saw_db);
    }

    #[tokio::test]
    async fn test_generation_increments_per_submit() {
        let (mut searcher, _rx) = searcher();
        assert_eq!(searcher.submit("abc").unwrap().generation, 1);
        assert_eq!(searcher.submit("abc").unwrap().generation, 2);
        // A rejected submit does not consume a generation.
        assert!(searcher.submit("x").is_none());
        assert_eq!(searcher.submit("abc").unwrap().generation, 3);
    }
}
