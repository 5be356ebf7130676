//! Dashboard aggregates. Recomputed on every request.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::{count_documents, count_documents_by_status, recent_documents, DatabaseError};
use crate::models::enums::DocumentStatus;
use crate::models::Document;

/// Number of documents in the recent-activity list.
pub const RECENT_DOCUMENT_LIMIT: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_documents: u64,
    pub in_progress: u64,
    pub completed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_documents: Vec<Document>,
}

pub fn fetch_dashboard_stats(conn: &Connection) -> Result<DashboardStats, DatabaseError> {
    Ok(DashboardStats {
        total_documents: count_documents(conn)?,
        in_progress: count_documents_by_status(conn, DocumentStatus::InProgress)?,
        completed: count_documents_by_status(conn, DocumentStatus::Completed)?,
    })
}

pub fn fetch_dashboard(conn: &Connection) -> Result<Dashboard, DatabaseError> {
    Ok(Dashboard {
        stats: fetch_dashboard_stats(conn)?,
        recent_documents: recent_documents(conn, RECENT_DOCUMENT_LIMIT)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DocumentStore, SqliteDocumentStore};
    use crate::test_support::input;

    #[test]
    fn counts_by_status() {
        let store = SqliteDocumentStore::open_in_memory().unwrap();
        let mut n = 0;
        for (status, count) in [
            (DocumentStatus::Received, 3),
            (DocumentStatus::InProgress, 5),
            (DocumentStatus::Completed, 7),
        ] {
            for _ in 0..count {
                store
                    .create(&input(&format!("DOC-{n:04}"), "Sender", status))
                    .unwrap();
                n += 1;
            }
        }

        let dashboard = store.dashboard().unwrap();
        assert_eq!(
            dashboard.stats,
            DashboardStats { total_documents: 15, in_progress: 5, completed: 7 }
        );
    }

    #[test]
    fn rejected_counts_only_toward_total() {
        let store = SqliteDocumentStore::open_in_memory().unwrap();
        store
            .create(&input("DOC-1", "Sender", DocumentStatus::Rejected))
            .unwrap();
        let dashboard = store.dashboard().unwrap();
        assert_eq!(dashboard.stats.total_documents, 1);
        assert_eq!(dashboard.stats.in_progress, 0);
        assert_eq!(dashboard.stats.completed, 0);
    }

    #[test]
    fn recent_documents_are_five_newest() {
        let store = SqliteDocumentStore::open_in_memory().unwrap();
        for i in 0..8 {
            store
                .create(&input(&format!("DOC-{i}"), "Sender", DocumentStatus::Received))
                .unwrap();
        }
        let dashboard = store.dashboard().unwrap();
        let numbers: Vec<_> = dashboard
            .recent_documents
            .iter()
            .map(|d| d.register_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["DOC-7", "DOC-6", "DOC-5", "DOC-4", "DOC-3"]);
    }

    #[test]
    fn empty_store_has_zero_stats() {
        let store = SqliteDocumentStore::open_in_memory().unwrap();
        let dashboard = store.dashboard().unwrap();
        assert_eq!(dashboard.stats.total_documents, 0);
        assert!(dashboard.recent_documents.is_empty());
    }
}
