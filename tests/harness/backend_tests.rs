//! Macro-generated test suite for the `Backend<TestItem>` contract.
//!
//! The `backend_tests!` macro generates a test module that checks any
//! `Backend<TestItem>` implementation: CRUD, ordering, missing records and
//! concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod harness;
//!
//! use harness::*;
//! use stockroom::storage::InMemoryBackend;
//!
//! backend_tests!(InMemoryBackend::<TestItem>::new());
//! ```

/// Generate a `Backend<TestItem>` conformance test suite.
///
/// `$factory` must evaluate to an empty backend. It is re-evaluated for each
/// test. For the concurrent access test the backend must also be
/// `Clone + 'static` (shared state behind an `Arc`).
macro_rules! backend_tests {
    ($factory:expr) => {
        mod backend_contract_tests {
            use super::*;
            use stockroom::core::{Backend, Session};
            use uuid::Uuid;

            fn session() -> Session {
                Session::anonymous()
            }

            // ==================================================================
            // Create & Get
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let backend = $factory;
                let alice = item("Alice");

                let created = backend.create(&session(), alice.clone()).await.unwrap();
                assert_eq!(created, alice);

                let fetched = backend.get(&session(), &alice.id).await.unwrap();
                assert_eq!(fetched, Some(alice));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let backend = $factory;
                let fetched = backend.get(&session(), &Uuid::new_v4()).await.unwrap();
                assert!(fetched.is_none());
            }

            // ==================================================================
            // List
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let backend = $factory;
                assert!(backend.list(&session()).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_keeps_creation_order() {
                let backend = $factory;
                let items = batch(5);
                for i in &items {
                    backend.create(&session(), i.clone()).await.unwrap();
                }

                let listed = backend.list(&session()).await.unwrap();
                assert_eq!(names(&listed), names(&items));
            }

            // ==================================================================
            // Update & Delete
            // ==================================================================

            #[tokio::test]
            async fn test_update_existing() {
                let backend = $factory;
                let original = item("Before");
                backend.create(&session(), original.clone()).await.unwrap();

                let renamed = TestItem {
                    name: "After".to_string(),
                    ..original.clone()
                };
                let updated = backend
                    .update(&session(), &original.id, renamed)
                    .await
                    .unwrap();
                assert_eq!(updated.name, "After");

                let fetched = backend.get(&session(), &original.id).await.unwrap().unwrap();
                assert_eq!(fetched.name, "After");
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let backend = $factory;
                let ghost = item("Ghost");
                assert!(backend.update(&session(), &ghost.id, ghost.clone()).await.is_err());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let backend = $factory;
                let doomed = item("Doomed");
                backend.create(&session(), doomed.clone()).await.unwrap();

                backend.delete(&session(), &doomed.id).await.unwrap();
                assert!(backend.get(&session(), &doomed.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let backend = $factory;
                let err = backend.delete(&session(), &Uuid::new_v4()).await.unwrap_err();
                assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
            }

            // ==================================================================
            // Edge cases
            // ==================================================================

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let backend = $factory;
                let original = item("Original");
                backend.create(&session(), original.clone()).await.unwrap();

                let result = backend.create(&session(), original.clone()).await;
                assert!(result.is_err());
                assert_eq!(backend.list(&session()).await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_concurrent_access() {
                let backend = $factory;
                let mut handles = Vec::new();
                for record in batch(10) {
                    let backend = backend.clone();
                    handles.push(tokio::spawn(async move {
                        backend.create(&Session::anonymous(), record).await
                    }));
                }
                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                assert_eq!(backend.list(&session()).await.unwrap().len(), 10);
            }
        }
    };
}
