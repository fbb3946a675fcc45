//! Loading-indicator wrapper around awaited service calls.
//!
//! Wrapped calls hold the app store's loading flag for exactly the awaited
//! interval. Release happens through a guard so the flag drops on every
//! exit path — fulfillment, rejection, and unwind alike.

use futures::future::{join_all, BoxFuture};

use super::app::AppStore;

struct LoadingGuard<'a> {
    app: &'a AppStore,
}

impl<'a> LoadingGuard<'a> {
    fn begin(app: &'a AppStore) -> Self {
        app.begin_loading();
        Self { app }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.app.end_loading();
    }
}

/// Await one call under the loading flag.
pub async fn with_spinner<T, E>(
    app: &AppStore,
    fut: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let _guard = LoadingGuard::begin(app);
    fut.await
}

/// Await several calls concurrently under one flag hold.
///
/// Resolves with the last-listed call's result; any failure rejects the
/// whole wrapper (first failure in list order) after the flag is released.
/// An empty list resolves to `Ok(None)`.
pub async fn with_spinner_all<T, E>(
    app: &AppStore,
    futures: Vec<BoxFuture<'_, Result<T, E>>>,
) -> Result<Option<T>, E> {
    let _guard = LoadingGuard::begin(app);
    let mut last = None;
    for result in join_all(futures).await {
        last = Some(result?);
    }
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::Arc;

    #[tokio::test]
    async fn flag_is_true_during_and_false_after_fulfillment() {
        let app = Arc::new(AppStore::new());

        assert!(!app.loading());
        let result: Result<u32, ()> = with_spinner(&app, {
            let app = Arc::clone(&app);
            async move {
                assert!(app.loading(), "flag must be up while awaited");
                Ok(7)
            }
        })
        .await;

        assert_eq!(result, Ok(7));
        assert!(!app.loading());
    }

    #[tokio::test]
    async fn flag_is_released_on_rejection() {
        let app = AppStore::new();

        let result: Result<(), &str> = with_spinner(&app, async { Err("boom") }).await;

        assert_eq!(result, Err("boom"));
        assert!(!app.loading());
    }

    #[tokio::test]
    async fn overlapping_calls_do_not_mask_each_other() {
        let app = Arc::new(AppStore::new());
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();

        let slow = tokio::spawn({
            let app = Arc::clone(&app);
            async move {
                let _: Result<(), ()> = with_spinner(&app, async {
                    release_rx.await.ok();
                    Ok(())
                })
                .await;
            }
        });

        // Wait until the slow call holds the flag.
        let mut rx = app.subscribe_loading();
        while !*rx.borrow_and_update() {
            rx.changed().await.unwrap();
        }

        // A fast call completes while the slow one is still outstanding.
        let _: Result<u8, ()> = with_spinner(&app, async { Ok(1) }).await;
        assert!(app.loading(), "slow call must still own the flag");

        release_tx.send(()).unwrap();
        slow.await.unwrap();
        assert!(!app.loading());
    }

    #[tokio::test]
    async fn sequence_resolves_with_last_listed_result() {
        let app = AppStore::new();

        let futures: Vec<BoxFuture<'_, Result<u32, ()>>> = vec![
            async { Ok(1) }.boxed(),
            async { Ok(2) }.boxed(),
            async { Ok(3) }.boxed(),
        ];
        let result = with_spinner_all(&app, futures).await;

        assert_eq!(result, Ok(Some(3)));
        assert!(!app.loading());
    }

    #[tokio::test]
    async fn sequence_rejects_when_any_member_fails() {
        let app = AppStore::new();

        let futures: Vec<BoxFuture<'_, Result<u32, &str>>> = vec![
            async { Ok(1) }.boxed(),
            async { Err("middle failed") }.boxed(),
            async { Ok(3) }.boxed(),
        ];
        let result = with_spinner_all(&app, futures).await;

        assert_eq!(result, Err("middle failed"));
        assert!(!app.loading());
    }

    #[tokio::test]
    async fn empty_sequence_resolves_to_none() {
        let app = AppStore::new();
        let result: Result<Option<u32>, ()> = with_spinner_all(&app, vec![]).await;
        assert_eq!(result, Ok(None));
        assert!(!app.loading());
    }
}
