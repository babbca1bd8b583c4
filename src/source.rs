//! Data-source abstraction between the feed and the concrete repository

use crate::{error::ApiError, types::Asset};
use async_trait::async_trait;

/// Supplies pages of normalized market data.
///
/// The live implementation is
/// [`MarketsRepository`](crate::repos::markets::MarketsRepository); tests
/// drive the feed with a mock instead of the network.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches one page of assets ordered by descending market cap.
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<Asset>, ApiError>;

    /// Name of the backing source, for logging.
    fn source_name(&self) -> &'static str;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Mock source replaying a scripted queue of results, one per call.
    ///
    /// An exhausted script answers with a timeout, so a lingering refresh
    /// loop in a test cannot silently overwrite the store.
    pub struct MockSource {
        script: Mutex<VecDeque<Step>>,
        calls: Mutex<u32>,
    }

    struct Step {
        delay: Duration,
        result: Result<Vec<Asset>, ApiError>,
    }

    impl MockSource {
        pub fn new() -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                calls: Mutex::new(0),
            }
        }

        pub fn push_ok(&self, assets: Vec<Asset>) {
            self.push_ok_after(assets, Duration::ZERO);
        }

        /// Queues a successful page that resolves only after `delay`.
        pub fn push_ok_after(&self, assets: Vec<Asset>, delay: Duration) {
            self.script.lock().unwrap().push_back(Step {
                delay,
                result: Ok(assets),
            });
        }

        pub fn push_err(&self, err: ApiError) {
            self.script.lock().unwrap().push_back(Step {
                delay: Duration::ZERO,
                result: Err(err),
            });
        }

        pub fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl MarketDataSource for MockSource {
        async fn fetch_page(&self, _page: u32, _per_page: u32) -> Result<Vec<Asset>, ApiError> {
            *self.calls.lock().unwrap() += 1;
            let step = self.script.lock().unwrap().pop_front();
            match step {
                Some(step) => {
                    if !step.delay.is_zero() {
                        tokio::time::sleep(step.delay).await;
                    }
                    step.result
                }
                None => Err(ApiError::Timeout),
            }
        }

        fn source_name(&self) -> &'static str {
            "mock"
        }
    }
}
