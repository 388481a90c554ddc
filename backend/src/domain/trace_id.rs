//! Correlation id shared by a request's logs, error bodies and store calls.
//!
//! The id lives in a Tokio task-local, so it is visible to anything awaited
//! inside [`TraceId::scope`] but not to tasks spawned from it.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// UUID naming one inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a fresh id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse an id supplied by an upstream proxy when it is a UUID, otherwise
    /// mint one.
    #[must_use]
    pub fn adopt_or_generate(inbound: Option<&str>) -> Self {
        inbound
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current id.
    ///
    /// # Examples
    /// ```
    /// use eduwarn::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let trace_id = TraceId::generate();
    /// let seen = TraceId::scope(trace_id, async { TraceId::current() }).await;
    /// assert_eq!(seen, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn scope_sets_and_clears_the_current_id() {
        let trace_id = TraceId::generate();
        let inside = TraceId::scope(trace_id, async { TraceId::current() }).await;
        assert_eq!(inside, Some(trace_id));
        assert!(TraceId::current().is_none());
    }

    #[rstest]
    fn upstream_uuid_is_reused() {
        let raw = "5f0c2b1e-8a54-4d8e-9a3c-0e6f3c2a1b7d";
        let trace_id = TraceId::adopt_or_generate(Some(raw));
        assert_eq!(trace_id.to_string(), raw);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("req-42"))]
    fn unusable_upstream_ids_are_replaced(#[case] inbound: Option<&str>) {
        let trace_id = TraceId::adopt_or_generate(inbound);
        assert!(Uuid::parse_str(&trace_id.to_string()).is_ok());
        assert_ne!(Some(trace_id.to_string().as_str()), inbound);
    }
}
