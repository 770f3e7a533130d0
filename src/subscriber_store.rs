use async_trait::async_trait;

use crate::{
    domain::{Subscriber, SubscriberStatus},
    DbPool,
};

/// Read access to newsletter subscribers.
///
/// Rows come back as stored; addressing them is left to the dispatcher.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn active_subscribers(&self) -> anyhow::Result<Vec<Subscriber>>;
}

#[derive(Clone, Debug)]
pub struct PgSubscriberStore {
    pool: DbPool,
}

impl PgSubscriberStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberStore for PgSubscriberStore {
    #[tracing::instrument(name = "Get active subscribers", skip_all)]
    async fn active_subscribers(&self) -> anyhow::Result<Vec<Subscriber>> {
        let subscribers = sqlx::query_as::<_, Subscriber>(
            r#"
            select email, name from newsletter_subscribers
            where status = $1;
            "#,
        )
        .bind(SubscriberStatus::Active.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(subscribers)
    }
}
