use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client as DynamoClient};
#[cfg(test)]
use mockall::automock;
use std::collections::HashMap;

pub type Item = HashMap<String, AttributeValue>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItemWriter: Send + Sync {
    /// Upserts one item; an existing item with the same key is replaced.
    async fn put_item(&self, item: Item) -> Result<()>;
}

pub struct DynamoTable {
    client: DynamoClient,
    table_name: String,
}

impl DynamoTable {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl ItemWriter for DynamoTable {
    async fn put_item(&self, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .with_context(|| format!("failed to put item into {}", self.table_name))?;

        Ok(())
    }
}
