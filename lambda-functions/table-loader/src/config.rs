use aws_config::{BehaviorVersion, Region, SdkConfig};
use bon::Builder;

pub const DEFAULT_TABLE_NAME: &str = "dynotbl_1";

pub const TABLE_NAME_VAR: &str = "DDB_TABLE_NAME";
pub const REGION_VAR: &str = "AWS_REGION";
pub const ENDPOINT_URL_VAR: &str = "AWS_ENDPOINT_URL";

/// Settings resolved once at cold start and shared by every invocation.
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    #[builder(into, default = DEFAULT_TABLE_NAME.to_string())]
    pub table_name: String,

    #[builder(into)]
    pub region: Option<String>,

    /// Overrides the service endpoints, e.g. for a local emulator.
    #[builder(into)]
    pub endpoint_url: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LoaderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the config through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self::builder()
            .maybe_table_name(var(TABLE_NAME_VAR))
            .maybe_region(var(REGION_VAR))
            .maybe_endpoint_url(var(ENDPOINT_URL_VAR))
            .build()
    }

    pub async fn load_sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader.load().await
    }
}
