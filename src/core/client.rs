use crate::core::errors::{Error, Result};
use crate::core::extract::extract_service_cidrs;
use crate::core::fetch::fetch;
use crate::core::filter::{filter_ipv4, summarize, PrefixSummary};
use crate::core::policy::PolicyTemplate;
use crate::core::reorder::{policy_key_order, reorder_top_level, POLICY_KEY_ORDER};
use crate::core::source::Source;
use log::{info, warn};
use serde_json::{Map, Value};
use std::env;
use std::time::Duration;

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ fetches the GitHub metadata, extracts the IPv4 prefixes listed
/// under `service_key`, and returns the serialized deny policy.
///
/// Configuration values other than the service key are sourced from the environment; see
/// [ClientBuilder::new].
///
/// ```no_run
/// let policy = ipfilter::generate_policy("actions", true).unwrap();
/// println!("{}", String::from_utf8_lossy(&policy));
/// ```
pub fn generate_policy(service_key: &str, minify: bool) -> Result<Vec<u8>> {
    ClientBuilder::new()
        .service_key(service_key)
        .build()
        .generate_policy(minify)
}

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct that allows you to customize the client configuration.
///
/// ```
/// let client = ipfilter::ClientBuilder::new()
///     .url("https://api.github.com/meta")
///     .service_key("actions_macos")
///     .timeout(2000) // 2 seconds
///     .build();
///
/// assert_eq!(client.service_key(), "actions_macos");
/// ```
///
/// The [ClientBuilder::new] method attempts to source configuration values from environment
/// variables when set and uses the source's default values when they are not set.
///
/// If you want to use the default configuration values, ignoring any environment variables, use
/// the [ClientBuilder::default] method to create a new [ClientBuilder] instance.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    source: Source,
    url: String,
    service_key: String,
    timeout: u64,
    template: PolicyTemplate,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    /// Create a new [ClientBuilder] with the default (GitHub) configuration values.
    ///
    /// ```
    /// let client = ipfilter::ClientBuilder::default().build();
    ///
    /// assert_eq!(client.url(), "https://api.github.com/meta");
    /// assert_eq!(client.service_key(), "actions");
    /// assert_eq!(client.timeout(), 10000);
    /// ```
    fn default() -> Self {
        ClientBuilder::for_source(Source::default())
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values when the environment
    /// variables are not set.
    ///
    /// The environment variables used to set the initial configuration values
    /// are:
    /// - `IPFILTER_URL`
    /// - `IPFILTER_SERVICE_KEY`
    /// - `IPFILTER_TIMEOUT`
    pub fn new() -> Self {
        ClientBuilder::from_env(ClientBuilder::default())
    }

    /// Create a new [ClientBuilder] with the defaults for `source`, without reading the
    /// environment.
    pub fn for_source(source: Source) -> Self {
        Self {
            source,
            url: source.url().to_string(),
            service_key: source.service_key().to_string(),
            timeout: 10 * 1000, // 10 seconds
            template: source.policy_template(),
        }
    }

    /// Overlay the `IPFILTER_*` environment variables on `defaults`.
    pub fn from_env(defaults: ClientBuilder) -> Self {
        Self {
            url: get_env_var("IPFILTER_URL", defaults.url),
            service_key: get_env_var("IPFILTER_SERVICE_KEY", defaults.service_key),
            timeout: get_env_var("IPFILTER_TIMEOUT", defaults.timeout),
            ..defaults
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the URL used to retrieve the provider metadata; defaults to the source's URL
    /// (`https://api.github.com/meta`).
    pub fn url(&mut self, url: &str) -> &mut Self {
        self.url = url.to_string();
        self
    }

    /// Set the metadata key holding the service's CIDR list; defaults to `actions`.
    pub fn service_key(&mut self, service_key: &str) -> &mut Self {
        self.service_key = service_key.to_string();
        self
    }

    /// Set the maximum time (in milliseconds) to wait for the metadata request to complete;
    /// defaults to `10000` milliseconds (10 seconds).
    pub fn timeout(&mut self, timeout: u64) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Set the template used to build the policy; defaults to the source's template.
    pub fn template(&mut self, template: PolicyTemplate) -> &mut Self {
        self.template = template;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Client {
        Client {
            source: self.source,
            url: self.url.clone(),
            service_key: self.service_key.clone(),
            timeout: self.timeout,
            template: self.template.clone(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// A client that fetches the provider metadata and renders the deny policy.
///
/// ```no_run
/// let client = ipfilter::Client::new();
/// let policy = client.generate_policy(false).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    source: Source,
    url: String,
    service_key: String,
    timeout: u64,
    template: PolicyTemplate,
}

/// The rendered policy document along with counts of the prefixes it was built from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedPolicy {
    pub document: Vec<u8>,
    pub summary: PrefixSummary,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Default for Client {
    fn default() -> Self {
        ClientBuilder::default().build()
    }
}

impl Client {
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn service_key(&self) -> &str {
        &self.service_key
    }

    /// Request timeout in milliseconds.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn template(&self) -> &PolicyTemplate {
        &self.template
    }

    /*-------------------------------------------------------------------------
      Generate Policy
    -------------------------------------------------------------------------*/

    /// Fetch the metadata and return the serialized policy document.
    pub fn generate_policy(&self, minify: bool) -> Result<Vec<u8>> {
        self.generate(minify).map(|generated| generated.document)
    }

    /// Fetch the metadata and render it; see [Client::render].
    pub fn generate(&self, minify: bool) -> Result<GeneratedPolicy> {
        info!("Fetching {} metadata from {}", self.source, self.url);
        let raw_metadata = fetch(&self.url, Duration::from_millis(self.timeout))?;
        self.render(&raw_metadata, minify)
    }

    /// Extract the service's CIDRs from `raw_metadata`, keep the IPv4 prefixes, and serialize
    /// the deny policy with its top-level keys in `Version`, `Id`, `Statement` order.
    pub fn render(&self, raw_metadata: &[u8], minify: bool) -> Result<GeneratedPolicy> {
        let cidrs = extract_service_cidrs(raw_metadata, &self.service_key)?;

        let summary = summarize(&cidrs);
        let ipv4_cidrs = filter_ipv4(&cidrs);
        info!(
            "Kept {} IPv4 prefix(es); dropped {} IPv6 and {} invalid",
            summary.ipv4, summary.ipv6, summary.invalid
        );

        let policy = self.template.build_deny_policy(&ipv4_cidrs)?;

        let decoded: Map<String, Value> =
            serde_json::from_slice(&policy).map_err(Error::Serialization)?;
        let pairs = policy_key_order(decoded, &POLICY_KEY_ORDER)?;
        let document = reorder_top_level(&pairs, minify)?;

        Ok(GeneratedPolicy { document, summary })
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{log_error, ErrorKind};
    use crate::core::extract::tests::test_github_meta_json;
    use crate::core::policy::Policy;
    use test_log::test;

    const PRETTY_POLICY: &str = r#"{
  "Version": "2012-10-17",
  "Id": "GitHubActionsDenyPolicy",
  "Statement": [
    {
      "Sid": "DenyNonGitHubActionsIPs",
      "Effect": "Deny",
      "Principal": "*",
      "Action": "ecr:*",
      "Resource": "*",
      "Condition": {
        "NotIpAddress": {
          "aws:SourceIp": [
            "4.148.0.0/16",
            "4.149.0.0/18"
          ]
        }
      }
    }
  ]
}"#;

    const MINIFIED_POLICY: &str = r#"{"Version":"2012-10-17","Id":"GitHubActionsDenyPolicy","Statement":[{"Sid":"DenyNonGitHubActionsIPs","Effect":"Deny","Principal":"*","Action":"ecr:*","Resource":"*","Condition":{"NotIpAddress":{"aws:SourceIp":["4.148.0.0/16","4.149.0.0/18"]}}}]}"#;

    fn test_client(url: &str) -> Client {
        ClientBuilder::default().url(url).timeout(5000).build()
    }

    /*-------------------------------------------------------------------------
      Test Getter and Setter Methods
    -------------------------------------------------------------------------*/

    #[test]
    fn test_getter_and_setter_methods() {
        let template = PolicyTemplate {
            action: "s3:*".to_string(),
            ..PolicyTemplate::default()
        };
        let client = ClientBuilder::default()
            .url("https://my-meta.example.com/meta")
            .service_key("actions_macos")
            .timeout(1000)
            .template(template.clone())
            .build();

        assert_eq!(client.source(), Source::GitHub);
        assert_eq!(client.url(), "https://my-meta.example.com/meta");
        assert_eq!(client.service_key(), "actions_macos");
        assert_eq!(client.timeout(), 1000);
        assert_eq!(client.template(), &template);
    }

    /*-------------------------------------------------------------------------
      Test Environment Variable Configuration
    -------------------------------------------------------------------------*/

    /// ENV_VAR: IPFILTER_URL
    /// ENV_VAR: IPFILTER_SERVICE_KEY
    /// ENV_VAR: IPFILTER_TIMEOUT
    #[test]
    fn test_environment_variable_configuration() {
        let test_env_vars = [
            ("IPFILTER_URL", "https://my-meta.example.com/meta"),
            ("IPFILTER_SERVICE_KEY", "codespaces"),
            ("IPFILTER_TIMEOUT", "not-a-number"),
        ];

        // Store environment variable values
        let stored_env_vars: Vec<(&str, Option<String>)> = test_env_vars
            .iter()
            .map(|(env_var, _)| (*env_var, env::var(env_var).ok()))
            .collect();

        for (env_var, value) in test_env_vars.iter() {
            unsafe { env::set_var(env_var, value) };
        }

        let default = Client::default();
        let env_config = Client::new();
        assert_eq!(env_config.url(), "https://my-meta.example.com/meta");
        assert_eq!(env_config.service_key(), "codespaces");
        // Invalid values fall back to the default
        assert_eq!(env_config.timeout(), default.timeout());

        // Reset environment variables
        for (env_var, value) in stored_env_vars {
            match value {
                Some(value) => unsafe { env::set_var(env_var, value) },
                None => unsafe { env::remove_var(env_var) },
            }
        }
    }

    /*-------------------------------------------------------------------------
      Test Rendering
    -------------------------------------------------------------------------*/

    #[test]
    fn test_render_drops_ipv6_prefixes() {
        let metadata = br#"{"actions": ["4.148.0.0/16","4.149.0.0/18","2a01:111:f403:d91b::/64"]}"#;
        let generated = Client::default().render(metadata, true).unwrap();

        let policy: Policy = serde_json::from_slice(&generated.document).unwrap();
        assert_eq!(
            policy.statement[0].condition.not_ip_address.source_ips,
            vec!["4.148.0.0/16", "4.149.0.0/18"]
        );
        assert_eq!(
            generated.summary,
            PrefixSummary {
                total: 3,
                ipv4: 2,
                ipv6: 1,
                invalid: 0,
            }
        );
    }

    #[test]
    fn test_render_minified() {
        let generated = Client::default()
            .render(test_github_meta_json().as_bytes(), true)
            .unwrap();
        let document = String::from_utf8(generated.document).unwrap();

        assert_eq!(document, MINIFIED_POLICY);
        assert!(!document.contains('\n'));
        assert!(!document.contains(": "));
        assert!(!document.contains(", "));
    }

    #[test]
    fn test_render_pretty() {
        let generated = Client::default()
            .render(test_github_meta_json().as_bytes(), false)
            .unwrap();
        assert_eq!(String::from_utf8(generated.document).unwrap(), PRETTY_POLICY);
    }

    #[test]
    fn test_render_pretty_and_minified_have_same_content() {
        let client = Client::default();
        let metadata = test_github_meta_json().as_bytes();
        let pretty: Value =
            serde_json::from_slice(&client.render(metadata, false).unwrap().document).unwrap();
        let minified: Value =
            serde_json::from_slice(&client.render(metadata, true).unwrap().document).unwrap();
        assert_eq!(pretty, minified);
    }

    #[test]
    fn test_render_missing_service_key() {
        let error = Client::default()
            .render(br#"{"web": ["192.30.252.0/22"]}"#, true)
            .unwrap_err();
        assert!(matches!(error, Error::MissingServiceKey(key) if key == "actions"));
    }

    #[test]
    fn test_render_with_configured_service_key() {
        let client = ClientBuilder::default().service_key("actions_macos").build();
        let generated = client
            .render(test_github_meta_json().as_bytes(), true)
            .unwrap();
        let policy: Policy = serde_json::from_slice(&generated.document).unwrap();
        assert_eq!(
            policy.statement[0].condition.not_ip_address.source_ips,
            vec!["13.105.117.0/24", "13.105.220.0/25"]
        );
    }

    /*-------------------------------------------------------------------------
      Test Generate Policy
    -------------------------------------------------------------------------*/

    #[test]
    fn test_generate_policy() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/meta")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(test_github_meta_json())
            .create();

        let client = test_client(&format!("{}/meta", server.url()));
        let policy = client.generate_policy(true).inspect_err(log_error).unwrap();

        mock.assert();
        assert_eq!(String::from_utf8(policy).unwrap(), MINIFIED_POLICY);
    }

    #[test]
    fn test_generate_policy_transport_error_short_circuits() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/meta")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create();

        let client = test_client(&format!("{}/meta", server.url()));
        let error = client.generate_policy(false).unwrap_err();

        mock.assert();
        assert_eq!(error.kind(), ErrorKind::Transport);
        assert!(matches!(error, Error::Status { status, .. } if status.as_u16() == 502));
    }

    #[test]
    fn test_generate_policy_parse_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/meta")
            .with_status(200)
            .with_body("{not json")
            .create();

        let client = test_client(&format!("{}/meta", server.url()));
        let error = client.generate(true).unwrap_err();

        mock.assert();
        assert!(matches!(error, Error::InvalidJson(_)));
    }
}
