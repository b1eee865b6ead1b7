use crate::core::errors::{Error, Result};
use crate::core::source::Source;
use serde::{Deserialize, Serialize};

/*-------------------------------------------------------------------------------------------------
  Build Deny Policy
-------------------------------------------------------------------------------------------------*/

/// Build and serialize a deny policy for `cidrs` using the default (GitHub Actions) template.
///
/// See [PolicyTemplate::build_deny_policy].
pub fn build_deny_policy<S: AsRef<str>>(cidrs: &[S]) -> Result<Vec<u8>> {
    PolicyTemplate::default().build_deny_policy(cidrs)
}

/*-------------------------------------------------------------------------------------------------
  Policy Template
-------------------------------------------------------------------------------------------------*/

/// The fixed parts of a generated policy. The CIDR list is the only variable input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyTemplate {
    /// Policy language version (`2012-10-17`).
    pub version: String,

    /// Policy `Id`.
    pub id: String,

    /// Statement `Sid`.
    pub sid: String,

    /// Statement `Principal`.
    pub principal: String,

    /// Statement `Action`.
    pub action: String,

    /// Statement `Resource`.
    pub resource: String,
}

impl Default for PolicyTemplate {
    fn default() -> Self {
        Source::default().policy_template()
    }
}

impl PolicyTemplate {
    /// Build a policy with a single statement that denies the configured action to any
    /// request whose source IP is not in `cidrs`.
    ///
    /// An empty `cidrs` list is accepted and yields an empty `aws:SourceIp` set. The entries
    /// are not validated here.
    pub fn deny_policy<S: AsRef<str>>(&self, cidrs: &[S]) -> Policy {
        Policy {
            version: self.version.clone(),
            id: self.id.clone(),
            statement: vec![Statement {
                sid: self.sid.clone(),
                effect: Effect::Deny,
                principal: self.principal.clone(),
                action: self.action.clone(),
                resource: self.resource.clone(),
                condition: Condition {
                    not_ip_address: NotIpAddress {
                        source_ips: cidrs.iter().map(|cidr| cidr.as_ref().to_string()).collect(),
                    },
                },
            }],
        }
    }

    /// Serialize [PolicyTemplate::deny_policy] in field declaration order, without whitespace.
    pub fn build_deny_policy<S: AsRef<str>>(&self, cidrs: &[S]) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.deny_policy(cidrs)).map_err(Error::Serialization)
    }
}

/*-------------------------------------------------------------------------------------------------
  Policy Document
-------------------------------------------------------------------------------------------------*/

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Policy {
    pub version: String,
    pub id: String,
    pub statement: Vec<Statement>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub sid: String,
    pub effect: Effect,
    pub principal: String,
    pub action: String,
    pub resource: String,
    pub condition: Condition,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Effect {
    Deny,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Condition {
    pub not_ip_address: NotIpAddress,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NotIpAddress {
    #[serde(rename = "aws:SourceIp")]
    pub source_ips: Vec<String>,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
