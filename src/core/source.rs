use crate::core::policy::PolicyTemplate;
use std::fmt;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Source Providers
-------------------------------------------------------------------------------------------------*/

/// Provider publishing the IP-range metadata.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Source {
    /// GitHub meta API; the `actions` key lists the GitHub Actions runner ranges.
    #[default]
    GitHub,
}

impl Source {
    pub fn name(&self) -> &'static str {
        match self {
            Source::GitHub => "github",
        }
    }

    /// URL of the provider's metadata document.
    pub fn url(&self) -> &'static str {
        match self {
            Source::GitHub => "https://api.github.com/meta",
        }
    }

    /// Metadata key holding the service's CIDR list.
    pub fn service_key(&self) -> &'static str {
        match self {
            Source::GitHub => "actions",
        }
    }

    pub fn policy_template(&self) -> PolicyTemplate {
        match self {
            Source::GitHub => PolicyTemplate {
                version: "2012-10-17".to_string(),
                id: "GitHubActionsDenyPolicy".to_string(),
                sid: "DenyNonGitHubActionsIPs".to_string(),
                principal: "*".to_string(),
                action: "ecr:*".to_string(),
                resource: "*".to_string(),
            },
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(Source::GitHub),
            _ => Err(format!("unsupported source provider: {s:?}")),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
