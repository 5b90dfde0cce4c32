//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Resource, ServiceBinding, ServiceInstance, ServiceInstanceJoin, Session};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

impl PrettyPrint for Session {
    fn pretty_print(&self) -> String {
        if !self.is_authenticated() {
            return "Not logged in".to_string();
        }

        let api = or_dash(self.api_url.as_deref());
        let divider = "─".repeat(api.len().max(30));

        [
            format!("API endpoint:   {}", api),
            divider,
            format!(
                "Org:            {} ({})",
                or_dash(self.organization_name.as_deref()),
                or_dash(self.organization_guid.as_deref())
            ),
            format!(
                "Space:          {} ({})",
                or_dash(self.space_name.as_deref()),
                or_dash(self.space_guid.as_deref())
            ),
        ]
        .join("\n")
    }
}

impl PrettyPrint for ServiceInstanceJoin {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.name().len().max(30));

        let mut lines = vec![
            format!("Service Instance: {}", self.name()),
            divider,
            format!("Guid:           {}", self.instance.guid()),
            format!("Service:        {}", self.label()),
            format!("Plan:           {}", self.plan.entity.display_name()),
        ];

        if let Some(ref dashboard) = self.instance.entity.dashboard_url {
            lines.push(format!("Dashboard:      {}", dashboard));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Resource<ServiceInstance> {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.entity.name.len().max(30));

        let mut lines = vec![
            format!("Service Instance: {}", self.entity.name),
            divider,
            format!("Guid:           {}", self.guid()),
        ];

        if let Some(ref space) = self.entity.space_guid {
            lines.push(format!("Space:          {}", space));
        }

        if let Some(ref created) = self.metadata.created_at {
            lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Resource<ServiceBinding> {
    fn pretty_print(&self) -> String {
        [
            format!("Binding:        {}", self.guid()),
            format!("App:            {}", self.entity.app_guid),
            format!("Instance:       {}", self.entity.service_instance_guid),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session() {
        assert_eq!(Session::default().pretty_print(), "Not logged in");
    }

    #[test]
    fn test_session_lines() {
        let session = Session {
            organization_name: Some("acme".to_string()),
            organization_guid: Some("o1".to_string()),
            space_name: Some("dev".to_string()),
            space_guid: None,
            api_url: Some("https://api.example.com".to_string()),
            access_token: Some("tok".to_string()),
        };
        let out = session.pretty_print();
        assert!(out.contains("API endpoint:   https://api.example.com"));
        assert!(out.contains("Org:            acme (o1)"));
        assert!(out.contains("Space:          dev (-)"));
        assert!(!out.contains("tok"));
    }

    #[test]
    fn test_binding_lines() {
        let binding: Resource<ServiceBinding> = serde_json::from_value(serde_json::json!({
            "metadata": {"guid": "b1", "url": "/v2/service_bindings/b1"},
            "entity": {"app_guid": "a1", "service_instance_guid": "i1"}
        }))
        .unwrap();
        let out = binding.pretty_print();
        assert!(out.contains("Binding:        b1"));
        assert!(out.contains("Instance:       i1"));
    }
}
