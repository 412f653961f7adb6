//! Access policy configuration.

/// Deployment-level policy knobs for the access decision table.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Whether staff-level members may write tenant jobs and
    /// applications. The default is deny: staff read tenant data and
    /// participate in conversations, but mutations require the admin
    /// level unless a deployment opts in.
    pub staff_write_enabled: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            staff_write_enabled: false,
        }
    }
}
