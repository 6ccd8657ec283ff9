use crate::client::OrgClient;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

/// Run only the prechecks: authentication and organization accessibility.
/// Both reconcilers do the same thing before touching anything.
pub fn run<C: OrgClient>(client: &C, org: &str) -> Result<CmdResult> {
    client.check_org_access(org)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "organization '{}' is accessible",
        org
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::fixtures::OrgFixture;
    use crate::error::OrgSyncError;

    #[test]
    fn reports_accessible_org() {
        let fixture = OrgFixture::new("acme");
        let result = run(&fixture.client, "acme").unwrap();
        assert!(result.messages[0].content.contains("acme"));
    }

    #[test]
    fn unknown_org_is_fatal() {
        let fixture = OrgFixture::new("acme");
        assert!(matches!(
            run(&fixture.client, "other"),
            Err(OrgSyncError::OrgAccess { .. })
        ));
    }
}
