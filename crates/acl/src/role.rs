//! Organizational roles.

use crate::tag::tags;

tags! {
    /// A user's organizational function. Exactly one is active per session.
    pub enum Role("role") {
        SystemAdmin => "system_admin", "System administrator";
        Admin => "admin", "Administrator";
        ExpertManager => "expert_manager", "Expert manager";
        Expert => "expert", "Expert";
        AccountantManager => "accountant_manager", "Chief accountant";
        Accountant => "accountant", "Accountant";
        Secretary => "secretary", "Secretary";
        InsurerAdmin => "insurer_admin", "Insurer administrator";
        InsurerUser => "insurer_user", "Insurer user";
        RepairerAdmin => "repairer_admin", "Repairer administrator";
        RepairerUser => "repairer_user", "Repairer user";
        /// Authenticated, but no function assigned yet.
        Unassigned => "unassigned", "Unassigned";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_tag_matches_serde_form() {
        for role in Role::ALL {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert!(matches!(err, Error::UnknownTag { kind: "role", .. }));
        assert_eq!(err.to_string(), "unknown role: 'superuser'");
    }

    #[test]
    fn test_display_uses_tag() {
        assert_eq!(Role::InsurerAdmin.to_string(), "insurer_admin");
        assert_eq!(Role::InsurerAdmin.label(), "Insurer administrator");
    }
}
