//! Named role groupings used to gate whole areas of the UI.
//!
//! Every derived predicate is "the current role is any of these roles".
//! The groupings live in one table so a name and its definition cannot
//! drift apart.

use crate::Role;
use crate::tag::tags;

tags! {
    /// A named combination of roles.
    pub enum DerivedPredicate("derived predicate") {
        IsSystemAdmin => "is_system_admin", "System administrator";
        IsAdmin => "is_admin", "Any administrator";
        IsManagerRole => "is_manager_role", "Management role";
        IsExpertRole => "is_expert_role", "Expertise role";
        IsFinancialRole => "is_financial_role", "Accounting role";
        IsInsurerRole => "is_insurer_role", "Insurer staff";
        IsRepairerRole => "is_repairer_role", "Repairer staff";
        IsExternalRole => "is_external_role", "Staff of an external organization";
        IsReadOnlyRole => "is_read_only_role", "Read-only role";
    }
}

impl DerivedPredicate {
    /// The roles that satisfy this predicate.
    pub fn roles(self) -> &'static [Role] {
        use Role::*;

        match self {
            DerivedPredicate::IsSystemAdmin => &[SystemAdmin],
            DerivedPredicate::IsAdmin => &[SystemAdmin, Admin],
            DerivedPredicate::IsManagerRole => {
                &[SystemAdmin, Admin, ExpertManager, AccountantManager]
            }
            DerivedPredicate::IsExpertRole => &[ExpertManager, Expert],
            DerivedPredicate::IsFinancialRole => &[AccountantManager, Accountant],
            DerivedPredicate::IsInsurerRole => &[InsurerAdmin, InsurerUser],
            DerivedPredicate::IsRepairerRole => &[RepairerAdmin, RepairerUser],
            DerivedPredicate::IsExternalRole => {
                &[InsurerAdmin, InsurerUser, RepairerAdmin, RepairerUser]
            }
            DerivedPredicate::IsReadOnlyRole => &[InsurerUser, RepairerUser, Unassigned],
        }
    }

    /// Evaluate against a role, if any.
    pub fn matches(self, role: Option<Role>) -> bool {
        role.is_some_and(|r| self.roles().contains(&r))
    }
}
