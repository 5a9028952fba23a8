//! Organization classification, orthogonal to roles.

use crate::tag::tags;

tags! {
    /// The kind of organization a user belongs to.
    pub enum EntityType("entity type") {
        MainOrganization => "main_organization", "Main organization";
        Organization => "organization", "Organization";
        Insurer => "insurer", "Insurer";
        Repairer => "repairer", "Repairer";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_type() {
        assert_eq!("insurer".parse::<EntityType>().unwrap(), EntityType::Insurer);
        assert!("garage".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_deserialize_entity_type() {
        let t: EntityType = serde_json::from_str("\"main_organization\"").unwrap();
        assert_eq!(t, EntityType::MainOrganization);
    }
}
