use serde::{Deserialize, Serialize};

use crate::model::ids::AlumniId;

/// A former student featured on the Alumni page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlumniMember {
    #[serde(rename = "_id")]
    pub id: AlumniId,
    pub name: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub batch: String,
    /// Relative image path.
    #[serde(default)]
    pub image: String,
}

/// A member of the library advisory committee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryMember {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

/// A member of the library staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alumni_deserialize() {
        let json = r#"[{
            "_id": "a1",
            "name": "Priya",
            "designation": "IAS Officer",
            "batch": "2015",
            "image": "/uploads/priya.jpg"
        }]"#;
        let alumni: Vec<AlumniMember> = serde_json::from_str(json).unwrap();
        assert_eq!(alumni.len(), 1);
        assert_eq!(alumni[0].id, AlumniId::new("a1"));
        assert_eq!(alumni[0].batch, "2015");
    }

    #[test]
    fn test_team_member_missing_fields_default() {
        let json = r#"{"name": "Librarian"}"#;
        let member: TeamMember = serde_json::from_str(json).unwrap();
        assert!(member.role.is_empty());
        assert!(member.image.is_empty());
    }
}
