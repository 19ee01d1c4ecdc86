use std::fmt;
use std::str::FromStr;

use crate::error::WilmaError;

/// The fixed set of schedule resources Wilma can list. Anything outside this
/// set is rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Rooms,
    Teachers,
    Students,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Rooms => "rooms",
            ResourceType::Teachers => "teachers",
            ResourceType::Students => "students",
        }
    }
}

impl FromStr for ResourceType {
    type Err = WilmaError;

    fn from_str(s: &str) -> Result<ResourceType, WilmaError> {
        match s {
            "rooms" => Ok(ResourceType::Rooms),
            "teachers" => Ok(ResourceType::Teachers),
            "students" => Ok(ResourceType::Students),
            other => Err(WilmaError::InvalidResourceType(other.to_owned())),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_three_known_types() {
        assert_eq!("rooms".parse::<ResourceType>().unwrap(), ResourceType::Rooms);
        assert_eq!(
            "teachers".parse::<ResourceType>().unwrap(),
            ResourceType::Teachers
        );
        assert_eq!(
            "students".parse::<ResourceType>().unwrap(),
            ResourceType::Students
        );
    }

    #[test]
    fn rejects_anything_else() {
        for bad in ["classes", "Rooms", "ROOMS", "", "rooms "] {
            assert!(matches!(
                bad.parse::<ResourceType>(),
                Err(WilmaError::InvalidResourceType(_))
            ));
        }
    }
}
