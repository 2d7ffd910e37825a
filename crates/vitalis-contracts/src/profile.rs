//! User identity and safety data.

use serde::{Deserialize, Serialize};

/// The person to call when the user cannot speak for themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    /// Free-form phone number, e.g. "+1 (555) 123-4567".
    pub phone: String,
    /// Relation label, e.g. "Daughter".
    pub relation: String,
}

/// Allergy names with set semantics that keep first-seen order for display.
///
/// Duplicates are dropped both on construction and on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AllergyList(Vec<String>);

impl AllergyList {
    /// Build a list from any sequence of names, dropping repeats.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for name in names {
            list.insert(name);
        }
        list
    }

    /// Add a name unless it is already present. Returns true if it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|a| a == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for AllergyList {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<AllergyList> for Vec<String> {
    fn from(list: AllergyList) -> Self {
        list.0
    }
}

/// Identity and safety data for the single user of the store.
///
/// The store never edits the profile; it is replaced wholesale only through
/// the persistence service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    /// Blood type code, e.g. "O+".
    pub blood_type: String,
    pub allergies: AllergyList,
    pub emergency_contact: EmergencyContact,
}

impl UserProfile {
    /// First word of the name, used for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}
