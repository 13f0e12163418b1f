use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::student::Student;

/// The whole persisted roster. It is read and written as one unit; sibling
/// top-level fields are kept verbatim and in their original order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RosterDocument {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RosterDocument {
    pub fn new(students: Vec<Student>) -> Self {
        Self {
            students,
            extra: Map::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == Some(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id() == Some(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Removes the first student whose id matches exactly
    pub fn remove(&mut self, id: &str) -> Option<Student> {
        let index = self.students.iter().position(|s| s.id() == Some(id))?;
        Some(self.students.remove(index))
    }
}
