use serde::{Deserialize, Serialize};
use serde_json::{json, Number, Value};

/// One roster entry, kept exactly as stored.
///
/// Entries are not validated on load: a sparse or float-rated member must not
/// stop the rest of the roster from being read, and a rewrite of the document
/// must reproduce every entry unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Student(Value);

/// The client-facing view of a student: identifier plus the three ratings.
/// A rating the stored entry does not carry as a number is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: String,
    pub rapid: Option<Number>,
    pub blitz: Option<Number>,
    pub bullet: Option<Number>,
}

impl Student {
    pub fn new(id: impl Into<String>, rapid: i64, blitz: i64, bullet: i64) -> Self {
        Self(json!({
            "id": id.into(),
            "rapid": rapid,
            "blitz": blitz,
            "bullet": bullet,
        }))
    }

    /// The entry's `id`, when it is a string
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn rating(&self, format: GameFormat) -> Option<&Number> {
        match self.0.get(format.field()) {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Overwrite one rating; no-op on entries that are not JSON objects
    pub fn set_rating(&mut self, format: GameFormat, value: i64) {
        if let Value::Object(fields) = &mut self.0 {
            fields.insert(format.field().to_string(), Value::from(value));
        }
    }

    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            id: self.id().unwrap_or_default().to_string(),
            rapid: self.rating(GameFormat::Rapid).cloned(),
            blitz: self.rating(GameFormat::Blitz).cloned(),
            bullet: self.rating(GameFormat::Bullet).cloned(),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Student {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        student.summary()
    }
}

/// Game formats a student is rated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameFormat {
    #[default]
    Rapid,
    Blitz,
    Bullet,
}

impl GameFormat {
    /// Name of the rating field in a stored entry
    pub fn field(self) -> &'static str {
        match self {
            GameFormat::Rapid => "rapid",
            GameFormat::Blitz => "blitz",
            GameFormat::Bullet => "bullet",
        }
    }
}

impl std::fmt::Display for GameFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field())
    }
}

/// Payload for creating a student
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub id: Option<String>,
    pub rapid: Option<i64>,
    pub blitz: Option<i64>,
    pub bullet: Option<i64>,
}

/// Partial rating update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingsUpdate {
    pub rapid: Option<i64>,
    pub blitz: Option<i64>,
    pub bullet: Option<i64>,
}

impl RatingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.rapid.is_none() && self.blitz.is_none() && self.bullet.is_none()
    }

    fn changes(&self) -> [(GameFormat, Option<i64>); 3] {
        [
            (GameFormat::Rapid, self.rapid),
            (GameFormat::Blitz, self.blitz),
            (GameFormat::Bullet, self.bullet),
        ]
    }

    /// Ratings present in the update
    pub fn values(&self) -> Vec<i64> {
        self.changes().into_iter().filter_map(|(_, v)| v).collect()
    }

    pub fn apply(&self, student: &mut Student) {
        for (format, value) in self.changes() {
            if let Some(value) = value {
                student.set_rating(format, value);
            }
        }
    }
}

/// A student's position in a ranking listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub student: StudentSummary,
}
