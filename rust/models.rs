use serde_json::Value;

pub type RawResponse = Value;

/// Untrusted element of the `homeworks` array; `extract` checks its fields.
pub type HomeworkEntry = Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidResponse {
    /// Most recent first.
    pub homeworks: Vec<HomeworkEntry>,
    pub current_date: Option<i64>,
}

impl ValidResponse {
    pub fn latest(&self) -> Option<&HomeworkEntry> {
        self.homeworks.first()
    }
}
