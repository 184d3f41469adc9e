use std::fmt;
use std::str::FromStr;

/// How [`AddVehicle`](crate::AddVehicle) treats a failed notification after
/// the vehicle has been stored.
///
/// The stored row is never rolled back; the policy only decides what the
/// caller sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationPolicy {
    /// Log the delivery error and still report success.
    #[default]
    BestEffort,
    /// Report the delivery error to the caller.
    Required,
}

impl NotificationPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BestEffort => "best_effort",
            Self::Required => "required",
        }
    }
}

impl fmt::Display for NotificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best_effort" | "best-effort" => Ok(Self::BestEffort),
            "required" => Ok(Self::Required),
            other => Err(format!(
                "Unknown notification policy '{other}', expected 'best_effort' or 'required'"
            )),
        }
    }
}
