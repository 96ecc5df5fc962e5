//! Enumerations used to classify and filter tasks.
//!
//! Status is a closed set. Both front-ends parse user input into these types at
//! their boundary, so the task operations never see an unknown status string.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task completion status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    #[value(name = "not_done")]
    NotDone,
    #[value(name = "in_progress")]
    InProgress,
    #[value(name = "done")]
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotDone, Status::InProgress, Status::Done];

    /// Wire name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::NotDone => "not_done",
            Status::InProgress => "in_progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| {
                format!("Invalid status '{s}'. Use 'done', 'not_done', or 'in_progress'")
            })
    }
}

/// Filter accepted by `list`: either every task or a single status.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    #[value(name = "all")]
    All,
    #[value(name = "done")]
    Done,
    #[value(name = "not_done")]
    NotDone,
    #[value(name = "in_progress")]
    InProgress,
}

impl StatusFilter {
    /// Whether a task with `status` passes this filter.
    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Done => status == Status::Done,
            StatusFilter::NotDone => status == Status::NotDone,
            StatusFilter::InProgress => status == Status::InProgress,
        }
    }
}

impl From<Status> for StatusFilter {
    fn from(s: Status) -> Self {
        match s {
            Status::NotDone => StatusFilter::NotDone,
            Status::InProgress => StatusFilter::InProgress,
            Status::Done => StatusFilter::Done,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        s.parse::<Status>().map(StatusFilter::from).map_err(|_| {
            format!("Invalid filter '{s}'. Use 'all', 'done', 'not_done', or 'in_progress'")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("not_done", Status::NotDone)]
    #[case("in_progress", Status::InProgress)]
    #[case("done", Status::Done)]
    fn status_parses_wire_names(#[case] raw: &str, #[case] expected: Status) {
        assert_eq!(raw.parse::<Status>().unwrap(), expected);
        assert_eq!(expected.to_string(), raw);
    }

    #[rstest]
    #[case("Done")]
    #[case("in-progress")]
    #[case("open")]
    #[case("")]
    fn status_rejects_unknown_values(#[case] raw: &str) {
        assert!(raw.parse::<Status>().is_err());
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let back: Status = serde_json::from_str("\"not_done\"").unwrap();
        assert_eq!(back, Status::NotDone);
    }

    #[test]
    fn filter_all_matches_everything() {
        for s in Status::ALL {
            assert!(StatusFilter::All.matches(s));
        }
    }

    #[test]
    fn filter_matches_only_its_status() {
        assert!(StatusFilter::Done.matches(Status::Done));
        assert!(!StatusFilter::Done.matches(Status::NotDone));
        assert!(!StatusFilter::InProgress.matches(Status::Done));
    }

    #[test]
    fn filter_parses_all_and_statuses() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("in_progress".parse::<StatusFilter>().unwrap(), StatusFilter::InProgress);
        assert!("everything".parse::<StatusFilter>().is_err());
    }
}
