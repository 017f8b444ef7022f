//! Interactive drill session over one report.
//!
//! A session owns the drill state, the active filters and the current view.
//! Every applied event recomputes the view before `apply` returns.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use vantage_aggregate::{aggregate, ReportSummary};
use vantage_drill::{DrillError, DrillState};
use vantage_model::{DateRange, DimensionFilter, DrillPath, FilterSet, Group};

use crate::{Report, ReportError, ReportId};

/// One user interaction with a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Descend(String),
    Ascend,
    Reset,
    SetFilter(DimensionFilter),
    ClearFilter(String),
    SetDateRange(DateRange),
    ClearDateRange,
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Descend(key) => write!(f, "descend:{key}"),
            Self::Ascend => write!(f, "ascend"),
            Self::Reset => write!(f, "reset"),
            Self::SetFilter(filter) => write!(f, "filter:{}={}", filter.dimension, filter.value),
            Self::ClearFilter(dimension) => write!(f, "unfilter:{dimension}"),
            Self::SetDateRange(range) => write!(f, "range:{range}"),
            Self::ClearDateRange => write!(f, "unrange"),
        }
    }
}

impl FromStr for SessionEvent {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ReportError::InvalidEvent {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (verb, arg) = match s.split_once(':') {
            Some((verb, arg)) => (verb, Some(arg)),
            None => (s, None),
        };

        match (verb, arg) {
            ("ascend", None) => Ok(Self::Ascend),
            ("reset", None) => Ok(Self::Reset),
            ("unrange", None) => Ok(Self::ClearDateRange),
            ("descend", Some(key)) if !key.is_empty() => Ok(Self::Descend(key.to_string())),
            ("unfilter", Some(dimension)) if !dimension.is_empty() => {
                Ok(Self::ClearFilter(dimension.to_string()))
            }
            ("filter", Some(arg)) => {
                let (dimension, value) = arg
                    .split_once('=')
                    .filter(|(d, _)| !d.is_empty())
                    .ok_or_else(|| invalid("expected filter:<dimension>=<value>"))?;
                Ok(Self::SetFilter(DimensionFilter::new(dimension, value)))
            }
            ("range", Some(arg)) => {
                let (start, end) = arg
                    .split_once("..")
                    .ok_or_else(|| invalid("expected range:<start>..<end>"))?;
                let parse = |text: &str| {
                    text.parse::<NaiveDate>()
                        .map_err(|e| invalid(&format!("bad date '{text}': {e}")))
                };
                let range = DateRange::new(parse(start)?, parse(end)?)
                    .map_err(|e| invalid(&e.to_string()))?;
                Ok(Self::SetDateRange(range))
            }
            ("descend" | "unfilter", _) => Err(invalid("missing argument")),
            ("ascend" | "reset" | "unrange", Some(_)) => Err(invalid("takes no argument")),
            _ => Err(invalid("unknown event")),
        }
    }
}

/// Outcome of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// State changed and the view was recomputed.
    Changed,
    /// The event was valid but had nothing to change.
    Unchanged,
    /// The drill state rejected the transition; nothing changed.
    Ignored(DrillError),
}

/// One breadcrumb entry: the level descended through and the key chosen there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub level: String,
    pub key: String,
}

/// Serializable picture of a session at one moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub report: ReportId,
    pub title: String,
    pub level: usize,
    pub level_name: String,
    pub path: DrillPath,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub filters: FilterSet,
    pub groups: Vec<Group>,
}

/// A report being explored: drill position, filters and the current view.
#[derive(Debug, Clone)]
pub struct ReportSession {
    report: Report,
    state: DrillState,
    filters: FilterSet,
    view: Vec<Group>,
}

impl ReportSession {
    /// Open a report at its top level with no filters.
    pub fn new(report: Report) -> Self {
        let state = DrillState::new(report.config.levels.clone());
        let mut session = Self { report, state, filters: FilterSet::new(), view: Vec::new() };
        session.refresh();
        session
    }

    /// Open a report already drilled down to `path`.
    pub fn with_path(report: Report, path: DrillPath) -> Result<Self, ReportError> {
        let state = DrillState::restore(report.config.levels.clone(), path)?;
        let mut session = Self { report, state, filters: FilterSet::new(), view: Vec::new() };
        session.refresh();
        Ok(session)
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn state(&self) -> &DrillState {
        &self.state
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Groups at the active level under the current path and filters.
    pub fn view(&self) -> &[Group] {
        &self.view
    }

    /// Apply one event and recompute the view.
    pub fn apply(&mut self, event: SessionEvent) -> Applied {
        let changed = match event {
            SessionEvent::Descend(key) => match self.state.descend(key) {
                Ok(()) => true,
                Err(e) => return self.ignored(e),
            },
            SessionEvent::Ascend => match self.state.ascend() {
                Ok(_) => true,
                Err(e) => return self.ignored(e),
            },
            SessionEvent::Reset => {
                let was_root = self.state.is_root();
                self.state.reset();
                !was_root
            }
            SessionEvent::SetFilter(filter) => {
                let before = self.filters.clone();
                self.filters.set(filter);
                self.filters != before
            }
            SessionEvent::ClearFilter(dimension) => self.filters.clear(&dimension),
            SessionEvent::SetDateRange(range) => {
                let changed = self.filters.date_range() != Some(&range);
                self.filters.set_date_range(range);
                changed
            }
            SessionEvent::ClearDateRange => self.filters.clear_date_range(),
        };

        if !changed {
            return Applied::Unchanged;
        }
        self.refresh();
        if self.view.is_empty() && !self.state.is_root() {
            debug!(
                report = %self.report.id,
                path = %self.state.path(),
                "no groups under the selected path"
            );
        }
        Applied::Changed
    }

    /// Summary cards for the current view.
    pub fn summary(&self) -> ReportSummary {
        ReportSummary::compute(&self.view, &self.report.config)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            report: self.report.id,
            title: self.report.title.to_string(),
            level: self.state.level(),
            level_name: self.state.level_name().to_string(),
            path: self.state.path().clone(),
            breadcrumbs: self
                .state
                .breadcrumbs()
                .into_iter()
                .map(|(level, key)| Breadcrumb { level: level.to_string(), key: key.to_string() })
                .collect(),
            filters: self.filters.clone(),
            groups: self.view.clone(),
        }
    }

    fn ignored(&self, error: DrillError) -> Applied {
        debug!(report = %self.report.id, error = %error, "transition ignored");
        Applied::Ignored(error)
    }

    fn refresh(&mut self) {
        self.view = aggregate(
            &self.report.records,
            &self.report.config,
            self.state.path(),
            &self.filters,
        );
    }
}
