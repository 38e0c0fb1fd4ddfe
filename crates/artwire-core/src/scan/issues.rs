use std::collections::BTreeMap;

use crate::IssueSummary;
use crate::protocols::artnet::ArtNetError;

use super::ts_to_rfc3339;

const MAX_EXAMPLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum IssueKind {
    Truncated,
    InvalidEnum,
    TooManyUids,
    MalformedFrame,
}

impl IssueKind {
    fn id(self) -> &'static str {
        match self {
            IssueKind::Truncated => "AW-ARTNET-TRUNCATED",
            IssueKind::InvalidEnum => "AW-ARTNET-INVALID-ENUM",
            IssueKind::TooManyUids => "AW-ARTNET-TOO-MANY-UIDS",
            IssueKind::MalformedFrame => "AW-FRAME-MALFORMED",
        }
    }

    fn severity(self) -> &'static str {
        match self {
            IssueKind::MalformedFrame => "warning",
            _ => "error",
        }
    }

    fn message(self) -> &'static str {
        match self {
            IssueKind::Truncated => "Art-Net packet shorter than its declared layout",
            IssueKind::InvalidEnum => "Art-Net packet carries an undefined enumeration value",
            IssueKind::TooManyUids => "Art-Net packet carries more UIDs than allowed",
            IssueKind::MalformedFrame => "frame could not be sliced down to a UDP payload",
        }
    }

    /// `None` for errors that are counted rather than reported.
    pub(crate) fn from_artnet(err: &ArtNetError) -> Option<Self> {
        match err {
            ArtNetError::TruncatedBuffer { .. } => Some(IssueKind::Truncated),
            ArtNetError::InvalidEnumValue { .. } => Some(IssueKind::InvalidEnum),
            ArtNetError::TooManyUids { .. } => Some(IssueKind::TooManyUids),
            ArtNetError::UnknownOpCode { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
struct IssueEntry {
    count: u64,
    examples: Vec<String>,
}

/// Decode problems grouped by kind, keeping the first few contexts.
#[derive(Debug, Default)]
pub(crate) struct IssueLog {
    entries: BTreeMap<IssueKind, IssueEntry>,
}

impl IssueLog {
    pub(crate) fn record(&mut self, kind: IssueKind, context: &str, detail: &str, ts: Option<f64>) {
        let entry = self.entries.entry(kind).or_default();
        entry.count += 1;
        if entry.examples.len() < MAX_EXAMPLES {
            let example = match ts_to_rfc3339(ts) {
                Some(ts) => format!("{context} @ {ts}: {detail}"),
                None => format!("{context}: {detail}"),
            };
            entry.examples.push(example);
        }
    }

    pub(crate) fn into_summaries(self) -> Vec<IssueSummary> {
        let mut issues: Vec<IssueSummary> = self
            .entries
            .into_iter()
            .map(|(kind, entry)| IssueSummary {
                id: kind.id().to_string(),
                severity: kind.severity().to_string(),
                message: kind.message().to_string(),
                count: entry.count,
                examples: entry.examples,
            })
            .collect();
        issues.sort_by(|a, b| a.id.cmp(&b.id));
        issues
    }
}
