use super::ledger::Ledger;

/// Union of all per-image results in one submission batch.
///
/// Rendered images keep submission order. Identified names are a plain
/// concatenation — duplicates across images are expected, and downstream
/// reconciliation treats the list as a set.
#[derive(Debug, Clone, Default)]
pub struct AggregatedOutcome {
    rendered_images: Vec<String>,
    identified_names: Vec<String>,
}

impl AggregatedOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one image's response lists, preserving arrival order.
    pub fn absorb(&mut self, rendered_images: Vec<String>, identified_names: Vec<String>) {
        self.rendered_images.extend(rendered_images);
        self.identified_names.extend(identified_names);
    }

    pub fn rendered_images(&self) -> &[String] {
        &self.rendered_images
    }

    pub fn identified_names(&self) -> &[String] {
        &self.identified_names
    }
}

/// Immutable snapshot of one submission cycle: the chosen group, the
/// aggregated batch outcome, the roster it was reconciled against, and the
/// derived ledger.
///
/// Exactly one session is live at a time; the caller owns the value and
/// deriving a new session replaces the old one. Edits (`toggle`,
/// `set_present`) return new snapshots, so a failed commit leaves the
/// operator's sheet exactly as it was.
#[derive(Debug, Clone)]
pub struct SubmissionSession {
    group: String,
    outcome: AggregatedOutcome,
    roster: Vec<String>,
    ledger: Ledger,
}

impl SubmissionSession {
    /// Reconcile a fresh roster against the batch outcome.
    pub fn derive(group: String, outcome: AggregatedOutcome, roster: Vec<String>) -> Self {
        let ledger = Ledger::reconcile(&roster, outcome.identified_names());
        Self {
            group,
            outcome,
            roster,
            ledger,
        }
    }

    /// Snapshot with one ledger entry flipped. `None` if out of range.
    pub fn toggle(&self, index: usize) -> Option<SubmissionSession> {
        self.ledger.toggle(index).map(|ledger| Self {
            ledger,
            ..self.clone()
        })
    }

    /// Snapshot with one ledger entry forced to `present`.
    pub fn set_present(&self, index: usize, present: bool) -> Option<SubmissionSession> {
        self.ledger.set_present(index, present).map(|ledger| Self {
            ledger,
            ..self.clone()
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn outcome(&self) -> &AggregatedOutcome {
        &self.outcome
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
