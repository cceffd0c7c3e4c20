use super::super::conflicts::ScheduleConflict;
use super::super::domain::{CertificationStatus, JobContext, PreferencePolarity, TimeOffRequest};
use super::super::enrichment::{EnrichedCandidate, PeerConflictDirection};
use super::config::ScreeningPolicy;
use super::policy::{EligibilityIssue, IssueKind};

const NO_REASON: &str = "No reason";
const NO_REASON_PROVIDED: &str = "No reason provided";

/// Accumulate findings in the dialog's fixed order: certifications, time off,
/// direct overlaps, mandatory scope blocks, peer conflicts, then regular
/// not-preferred notes.
pub(crate) fn collect_issues(
    candidate: &EnrichedCandidate,
    job: &JobContext,
    policy: &ScreeningPolicy,
) -> Vec<EligibilityIssue> {
    let mut issues = Vec::new();

    push_certification_issues(&mut issues, candidate, job, policy);
    push_time_off_issues(&mut issues, candidate);
    push_overlap_issues(&mut issues, candidate);
    push_scoped_issues(&mut issues, candidate, true);
    push_peer_issues(&mut issues, candidate);
    push_scoped_issues(&mut issues, candidate, false);

    issues
}

fn push_certification_issues(
    issues: &mut Vec<EligibilityIssue>,
    candidate: &EnrichedCandidate,
    job: &JobContext,
    policy: &ScreeningPolicy,
) {
    if let Some(message) =
        certification_issue("TCP Certification", &candidate.candidate.tcp_certification, policy)
    {
        issues.push(EligibilityIssue {
            kind: IssueKind::Certification,
            message,
            blocking: false,
        });
    }

    if job.position.requires_driver_license() {
        if let Some(message) =
            certification_issue("Driver License", &candidate.candidate.driver_license, policy)
        {
            issues.push(EligibilityIssue {
                kind: IssueKind::Certification,
                message,
                blocking: false,
            });
        }
    }
}

fn certification_issue(
    name: &str,
    status: &CertificationStatus,
    policy: &ScreeningPolicy,
) -> Option<String> {
    if !status.has_certification {
        return Some(format!("No {name}"));
    }
    if !status.is_valid {
        return Some(format!("{name} Expired"));
    }

    let expiring = match status.days_remaining {
        Some(days) => (0..=policy.certification_expiry_window_days()).contains(&days),
        None => status.is_expiring_soon,
    };
    if !expiring {
        return None;
    }

    match status.days_remaining {
        Some(days) => Some(format!("{name} expires in {days} days")),
        None => Some(format!("{name} expires soon")),
    }
}

fn push_time_off_issues(issues: &mut Vec<EligibilityIssue>, candidate: &EnrichedCandidate) {
    if candidate.time_off_conflicts.is_empty() {
        return;
    }

    let formatted: Vec<String> = candidate
        .time_off_conflicts
        .iter()
        .filter_map(format_time_off)
        .collect();
    let message = if formatted.is_empty() {
        "Has approved or pending time off during this job".to_string()
    } else {
        formatted.join(", ")
    };

    issues.push(EligibilityIssue {
        kind: IssueKind::TimeOff,
        message,
        blocking: true,
    });
}

fn format_time_off(request: &TimeOffRequest) -> Option<String> {
    let kind = title_case(&request.kind);
    if kind.is_empty() {
        return None;
    }

    let dates = if request.starts_on == request.ends_on {
        format!("on {}", request.starts_on)
    } else {
        format!("from {} to {}", request.starts_on, request.ends_on)
    };
    Some(format!("{kind} {} {dates}", request.status.label()))
}

fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn push_overlap_issues(issues: &mut Vec<EligibilityIssue>, candidate: &EnrichedCandidate) {
    let overlaps: Vec<&ScheduleConflict> = candidate.direct_overlaps().collect();
    let message = match overlaps.as_slice() {
        [] => return,
        [only] => {
            let assignment = &only.assignment;
            format!(
                "Schedule Conflict: Job #{} at {} ({})\n{} to {}",
                assignment.job_number,
                assignment.site_name,
                assignment.client_name,
                assignment.starts_at.format("%Y-%m-%d %H:%M"),
                assignment.ends_at.format("%Y-%m-%d %H:%M"),
            )
        }
        several => format!(
            "Schedule Conflicts: {} overlapping assignments",
            several.len()
        ),
    };

    issues.push(EligibilityIssue {
        kind: IssueKind::ScheduleOverlap,
        message,
        blocking: true,
    });
}

fn push_scoped_issues(
    issues: &mut Vec<EligibilityIssue>,
    candidate: &EnrichedCandidate,
    mandatory: bool,
) {
    for (scope, preference) in candidate.scoped_preferences() {
        let Some(preference) = preference else {
            continue;
        };
        if preference.polarity != PreferencePolarity::NotPreferred
            || preference.is_mandatory != mandatory
        {
            continue;
        }

        let reason = preference.reason.as_deref().unwrap_or(NO_REASON);
        let issue = if mandatory {
            EligibilityIssue {
                kind: IssueKind::MandatoryNotPreferred,
                message: format!("{} (Mandatory): {reason}", scope.label()),
                blocking: true,
            }
        } else {
            EligibilityIssue {
                kind: IssueKind::NotPreferred,
                message: format!("{}: {reason}", scope.label()),
                blocking: false,
            }
        };
        issues.push(issue);
    }
}

fn push_peer_issues(issues: &mut Vec<EligibilityIssue>, candidate: &EnrichedCandidate) {
    for conflict in &candidate.peer_conflicts {
        let reason = conflict.reason.as_deref().unwrap_or(NO_REASON_PROVIDED);
        let message = match conflict.direction {
            PeerConflictDirection::MarkedByPeer => format!(
                "{} has marked this worker as not preferred: {reason}",
                conflict.peer_name
            ),
            PeerConflictDirection::MarkedPeer => format!(
                "This worker has marked {} as not preferred: {reason}",
                conflict.peer_name
            ),
        };

        issues.push(EligibilityIssue {
            kind: IssueKind::PeerConflict,
            message,
            blocking: conflict.is_mandatory,
        });
    }
}
