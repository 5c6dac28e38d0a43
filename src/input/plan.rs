//! Turns impression records into verification targets.

use crate::config::DispatchPolicy;
use crate::models::{ImpressionRecord, VerificationTarget};

/// Flattens records into the ordered target list the scheduler runs.
///
/// `First` keeps only the leading candidate of each record; `All` keeps every
/// candidate, in cell order.
pub fn plan_targets(records: Vec<ImpressionRecord>, policy: DispatchPolicy) -> Vec<VerificationTarget> {
    let mut targets = Vec::with_capacity(records.len());
    for record in records {
        let ImpressionRecord {
            tactic_id,
            impression_url_arr,
        } = record;
        match policy {
            DispatchPolicy::First => {
                if let Some(url) = impression_url_arr.into_iter().next() {
                    targets.push(VerificationTarget::new(tactic_id, url));
                }
            }
            DispatchPolicy::All => {
                targets.extend(
                    impression_url_arr
                        .into_iter()
                        .map(|url| VerificationTarget::new(tactic_id.clone(), url)),
                );
            }
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ImpressionRecord> {
        vec![
            ImpressionRecord {
                tactic_id: "T1".to_string(),
                impression_url_arr: vec!["http://a.test/1".to_string(), "http://a.test/2".to_string()],
            },
            ImpressionRecord {
                tactic_id: "T2".to_string(),
                impression_url_arr: vec!["http://b.test/1".to_string()],
            },
        ]
    }

    #[test]
    fn test_first_policy() {
        let targets = plan_targets(records(), DispatchPolicy::First);
        assert_eq!(
            targets,
            vec![
                VerificationTarget::new("T1", "http://a.test/1"),
                VerificationTarget::new("T2", "http://b.test/1"),
            ]
        );
    }

    #[test]
    fn test_all_policy() {
        let targets = plan_targets(records(), DispatchPolicy::All);
        assert_eq!(
            targets,
            vec![
                VerificationTarget::new("T1", "http://a.test/1"),
                VerificationTarget::new("T1", "http://a.test/2"),
                VerificationTarget::new("T2", "http://b.test/1"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(plan_targets(Vec::new(), DispatchPolicy::All).is_empty());
    }
}
