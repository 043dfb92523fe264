use crate::core::transform::RecordTransformer;
use crate::domain::model::{BatchOutcome, BatchSummary, RawRecord};

/// Drives the transformer over a whole row sequence. A bad row is
/// recorded and the batch continues; only the Extract collaborator can
/// abort a run.
pub struct BatchRunner {
    transformer: RecordTransformer,
}

impl BatchRunner {
    pub fn new(transformer: RecordTransformer) -> Self {
        Self { transformer }
    }

    /// Accepted records come back in input row order.
    pub fn run<I>(&self, rows: I) -> BatchOutcome
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut accepted = Vec::new();
        let mut rejections = Vec::new();
        let mut rows_seen = 0;

        for row in rows {
            rows_seen += 1;
            match self.transformer.transform(&row) {
                Ok(record) => accepted.push(record),
                Err(rejection) => {
                    tracing::warn!("Rejected {}", rejection);
                    rejections.push(rejection);
                }
            }
        }

        let summary = BatchSummary {
            rows_seen,
            accepted: accepted.len(),
            rejected: rejections.len(),
            rejections,
        };
        BatchOutcome { accepted, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::{RecordTransformer, TransformConfig, CORE_FIELDS};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn runner() -> BatchRunner {
        BatchRunner::new(RecordTransformer::new(TransformConfig {
            reference_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            date_formats: ["%d%m%Y", "%d/%m/%Y", "%Y-%m-%d"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            required_fields: CORE_FIELDS.iter().map(|s| s.to_string()).collect(),
        }))
    }

    fn row(index: usize, first_name: &str, birth_date: &str, salary: &str) -> RawRecord {
        let fields: HashMap<String, String> = [
            ("first_name", first_name),
            ("last_name", "Tester"),
            ("company", "Example Corp"),
            ("birth_date", birth_date),
            ("salary", salary),
            ("address", "1 Main St"),
            ("suburb", "Anytown"),
            ("state", "NSW"),
            ("postcode", "2000"),
            ("phone", "02"),
            ("mobile", "04"),
            ("email", "t@example.com"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        RawRecord::new(index, fields)
    }

    #[test]
    fn test_counts_always_balance() {
        let rows = vec![
            row(0, "Alice", "15011980", "40000"),
            row(1, "Bob", "garbage", "50000"),
            row(2, "Carol", "01021975", "-1"),
            row(3, "Dave", "2000-06-30", "120000"),
        ];

        let outcome = runner().run(rows);
        let summary = &outcome.summary;

        assert_eq!(summary.rows_seen, 4);
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.rejected, 2);
        assert_eq!(summary.rejected, summary.rejections.len());
        assert_eq!(summary.accepted + summary.rejected, summary.rows_seen);
    }

    #[test]
    fn test_accepted_order_matches_input_order() {
        let rows = vec![
            row(0, "Alice", "15011980", "40000"),
            row(1, "Bob", "garbage", "50000"),
            row(2, "Carol", "01021975", "60000"),
        ];

        let outcome = runner().run(rows);

        let names: Vec<&str> = outcome
            .accepted
            .iter()
            .map(|r| r.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["Alice", "Carol"]);

        assert_eq!(outcome.summary.rejections.len(), 1);
        assert_eq!(outcome.summary.rejections[0].row_index, 1);
    }

    #[test]
    fn test_empty_batch() {
        let outcome = runner().run(Vec::new());
        assert_eq!(outcome.summary.rows_seen, 0);
        assert_eq!(outcome.summary.accepted, 0);
        assert_eq!(outcome.summary.rejected, 0);
        assert!(outcome.accepted.is_empty());
    }
}
