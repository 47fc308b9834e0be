use serde::{Deserialize, Serialize};

/// One quiz entry: the service to reveal, the picture the renderer slices into
/// tiles, and the answers offered once the puzzle is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub name: String,
    /// Opaque to the game; only the renderer resolves it.
    pub image: String,
    pub options: Vec<String>,
}

impl ServiceRecord {
    pub fn new(name: &str, image: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            image: image.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.name == answer
    }

    /// Describes why this record cannot be quizzed on, if it can't.
    pub fn problem(&self) -> Option<String> {
        let mut distinct = self.options.clone();
        distinct.sort();
        distinct.dedup();
        if distinct.len() < 2 {
            return Some(format!(
                "needs at least 2 distinct options, has {}",
                distinct.len()
            ));
        }
        if !self.options.contains(&self.name) {
            return Some("options do not include the service name".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem() {
        let ok = ServiceRecord::new("AWS Lambda", "lambda.svg", &["AWS Lambda", "Amazon S3"]);
        assert_eq!(ok.problem(), None);

        let missing = ServiceRecord::new("AWS Lambda", "lambda.svg", &["Amazon EC2", "Amazon S3"]);
        assert!(missing.problem().is_some());

        let duplicate = ServiceRecord::new("AWS Lambda", "lambda.svg", &["AWS Lambda", "AWS Lambda"]);
        assert!(duplicate.problem().is_some());
    }

    #[test]
    fn test_is_correct_is_exact() {
        let record = ServiceRecord::new("Amazon S3", "s3.svg", &["Amazon S3", "Amazon EBS"]);
        assert!(record.is_correct("Amazon S3"));
        assert!(!record.is_correct("amazon s3"));
        assert!(!record.is_correct("Amazon EBS"));
    }
}
