use serde::de::DeserializeOwned;

use crate::error::CareError;

#[derive(Debug, Clone)]
pub(crate) struct JsonlParseOutcome<T> {
    pub(crate) items: Vec<T>,
    pub(crate) skipped_lines: usize,
    pub(crate) first_error: Option<(usize, String)>,
}

pub(crate) fn parse_jsonl_tolerant<T>(raw: &str) -> JsonlParseOutcome<T>
where
    T: DeserializeOwned,
{
    let mut items = Vec::new();
    let mut skipped_lines = 0usize;
    let mut first_error = None::<(usize, String)>;

    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(line) {
            Ok(value) => items.push(value),
            Err(err) => {
                skipped_lines += 1;
                if first_error.is_none() {
                    first_error = Some((line_no + 1, err.to_string()));
                }
            }
        }
    }

    JsonlParseOutcome {
        items,
        skipped_lines,
        first_error,
    }
}

pub(crate) fn jsonl_all_lines_invalid(
    label: &str,
    skipped_lines: usize,
    first_error: Option<&(usize, String)>,
) -> CareError {
    if let Some((line_no, message)) = first_error {
        return CareError::Validation(format!(
            "{label} parse failed: skipped {skipped_lines} invalid lines (first at line {line_no}: {message})"
        ));
    }

    CareError::Validation(format!(
        "{label} parse failed: skipped {skipped_lines} invalid lines"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerant_parse_skips_blank_and_broken_lines() {
        let raw = "{\"a\":1}\n\nnot json\n{\"a\":2}\n";
        let parsed = parse_jsonl_tolerant::<serde_json::Value>(raw);
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.skipped_lines, 1);
        assert_eq!(parsed.first_error.as_ref().map(|(line, _)| *line), Some(3));
    }

    #[test]
    fn all_invalid_error_names_first_bad_line() {
        let err = jsonl_all_lines_invalid("request log", 2, Some(&(1, "oops".to_string())));
        assert_eq!(err.code(), "VALIDATION_FAILED");
        assert!(err.to_string().contains("first at line 1: oops"));
    }
}
