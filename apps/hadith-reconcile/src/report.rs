//! Line-oriented console reports

use hadith_titles::{DuplicateGroup, MatchOutcome, ReconcileReport, RowReport, TitleRecord};

fn describe(record: &TitleRecord) -> String {
    let mut line = format!("{}  {}", record.index, record.title_ar_or_empty());
    if !record.title_en.is_empty() {
        line.push_str("  |  ");
        line.push_str(&record.title_en);
    }
    line
}

/// Report the candidates matching one query under its comparison key
pub fn render_matches(
    query: &str,
    key: &str,
    positions: &[usize],
    candidates: &[TitleRecord],
) -> String {
    let mut out = match positions.len() {
        0 => format!("No match for \"{}\" (key: {})\n", query, key),
        1 => format!("1 match for \"{}\" (key: {})\n", query, key),
        n => format!("{} matches for \"{}\" (key: {})\n", n, query, key),
    };

    for &position in positions {
        out.push_str(&format!("  [{}] {}\n", position, describe(&candidates[position])));
    }

    if positions.len() > 1 {
        out.push_str("note: several candidates share this title\n");
    }

    out.trim_end().to_string()
}

fn render_row(row: &RowReport, candidates: &[TitleRecord]) -> String {
    let sheet = format!("{}  {}", row.record.index, row.record.title_ar_or_empty());
    let mut out = match &row.outcome {
        MatchOutcome::Unique { candidate } => {
            format!("MATCH      {} -> {}\n", sheet, describe(&candidates[*candidate]))
        }
        MatchOutcome::Ambiguous { candidates: matched } => {
            let indices: Vec<&str> = matched
                .iter()
                .map(|&position| candidates[position].index.as_str())
                .collect();
            format!("AMBIGUOUS  {} -> {}\n", sheet, indices.join(", "))
        }
        MatchOutcome::Missing { suggestions } => {
            let mut out = format!("MISSING    {}\n", sheet);
            for suggestion in suggestions {
                out.push_str(&format!(
                    "  did you mean: {} ({:.2})\n",
                    describe(&candidates[suggestion.candidate]),
                    suggestion.score
                ));
            }
            out
        }
    };

    for correction in &row.corrections {
        out.push_str(&format!(
            "  {} [{}]: \"{}\" -> \"{}\"\n",
            correction.field, correction.candidate_index, correction.current, correction.proposed
        ));
    }

    out
}

/// Report a whole reconciliation pass
pub fn render_report(report: &ReconcileReport, candidates: &[TitleRecord]) -> String {
    let mut out = String::new();

    for row in &report.rows {
        out.push_str(&render_row(row, candidates));
    }

    let summary = &report.summary;
    out.push_str(&format!(
        "\nSummary: {} rows, {} matched, {} ambiguous, {} missing, {} corrections\n",
        summary.rows, summary.unique, summary.ambiguous, summary.missing, summary.corrections
    ));

    if !report.duplicates.is_empty() {
        out.push_str(&format!(
            "Duplicate titles among candidates: {} (run `duplicates` for details)\n",
            report.duplicates.len()
        ));
    }

    out.trim_end().to_string()
}

/// Report candidates that share a title
pub fn render_duplicates(groups: &[DuplicateGroup], candidates: &[TitleRecord]) -> String {
    if groups.is_empty() {
        return "No duplicate titles".to_string();
    }

    let mut out = format!("{} duplicate titles\n", groups.len());
    for group in groups {
        out.push_str(&format!("{}\n", group.key));
        for &position in &group.positions {
            out.push_str(&format!("  [{}] {}\n", position, describe(&candidates[position])));
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hadith_titles::{
        normalize, normalize_with, reconcile, NormalizeOptions, ReconcileConfig, TitleIndex,
    };

    fn candidates() -> Vec<TitleRecord> {
        vec![
            TitleRecord::new("101", "الكافي").with_title_en("Al-Kafi"),
            TitleRecord::new("102", "الخصال").with_title_en("Al-Khisal"),
            TitleRecord::new("103", "الخصال"),
        ]
    }

    #[test]
    fn test_render_no_match() {
        let output = render_matches("التوحيد", &normalize("التوحيد"), &[], &candidates());
        assert_eq!(output, "No match for \"التوحيد\" (key: التوحيد)");
    }

    #[test]
    fn test_render_ambiguous_matches() {
        let output = render_matches("الخصال", &normalize("الخصال"), &[1, 2], &candidates());
        assert!(output.starts_with("2 matches"));
        assert!(output.contains("[1] 102  الخصال  |  Al-Khisal"));
        assert!(output.contains("[2] 103  الخصال"));
        assert!(output.ends_with("note: several candidates share this title"));
    }

    #[test]
    fn test_render_matches_shows_folded_key() {
        let query = "\u{FEDB}\u{FE98}\u{FE8E}\u{FE8F}";
        let options = NormalizeOptions {
            fold_presentation_forms: true,
        };
        let key = normalize_with(query, &options);
        assert_eq!(key, "كتاب");

        let output = render_matches(query, &key, &[], &candidates());
        assert!(output.contains("(key: كتاب)"));
    }

    #[test]
    fn test_render_report() {
        let candidates = candidates();
        let sheet = vec![
            TitleRecord::new("1", "الكافی").with_title_en("al-Kafi"),
            TitleRecord::new("2", "الخصال"),
            TitleRecord::new("3", "كتاب آخر"),
        ];
        let report = reconcile(&sheet, &candidates, &ReconcileConfig::default()).unwrap();
        let output = render_report(&report, &candidates);

        assert!(output.contains("MATCH      1  الكافی -> 101  الكافي  |  Al-Kafi"));
        assert!(output.contains("  title_en [101]: \"Al-Kafi\" -> \"al-Kafi\""));
        assert!(output.contains("AMBIGUOUS  2  الخصال -> 102, 103"));
        assert!(output.contains("MISSING    3  كتاب آخر"));
        assert!(output.contains("Summary: 3 rows, 1 matched, 1 ambiguous, 1 missing, 1 corrections"));
        assert!(output.contains("Duplicate titles among candidates: 1"));
    }

    #[test]
    fn test_render_duplicates() {
        let candidates = candidates();
        let groups = TitleIndex::build(&candidates).duplicate_groups();
        let output = render_duplicates(&groups, &candidates);
        assert!(output.starts_with("1 duplicate titles\nالخصال"));
        assert_eq!(render_duplicates(&[], &candidates), "No duplicate titles");
    }
}
