//! Pure pipeline stages: filter → sort → paginate
//!
//! Each stage is a function of the previous stage's output plus the query
//! state. Nothing is cached; callers rerun the whole chain whenever rows or
//! state change.

use super::query::{SortDirection, SortSpec};
use super::row::{Row, RowRef};
use super::value::ValueKind;

/// Wrap every input row with its position
pub fn positions(rows: &[Row]) -> Vec<RowRef<'_>> {
    rows.iter()
        .enumerate()
        .map(|(position, row)| RowRef { position, row })
        .collect()
}

/// Keep rows where any field's text form contains `search_text`,
/// ignoring case. An empty search keeps every row in order.
pub fn filter<'a>(rows: &'a [Row], search_text: &str) -> Vec<RowRef<'a>> {
    let all = positions(rows);
    if search_text.is_empty() {
        return all;
    }

    let needle = search_text.to_lowercase();
    all.into_iter()
        .filter(|r| r.row.values().any(|v| v.contains_lowercase(&needle)))
        .collect()
}

/// Stable sort on the raw value of `field` compared as `kind`
pub fn sort_rows(rows: &mut [RowRef<'_>], field: &str, direction: SortDirection, kind: ValueKind) {
    rows.sort_by(|a, b| {
        let ord = a.row.get(field).compare(b.row.get(field), kind);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Sort by an optional spec; `None` leaves the order untouched
pub fn sort<'a>(mut rows: Vec<RowRef<'a>>, spec: Option<&SortSpec>, kind: ValueKind) -> Vec<RowRef<'a>> {
    if let Some(spec) = spec {
        sort_rows(&mut rows, &spec.field, spec.direction, kind);
    }
    rows
}

/// Number of pages for `len` rows, never less than 1
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// Slice `[(page-1)*size, page*size)` clamped to the input
pub fn paginate<'r, 'a>(rows: &'r [RowRef<'a>], current_page: usize, page_size: usize) -> &'r [RowRef<'a>] {
    let page_size = page_size.max(1);
    let start = current_page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::value::Value;

    fn scenario_rows() -> Vec<Row> {
        vec![
            Row::new().with("name", "B").with("v", 2i64),
            Row::new().with("name", "A").with("v", 1i64),
            Row::new().with("name", "C").with("v", 2i64),
        ]
    }

    fn names(rows: &[RowRef<'_>]) -> Vec<String> {
        rows.iter().map(|r| r.row.get("name").to_text()).collect()
    }

    #[test]
    fn test_filter_empty_search_is_identity() {
        let rows = scenario_rows();
        let filtered = filter(&rows, "");
        assert_eq!(names(&filtered), vec!["B", "A", "C"]);
        assert_eq!(
            filtered.iter().map(|r| r.position).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_filter_case_insensitive() {
        let rows = scenario_rows();
        let filtered = filter(&rows, "a");
        assert_eq!(names(&filtered), vec!["A"]);
        assert_eq!(filtered[0].position, 1);
    }

    #[test]
    fn test_filter_matches_any_field_and_partitions_rows() {
        let rows = vec![
            Row::new().with("title", "Night Drive").with("bpm", 132i64),
            Row::new().with("title", "Ocean Dreams").with("bpm", 120i64),
            Row::new().with("title", "Electric Soul").with("genre", "Electronic"),
        ];
        let needle = "13";
        let kept = filter(&rows, needle);
        assert_eq!(kept.len(), 1);

        for (position, row) in rows.iter().enumerate() {
            let matches = row
                .values()
                .any(|v| v.to_text().to_lowercase().contains(needle));
            let was_kept = kept.iter().any(|r| r.position == position);
            assert_eq!(matches, was_kept);
        }
    }

    #[test]
    fn test_filter_partitions_rows_with_nested_objects() {
        let meta = |label: &str| {
            Value::Object([("label".to_string(), Value::from(label))].into_iter().collect())
        };
        let rows = vec![
            Row::new().with("title", "Night Drive").with("meta", meta("Anjunadeep")),
            Row::new().with("title", "Ocean Dreams"),
            Row::new().with("title", "Label Love").with("meta", meta("Drumcode")),
        ];

        for needle in ["label", "anjuna", "{", "ocean", "drumcode"] {
            let kept = filter(&rows, needle);
            for (position, row) in rows.iter().enumerate() {
                let matches = row
                    .values()
                    .any(|v| v.to_text().to_lowercase().contains(needle));
                let was_kept = kept.iter().any(|r| r.position == position);
                assert_eq!(matches, was_kept, "needle {:?}, row {}", needle, position);
            }
        }
        assert_eq!(filter(&rows, "label").len(), 2);
    }

    #[test]
    fn test_filter_preserves_order() {
        let rows = vec![
            Row::new().with("title", "House A"),
            Row::new().with("title", "Techno"),
            Row::new().with("title", "house B"),
        ];
        let filtered = filter(&rows, "HOUSE");
        assert_eq!(
            filtered.iter().map(|r| r.position).collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn test_sort_ascending_keeps_ties_in_input_order() {
        let rows = scenario_rows();
        let sorted = sort(
            positions(&rows),
            Some(&SortSpec::asc("v")),
            ValueKind::Number,
        );
        assert_eq!(names(&sorted), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sort_descending_keeps_ties_in_input_order() {
        let rows = scenario_rows();
        let sorted = sort(
            positions(&rows),
            Some(&SortSpec::desc("v")),
            ValueKind::Number,
        );
        assert_eq!(names(&sorted), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_sort_without_spec_is_identity() {
        let rows = scenario_rows();
        let sorted = sort(positions(&rows), None, ValueKind::Text);
        assert_eq!(names(&sorted), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_sort_desc_reverses_asc_for_distinct_keys() {
        let rows: Vec<Row> = [126i64, 132, 120, 128, 124]
            .iter()
            .map(|bpm| Row::new().with("bpm", *bpm))
            .collect();
        let asc = sort(positions(&rows), Some(&SortSpec::asc("bpm")), ValueKind::Number);
        let desc = sort(asc.clone(), Some(&SortSpec::desc("bpm")), ValueKind::Number);

        let asc_positions: Vec<usize> = asc.iter().map(|r| r.position).collect();
        let mut desc_positions: Vec<usize> = desc.iter().map(|r| r.position).collect();
        desc_positions.reverse();
        assert_eq!(asc_positions, desc_positions);
    }

    #[test]
    fn test_sort_uses_raw_value_not_text() {
        let rows = vec![
            Row::new().with("bpm", 100i64),
            Row::new().with("bpm", 99i64),
        ];
        let sorted = sort(positions(&rows), Some(&SortSpec::asc("bpm")), ValueKind::Number);
        assert_eq!(sorted[0].row.get("bpm"), &Value::Number(99.0));
    }

    #[test]
    fn test_sort_missing_values_first_ascending() {
        let rows = vec![
            Row::new().with("name", "x").with("energy", 5i64),
            Row::new().with("name", "y"),
        ];
        let sorted = sort(positions(&rows), Some(&SortSpec::asc("energy")), ValueKind::Number);
        assert_eq!(names(&sorted), vec!["y", "x"]);
    }

    #[test]
    fn test_sort_puts_nan_text_with_missing_values() {
        let rows: Vec<Row> = (0..200i64)
            .map(|i| {
                if i % 3 == 0 {
                    Row::new().with("bpm", "NaN")
                } else {
                    Row::new().with("bpm", (i * 37) % 101)
                }
            })
            .collect();
        let sorted = sort(positions(&rows), Some(&SortSpec::asc("bpm")), ValueKind::Number);

        let numbers: Vec<f64> = sorted
            .iter()
            .filter_map(|r| r.row.get("bpm").as_number())
            .collect();
        assert!(numbers.windows(2).all(|w| w[0] <= w[1]));

        let nan_count = rows.len() - numbers.len();
        assert!(sorted[..nan_count]
            .iter()
            .all(|r| r.row.get("bpm").as_number().is_none()));
    }

    #[test]
    fn test_total_pages_minimum_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(3, 2), 2);
    }

    #[test]
    fn test_paginate_scenario() {
        let rows = scenario_rows();
        let sorted = sort(positions(&rows), Some(&SortSpec::asc("v")), ValueKind::Number);
        assert_eq!(names(paginate(&sorted, 1, 2)), vec!["A", "B"]);
        assert_eq!(names(paginate(&sorted, 2, 2)), vec!["C"]);
        assert_eq!(total_pages(sorted.len(), 2), 2);
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let rows = scenario_rows();
        let all = positions(&rows);
        assert!(paginate(&all, 5, 2).is_empty());
        assert!(paginate(&all, usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn test_pages_reconstruct_input() {
        let rows: Vec<Row> = (0..23i64).map(|i| Row::new().with("n", i)).collect();
        let all = positions(&rows);
        for page_size in [1, 4, 5, 10, 23, 50] {
            let pages = total_pages(all.len(), page_size);
            let joined: Vec<usize> = (1..=pages)
                .flat_map(|p| paginate(&all, p, page_size).iter().map(|r| r.position))
                .collect();
            assert_eq!(joined, (0..23).collect::<Vec<_>>(), "page size {}", page_size);
        }
    }
}
