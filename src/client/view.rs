//! Pure projections over a loaded collection.

use std::cmp::Reverse;

use crate::types::{Filter, SortOrder, Todo};

/// Filter by completion state, then sort by title ignoring case.
///
/// Todos with equal titles (after lowercasing) keep ascending id order in both
/// sort directions, so the result is fully determined by the input set.
pub fn derive(todos: &[Todo], filter: Filter, order: SortOrder) -> Vec<&Todo> {
    let mut visible: Vec<&Todo> = todos.iter().filter(|t| filter.matches(t)).collect();
    match order {
        SortOrder::Asc => visible.sort_by_cached_key(|t| (t.title.to_lowercase(), t.id)),
        SortOrder::Desc => {
            visible.sort_by_cached_key(|t| (Reverse(t.title.to_lowercase()), t.id))
        }
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            description: String::new(),
            completed,
            created_at: 0,
            updated_at: None,
        }
    }

    fn titles(todos: &[&Todo]) -> Vec<String> {
        todos.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn ascending_ignores_case() {
        let todos = vec![
            todo(1, "banana", false),
            todo(2, "Apple", false),
            todo(3, "cherry", false),
        ];
        let visible = derive(&todos, Filter::All, SortOrder::Asc);
        assert_eq!(titles(&visible), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn descending_reverses() {
        let todos = vec![
            todo(1, "banana", false),
            todo(2, "Apple", false),
            todo(3, "cherry", false),
        ];
        let visible = derive(&todos, Filter::All, SortOrder::Desc);
        assert_eq!(titles(&visible), vec!["cherry", "banana", "Apple"]);
    }

    #[test]
    fn equal_titles_break_ties_by_id() {
        let todos = vec![
            todo(7, "same", false),
            todo(2, "SAME", false),
            todo(5, "Same", false),
        ];
        let asc: Vec<i64> = derive(&todos, Filter::All, SortOrder::Asc)
            .iter()
            .map(|t| t.id)
            .collect();
        let desc: Vec<i64> = derive(&todos, Filter::All, SortOrder::Desc)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(asc, vec![2, 5, 7]);
        assert_eq!(desc, vec![2, 5, 7]);
    }

    #[test]
    fn filters_before_sorting() {
        let todos = vec![
            todo(1, "b", true),
            todo(2, "a", false),
            todo(3, "c", true),
        ];
        assert_eq!(
            titles(&derive(&todos, Filter::Completed, SortOrder::Asc)),
            vec!["b", "c"]
        );
        assert_eq!(
            titles(&derive(&todos, Filter::Incomplete, SortOrder::Asc)),
            vec!["a"]
        );
        assert_eq!(derive(&todos, Filter::All, SortOrder::Asc).len(), 3);
    }

    #[test]
    fn empty_collection_yields_empty_view() {
        assert!(derive(&[], Filter::Completed, SortOrder::Desc).is_empty());
    }
}
