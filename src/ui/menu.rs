//! Operation menu: what the user can run on each structure family, and how
//! the typed input buffer turns into an [`Operation`]

use crate::drivers::{ListPosition, Operation, SortAlgorithm, TraversalOrder};
use crate::snapshot::StructureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Sort(SortAlgorithm),
    ArrayInsert,
    ArrayDelete,
    ArraySearch,
    StackPush,
    StackPop,
    Enqueue,
    Dequeue,
    ListInsert(ListPosition),
    ListDelete,
    HashInsert,
    BstInsert,
    BstSearch,
    Traverse(TraversalOrder),
}

impl MenuItem {
    /// Menu entries available for `kind`, in display order
    pub fn items_for(kind: StructureKind) -> Vec<MenuItem> {
        match kind {
            StructureKind::Sorting => SortAlgorithm::ALL.into_iter().map(MenuItem::Sort).collect(),
            StructureKind::Array => vec![
                MenuItem::ArrayInsert,
                MenuItem::ArrayDelete,
                MenuItem::ArraySearch,
            ],
            StructureKind::Stack => vec![MenuItem::StackPush, MenuItem::StackPop],
            StructureKind::Queue => vec![MenuItem::Enqueue, MenuItem::Dequeue],
            StructureKind::LinkedList => vec![
                MenuItem::ListInsert(ListPosition::Beginning),
                MenuItem::ListInsert(ListPosition::End),
                MenuItem::ListDelete,
            ],
            StructureKind::Hash => vec![MenuItem::HashInsert],
            StructureKind::Tree => {
                let mut items = vec![MenuItem::BstInsert, MenuItem::BstSearch];
                items.extend(TraversalOrder::ALL.into_iter().map(MenuItem::Traverse));
                items
            }
        }
    }

    pub fn label(self) -> String {
        match self {
            MenuItem::Sort(algo) => algo.name().to_string(),
            MenuItem::ArrayInsert => "Insert".to_string(),
            MenuItem::ArrayDelete => "Delete".to_string(),
            MenuItem::ArraySearch | MenuItem::BstSearch => "Search".to_string(),
            MenuItem::StackPush => "Push".to_string(),
            MenuItem::StackPop => "Pop".to_string(),
            MenuItem::Enqueue => "Enqueue".to_string(),
            MenuItem::Dequeue => "Dequeue".to_string(),
            MenuItem::ListInsert(position) => format!("Insert at {}", position),
            MenuItem::ListDelete => "Delete".to_string(),
            MenuItem::HashInsert | MenuItem::BstInsert => "Insert".to_string(),
            MenuItem::Traverse(order) => format!("{} traversal", order.name()),
        }
    }

    /// Parameters the input buffer must hold, e.g. `value, index`
    pub fn params(self) -> &'static str {
        match self {
            MenuItem::ArrayInsert => "value, index",
            MenuItem::ArrayDelete => "index",
            MenuItem::HashInsert => "key, value",
            MenuItem::ArraySearch
            | MenuItem::StackPush
            | MenuItem::Enqueue
            | MenuItem::ListInsert(_)
            | MenuItem::ListDelete
            | MenuItem::BstInsert
            | MenuItem::BstSearch => "value",
            MenuItem::Sort(_)
            | MenuItem::StackPop
            | MenuItem::Dequeue
            | MenuItem::Traverse(_) => "",
        }
    }

    /// Build the operation from the comma-separated input buffer
    pub fn build(self, input: &str) -> Result<Operation, String> {
        let op = match self {
            MenuItem::Sort(algo) => Operation::Sort(algo),
            MenuItem::StackPop => Operation::StackPop,
            MenuItem::Dequeue => Operation::Dequeue,
            MenuItem::Traverse(order) => Operation::Traverse(order),
            MenuItem::ArrayInsert => {
                let [value, index] = numbers::<2>(input, self.params())?;
                Operation::ArrayInsert { value, index }
            }
            MenuItem::ArrayDelete => {
                let [index] = numbers::<1>(input, self.params())?;
                Operation::ArrayDelete { index }
            }
            MenuItem::ArraySearch => Operation::ArraySearch {
                value: single(input)?,
            },
            MenuItem::StackPush => Operation::StackPush {
                value: single(input)?,
            },
            MenuItem::Enqueue => Operation::Enqueue {
                value: single(input)?,
            },
            MenuItem::ListInsert(position) => Operation::ListInsert {
                value: single(input)?,
                position,
            },
            MenuItem::ListDelete => Operation::ListDelete {
                value: single(input)?,
            },
            MenuItem::BstInsert => Operation::BstInsert {
                value: single(input)?,
            },
            MenuItem::BstSearch => Operation::BstSearch {
                value: single(input)?,
            },
            MenuItem::HashInsert => {
                let (key, value) = input
                    .split_once(',')
                    .ok_or_else(|| "Expected: key, value".to_string())?;
                let key = parse_number(key)?;
                let value = value.trim();
                if value.is_empty() {
                    return Err("Hash value must not be empty".to_string());
                }
                Operation::HashInsert {
                    key,
                    value: value.to_string(),
                }
            }
        };
        Ok(op)
    }
}

/// Parse a comma-separated list of integers, e.g. for loading new data
pub fn parse_values(input: &str) -> Result<Vec<i64>, String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_number)
        .collect()
}

fn parse_number(text: &str) -> Result<i64, String> {
    let text = text.trim();
    text.parse::<i64>()
        .map_err(|_| format!("'{}' is not a number", text))
}

fn single(input: &str) -> Result<i64, String> {
    let [value] = numbers::<1>(input, "value")?;
    Ok(value)
}

fn numbers<const N: usize>(input: &str, params: &str) -> Result<[i64; N], String> {
    let values = parse_values(input)?;
    values
        .try_into()
        .map_err(|_| format!("Expected: {}", params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_family_has_items() {
        for kind in StructureKind::ALL {
            assert!(!MenuItem::items_for(kind).is_empty(), "{}", kind);
        }
        assert_eq!(MenuItem::items_for(StructureKind::Tree).len(), 6);
    }

    #[test]
    fn test_build_with_parameters() {
        assert_eq!(
            MenuItem::ArrayInsert.build("42, -1"),
            Ok(Operation::ArrayInsert {
                value: 42,
                index: -1
            })
        );
        assert_eq!(
            MenuItem::HashInsert.build("17, seventeen"),
            Ok(Operation::HashInsert {
                key: 17,
                value: "seventeen".to_string()
            })
        );
        assert_eq!(MenuItem::StackPop.build("ignored"), Ok(Operation::StackPop));
    }

    #[test]
    fn test_build_rejects_bad_input() {
        assert_eq!(
            MenuItem::ArrayInsert.build("1"),
            Err("Expected: value, index".to_string())
        );
        assert!(MenuItem::StackPush.build("").is_err());
        assert!(MenuItem::BstSearch.build("abc").is_err());
        assert!(MenuItem::HashInsert.build("3,").is_err());
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_values("5, 3,8 ,1"), Ok(vec![5, 3, 8, 1]));
        assert_eq!(parse_values(""), Ok(vec![]));
        assert!(parse_values("1,x").is_err());
    }
}
