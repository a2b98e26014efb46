//! Ordered option lists for [`OptionSelect`](crate::select::OptionSelect).

use std::cmp::Ordering;

/// One entry in a select: what the user sees and the value it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: i32,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: i32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Errors from building an [`OptionList`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionListError {
    /// Two options share a value.
    #[error("duplicate option value {value} at index {index}")]
    Duplicate { index: usize, value: i32 },
    /// Values change direction part-way through.
    #[error("option value {value} at index {index} breaks the list order")]
    Unordered { index: usize, value: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

/// Options sorted strictly by value, ascending or descending.
///
/// Keeping the order lets [`position`](OptionList::position) find a value
/// with a binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList {
    options: Vec<SelectOption>,
    direction: Direction,
}

impl OptionList {
    /// Check `options` and wrap them.
    ///
    /// The direction is taken from the first two values; every later value
    /// has to keep going the same way.
    pub fn new(options: Vec<SelectOption>) -> Result<Self, OptionListError> {
        let mut direction = Direction::Ascending;
        for (index, pair) in options.windows(2).enumerate() {
            let index = index + 1;
            let value = pair[1].value;
            let step = match pair[0].value.cmp(&value) {
                Ordering::Equal => return Err(OptionListError::Duplicate { index, value }),
                Ordering::Less => Direction::Ascending,
                Ordering::Greater => Direction::Descending,
            };
            if index == 1 {
                direction = step;
            } else if step != direction {
                return Err(OptionListError::Unordered { index, value });
            }
        }
        Ok(Self { options, direction })
    }

    /// Wrap options already known to be strictly ordered.
    pub(crate) fn presorted(options: Vec<SelectOption>, ascending: bool) -> Self {
        let direction = if ascending {
            Direction::Ascending
        } else {
            Direction::Descending
        };
        debug_assert!(Self::new(options.clone()).is_ok());
        Self { options, direction }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SelectOption> {
        self.options.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
        self.options.iter()
    }

    /// Index of the option carrying `value`, in O(log n).
    pub fn position(&self, value: i32) -> Option<usize> {
        self.options
            .binary_search_by(|option| match self.direction {
                Direction::Ascending => option.value.cmp(&value),
                Direction::Descending => value.cmp(&option.value),
            })
            .ok()
    }

    /// The label shown for `value`, if it is one of the options.
    pub fn label_of(&self, value: i32) -> Option<&str> {
        self.position(value)
            .and_then(|i| self.options.get(i))
            .map(|o| o.label.as_str())
    }
}

impl<'a> IntoIterator for &'a OptionList {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
