use crate::common;

use std::collections;

/// Joins the conditions of a [`ConditionMap`].
const AND: &str = " AND ";

/// Condition on a single attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// The attribute exists on the item.
    NotNull,
}

impl Condition {
    fn get_expression(&self, key_placeholder: &str) -> String {
        match self {
            Self::NotNull => format!("attribute_exists({key_placeholder})"),
        }
    }
}

/// Condition applied to a named attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyCondition {
    /// The condition to apply to the attribute.
    pub condition: Condition,
    /// The name of the attribute to apply the condition to.
    pub name: String,
}

/// Conditions that must all hold.
///
/// ```rust
/// use fatwa_api::common::condition;
///
/// let map = condition::ConditionMap {
///     conditions: vec![condition::KeyCondition {
///         name: "id".to_string(),
///         condition: condition::Condition::NotNull,
///     }],
/// };
/// assert_eq!(map, condition::ConditionMap::exists("id"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionMap {
    /// The conditions, rendered in order.
    pub conditions: Vec<KeyCondition>,
}

impl ConditionMap {
    /// Condition that holds only when the item carries `name`, i.e. the item exists.
    pub fn exists(name: impl Into<String>) -> Self {
        Self {
            conditions: vec![KeyCondition {
                condition: Condition::NotNull,
                name: name.into(),
            }],
        }
    }
}

impl From<ConditionMap> for common::ExpressionInput {
    fn from(condition_map: ConditionMap) -> Self {
        let operations = condition_map
            .conditions
            .into_iter()
            .map(|key_condition| {
                let placeholder = common::name_placeholder(&key_condition.name);
                common::ExpressionInput {
                    expression: key_condition.condition.get_expression(&placeholder),
                    expression_attribute_names: collections::HashMap::from([(
                        placeholder,
                        key_condition.name,
                    )]),
                    ..Default::default()
                }
            })
            .collect();
        common::ExpressionInput::merge(AND, operations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::exists(
        ConditionMap::exists("id"),
        common::ExpressionInput {
            expression: "attribute_exists(#id)".to_string(),
            expression_attribute_names: collections::HashMap::from([
                ("#id".to_string(), "id".to_string()),
            ]),
            ..Default::default()
        }
    )]
    #[case::all_of(
        ConditionMap {
            conditions: vec![
                KeyCondition {
                    name: "id".to_string(),
                    condition: Condition::NotNull,
                },
                KeyCondition {
                    name: "question".to_string(),
                    condition: Condition::NotNull,
                },
            ],
        },
        common::ExpressionInput {
            expression: "attribute_exists(#id) AND attribute_exists(#question)".to_string(),
            expression_attribute_names: collections::HashMap::from([
                ("#id".to_string(), "id".to_string()),
                ("#question".to_string(), "question".to_string()),
            ]),
            ..Default::default()
        }
    )]
    #[case::empty(ConditionMap { conditions: vec![] }, common::ExpressionInput::default())]
    fn test_condition_map(
        #[case] condition_map: ConditionMap,
        #[case] expected: common::ExpressionInput,
    ) {
        let actual: common::ExpressionInput = condition_map.into();
        assert_eq!(actual, expected);
    }
}
